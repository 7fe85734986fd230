//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod donation;
pub mod escalation;
pub mod fund_request;
pub mod payment;
pub mod principal;
pub mod review;
pub mod service_application;
pub mod tour;

pub use donation::{DonationRepository, MonthlyAmount};
pub use escalation::EscalationRepository;
pub use fund_request::{
    FundRequestError, FundRequestRepository, FundRequestStats, FundRequestWithStaff,
};
pub use payment::PaymentRepository;
pub use principal::{PrincipalRepository, RecentLogin};
pub use review::{ReviewError, ReviewRepository};
pub use service_application::{ServiceApplicationRepository, StoredDocuments};
pub use tour::{MonthlyBookings, TourRepository};
