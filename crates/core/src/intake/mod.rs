//! Form validation for everything the API accepts besides logins.
//!
//! Each `*Input` type mirrors a request body with every field optional, so
//! that absent fields are reported together as `MissingFields` rather than
//! as a body rejection. `validate` turns it into a `New*` value the
//! database layer can insert without further checks.

mod accounts;
mod error;
mod fields;
mod public;
mod requests;

pub use accounts::{
    CheckedPasswordChange, NewPrincipal, PasswordChange, PasswordReset, ProfileChanges,
    ProfileInput, StaffInput, VisitorRegistration,
};
pub use error::IntakeError;
pub use fields::{RequiredFields, optional, positive};
pub use public::{
    DonationInput, MAX_TOUR_GUESTS, NewDonation, NewPayment, NewServiceApplication,
    NewTourBooking, PaymentInput, ServiceApplicationInput, TOUR_PRICE_PER_GUEST,
    TourBookingInput, UploadedFile, card_last4, normalize_expiry,
};
pub use requests::{
    BudgetInput, BudgetItem, BudgetItemInput, EmergencyRequestInput, ExtraFundsInput,
    FundRequestInput, NewBudget, NewEmergencyRequest, NewExtraFunds, NewFundRequest,
};
