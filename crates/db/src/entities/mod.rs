//! `SeaORM` entities for the resource tables.
//!
//! The six principal tables share one column layout and are read through
//! raw statements in `repositories::principal`, so they have no entity here.

pub mod budgets;
pub mod donations;
pub mod emergency_requests;
pub mod extra_funds_requests;
pub mod fund_requests;
pub mod payments;
pub mod services;
pub mod tours;
