//! Core business logic for Park Pro.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Persistence is reached only through the `auth::PrincipalStore` trait.
//!
//! # Modules
//!
//! - `auth` - Credential verification and migration, role resolution, login
//! - `workflow` - Review lifecycle of fund requests, service applications and escalations
//! - `intake` - Validation of public submissions, funding requests and account forms

pub mod auth;
pub mod intake;
pub mod workflow;
