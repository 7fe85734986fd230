//! Common types used across the application.

pub mod role;

pub use role::Role;
