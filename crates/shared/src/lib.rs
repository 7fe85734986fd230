//! Shared types, errors, and configuration for Park Pro.
//!
//! This crate provides common types used across all other crates:
//! - The principal `Role` enum and its table mapping
//! - Session token claims and the `JwtService`
//! - Application-wide error types
//! - Configuration management

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;


pub use auth::Claims;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtError, JwtService};
pub use types::Role;
