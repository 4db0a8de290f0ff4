//! Async client for a hosted multi-factor-authentication web service.
//!
//! Covers user provisioning, one-time-password verification, and
//! out-of-band delivery of authentication codes (SMS, voice, email).
//! Every operation goes through a single request dispatcher that tries
//! each configured access point in order and maps the service's status
//! codes onto the typed errors in [`error::ApiError`].

pub mod config;
pub mod error;
pub mod models;

mod mfa_client;
mod protocol;

#[cfg(test)]
mod tests;

pub use config::ClientConfig;
pub use error::{ApiError, ConfigError, CoreError};
pub use mfa_client::MfaClient;
pub use models::{ApiErrorEntry, MfaUser, UserAttributes};

/// User-Agent header sent with every request.
pub const USER_AGENT: &str =
    const_format::concatcp!("mfa-client/", env!("CARGO_PKG_VERSION"));
