//! Foundation types shared across the MFA client workspace.
//!
//! This crate contains pure support types with no business logic:
//! error-site tracking, HTTP status classification, and secure
//! credential handling. The `mfa-client` crate builds on these.

pub mod error;
pub mod http_status;
pub mod redacted_key;

#[cfg(test)]
mod tests;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_key::RedactedApiKey;
