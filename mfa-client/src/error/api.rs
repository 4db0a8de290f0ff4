//! Typed errors for MFA service operations.
//!
//! The service documents a fixed set of statuses that carry a structured
//! error envelope; each maps to exactly one variant here. Everything else
//! (unreachable access points, unparseable bodies, unrecognized statuses)
//! collapses into [`ApiError::Server`] once every access point has been
//! tried.

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ApiError {
    /// 401 - the API key was rejected.
    #[error("Credential Error: {message} (code {code}) {location}")]
    Credential {
        message: String,
        code: String,
        status: HttpStatusCode,
        body: String,
        location: ErrorLocation,
    },

    /// 402 - quota or payment limit reached.
    #[error("Rate Limit Error: {message} (code {code}) {location}")]
    RateLimit {
        message: String,
        code: String,
        status: HttpStatusCode,
        body: String,
        location: ErrorLocation,
    },

    /// 404 - the referenced resource does not exist.
    #[error("Not Found Error: {message} (code {code}) {location}")]
    NotFound {
        message: String,
        code: String,
        status: HttpStatusCode,
        body: String,
        location: ErrorLocation,
    },

    /// 406 - malformed or missing request parameters.
    #[error("Parameter Error: {message} (code {code}) {location}")]
    Parameter {
        message: String,
        code: String,
        status: HttpStatusCode,
        body: String,
        location: ErrorLocation,
    },

    /// 409 - the resource already exists.
    #[error("Conflict Error: {message} (code {code}) {location}")]
    Conflict {
        message: String,
        code: String,
        status: HttpStatusCode,
        body: String,
        location: ErrorLocation,
    },

    /// Transport or infrastructure failure across every access point.
    /// Carries no structured error code.
    #[error("Server Error: {message} {location}")]
    Server {
        message: String,
        location: ErrorLocation,
    },

    /// A response was accepted but its `data` payload did not decode
    /// into the operation's expected shape.
    #[error("JSON Error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    /// Map a structured-error status onto its variant.
    ///
    /// Returns `None` for statuses outside the documented set; the
    /// dispatcher treats those as success (< 400) or has already failed
    /// over (≥ 400).
    #[track_caller]
    pub fn classify(
        status: HttpStatusCode,
        message: String,
        code: String,
        body: String,
    ) -> Option<Self> {
        let location = ErrorLocation::from(Location::caller());
        let error = match status.0 {
            401 => ApiError::Credential {
                message,
                code,
                status,
                body,
                location,
            },
            402 => ApiError::RateLimit {
                message,
                code,
                status,
                body,
                location,
            },
            404 => ApiError::NotFound {
                message,
                code,
                status,
                body,
                location,
            },
            406 => ApiError::Parameter {
                message,
                code,
                status,
                body,
                location,
            },
            409 => ApiError::Conflict {
                message,
                code,
                status,
                body,
                location,
            },
            _ => return None,
        };
        Some(error)
    }

    /// HTTP status for structured variants, `None` for `Server`/`Json`.
    pub fn status(&self) -> Option<HttpStatusCode> {
        match self {
            ApiError::Credential { status, .. }
            | ApiError::RateLimit { status, .. }
            | ApiError::NotFound { status, .. }
            | ApiError::Parameter { status, .. }
            | ApiError::Conflict { status, .. } => Some(*status),
            ApiError::Server { .. } | ApiError::Json { .. } => None,
        }
    }

    /// Service-assigned error code for structured variants.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            ApiError::Credential { code, .. }
            | ApiError::RateLimit { code, .. }
            | ApiError::NotFound { code, .. }
            | ApiError::Parameter { code, .. }
            | ApiError::Conflict { code, .. } => Some(code),
            ApiError::Server { .. } | ApiError::Json { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        ApiError::Json {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
