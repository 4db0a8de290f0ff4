//! Data returned by (and sent to) the MFA service.
//!
//! Pure data structures - decoding happens per operation against the
//! shape that operation is documented to return, so no untyped JSON
//! leaks through the public API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A provisioned MFA user.
///
/// Server-side normalization (phone number formatting and the like) is
/// passed through unmodified. `otp` is the server-generated current
/// one-time password when the service includes it in the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MfaUser {
    pub unique_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub sms_number: Option<String>,
    #[serde(default)]
    pub voice_number: Option<String>,
    #[serde(default)]
    pub otp: Option<String>,
    #[serde(default)]
    pub meta: Option<Value>,
}

/// Wire shape of `check/` responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub(crate) struct AuthCheck {
    pub authenticated: bool,
}

/// One entry of the service's error catalog (`errors/`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiErrorEntry {
    #[serde(alias = "error_code")]
    pub code: String,
    #[serde(alias = "error_message")]
    pub message: String,
}

/// Optional attributes for user creation and updates.
///
/// Fluent builder - only attributes explicitly set here end up in the
/// outgoing request. `meta` is JSON-encoded into a single string
/// parameter, matching the service's parameter format.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UserAttributes {
    pub email: Option<String>,
    pub sms_number: Option<String>,
    pub voice_number: Option<String>,
    pub meta: Option<Value>,
}

impl UserAttributes {
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_sms_number(mut self, sms_number: impl Into<String>) -> Self {
        self.sms_number = Some(sms_number.into());
        self
    }

    pub fn with_voice_number(mut self, voice_number: impl Into<String>) -> Self {
        self.voice_number = Some(voice_number.into());
        self
    }

    pub fn with_meta(mut self, meta: Value) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.sms_number.is_none()
            && self.voice_number.is_none()
            && self.meta.is_none()
    }
}
