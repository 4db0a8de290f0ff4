//! Wire shapes shared by every operation.

use serde::Deserialize;
use serde_json::Value;

/// Response envelope returned by every service endpoint.
///
/// Successful responses carry the payload under `data`; structured errors
/// add `error_message` and `error_code`. Anything that does not decode
/// into this shape counts as a transport failure for failover purposes.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
}

/// Ordered request parameters, sent both as query string and form body.
///
/// Insertion order is preserved so outgoing requests are deterministic.
/// Optional values the caller omitted are never inserted - the service
/// distinguishes "absent" from "empty".
#[derive(Debug, Default, Clone)]
pub(crate) struct Params(Vec<(&'static str, String)>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &'static str, value: impl Into<String>) {
        self.0.push((key, value.into()));
    }

    pub fn push_opt(&mut self, key: &'static str, value: Option<impl Into<String>>) {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[(&'static str, String)] {
        &self.0
    }
}
