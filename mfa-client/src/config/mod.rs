//! Client configuration: the ordered access-point list and request timeout.
//!
//! The list is immutable once the client is built. Tests that need to
//! simulate a dead or misbehaving access point construct a config pointing
//! at a mock server or an unused port instead of mutating shared state.

use crate::error::config::ConfigError;

use common::ErrorLocation;

use std::panic::Location;
use std::time::Duration;

use url::Url;

/// Default per-request timeout. Short enough that failover to the backup
/// access point does not leave callers hanging.
pub const DEFAULT_TIMEOUT_DURATION: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Access points tried in order for every request.
    pub access_points: Vec<Url>,
    /// Per-request timeout applied by the HTTP client.
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(access_points: Vec<Url>) -> Self {
        Self {
            access_points,
            timeout: DEFAULT_TIMEOUT_DURATION,
        }
    }

    /// Parse access points from string form.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidAccessPoint`] for any URL that does
    /// not parse.
    pub fn parse(access_points: &[&str]) -> Result<Self, ConfigError> {
        let mut parsed = Vec::with_capacity(access_points.len());
        for raw in access_points {
            let url = Url::parse(raw).map_err(|e| ConfigError::InvalidAccessPoint {
                url: (*raw).to_string(),
                reason: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;
            parsed.push(url);
        }
        Ok(Self::new(parsed))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validate the access-point list.
    ///
    /// Each access point must use http(s) and end its path with `/` -
    /// relative operation paths are joined onto the base, and a missing
    /// trailing slash would silently drop the base's last path segment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the list is empty or any URL violates
    /// the rules above.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.access_points.is_empty() {
            return Err(ConfigError::NoAccessPoints {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        for access_point in &self.access_points {
            if access_point.scheme() != "http" && access_point.scheme() != "https" {
                return Err(ConfigError::InvalidAccessPoint {
                    url: access_point.to_string(),
                    reason: format!("unsupported scheme '{}'", access_point.scheme()),
                    location: ErrorLocation::from(Location::caller()),
                });
            }

            if !access_point.path().ends_with('/') {
                return Err(ConfigError::InvalidAccessPoint {
                    url: access_point.to_string(),
                    reason: String::from("path must end with '/'"),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        }

        Ok(())
    }
}
