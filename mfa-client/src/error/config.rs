use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("Missing API Key Error: no API key provided {location}")]
    MissingApiKey { location: ErrorLocation },

    #[error("Access Point Error: access point list is empty {location}")]
    NoAccessPoints { location: ErrorLocation },

    #[error("Access Point Error: {url}: {reason} {location}")]
    InvalidAccessPoint {
        url: String,
        reason: String,
        location: ErrorLocation,
    },

    #[error("HTTP Client Error: {message} {location}")]
    HttpClient {
        message: String,
        location: ErrorLocation,
    },
}

impl From<reqwest::Error> for ConfigError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        ConfigError::HttpClient {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
