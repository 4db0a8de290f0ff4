use crate::config::{ClientConfig, DEFAULT_TIMEOUT_DURATION};
use crate::error::ConfigError;
use crate::mfa_client::MfaClient;

use std::time::Duration;

/// **VALUE**: Verifies that parsing well-formed access points succeeds and
/// keeps their order.
///
/// **WHY THIS MATTERS**: Failover tries access points in order; a reordering
/// bug would silently promote the backup to primary.
#[test]
fn given_two_access_points_when_parsed_then_order_is_preserved() {
    // GIVEN/WHEN: A primary and a backup
    let config = ClientConfig::parse(&[
        "https://api.example.com/v2/",
        "https://backup.example.com/v2/",
    ])
    .expect("both URLs are valid");

    // THEN: Order preserved, default timeout applied
    assert_eq!(config.access_points.len(), 2);
    assert_eq!(config.access_points[0].host_str(), Some("api.example.com"));
    assert_eq!(
        config.access_points[1].host_str(),
        Some("backup.example.com")
    );
    assert_eq!(config.timeout, DEFAULT_TIMEOUT_DURATION);
}

/// **VALUE**: Verifies that an empty access-point list fails validation.
///
/// **BUG THIS CATCHES**: A client with no access points would report every
/// call as a total outage; better to refuse construction.
#[test]
fn given_empty_access_point_list_when_validated_then_returns_error() {
    let config = ClientConfig::new(Vec::new());

    let result = config.validate();

    assert!(matches!(result, Err(ConfigError::NoAccessPoints { .. })));
}

/// **VALUE**: Verifies that non-HTTP schemes are rejected.
#[test]
fn given_non_http_scheme_when_validated_then_returns_error() {
    let config = ClientConfig::parse(&["ftp://api.example.com/v2/"]).expect("parses as a URL");

    let result = config.validate();

    match result.unwrap_err() {
        ConfigError::InvalidAccessPoint { reason, .. } => {
            assert!(reason.contains("scheme"), "should name the scheme: {reason}");
        }
        other => panic!("expected InvalidAccessPoint, got {other}"),
    }
}

/// **VALUE**: Verifies that a base URL without a trailing slash is rejected.
///
/// **WHY THIS MATTERS**: Operation paths are joined onto the base URL. With
/// a base of `/v2` (no slash), `Url::join` would resolve `users/` against
/// the parent and silently drop the `/v2` segment - every request would hit
/// the wrong path.
#[test]
fn given_base_url_without_trailing_slash_when_validated_then_returns_error() {
    let config = ClientConfig::parse(&["https://api.example.com/v2"]).expect("parses as a URL");

    let result = config.validate();

    match result.unwrap_err() {
        ConfigError::InvalidAccessPoint { reason, .. } => {
            assert!(reason.contains('/'), "should mention the slash: {reason}");
        }
        other => panic!("expected InvalidAccessPoint, got {other}"),
    }
}

/// **VALUE**: Verifies that an unparseable URL is reported with its text.
#[test]
fn given_garbage_url_when_parsed_then_returns_invalid_access_point() {
    let result = ClientConfig::parse(&["not a url"]);

    match result.unwrap_err() {
        ConfigError::InvalidAccessPoint { url, .. } => assert_eq!(url, "not a url"),
        other => panic!("expected InvalidAccessPoint, got {other}"),
    }
}

/// **VALUE**: Verifies that client construction refuses an empty API key.
///
/// **WHY THIS MATTERS**: An empty key would authenticate as nobody and turn
/// every call into a 401 at runtime; failing at construction points at the
/// actual mistake.
#[test]
fn given_empty_api_key_when_building_client_then_returns_error() {
    let config = ClientConfig::parse(&["https://api.example.com/v2/"]).expect("valid URL");

    let result = MfaClient::new("", config);

    assert!(matches!(result, Err(ConfigError::MissingApiKey { .. })));
}

/// **VALUE**: Verifies that a valid key and config produce a client.
#[test]
fn given_valid_key_and_config_when_building_client_then_succeeds() {
    let config = ClientConfig::parse(&["https://api.example.com/v2/"])
        .expect("valid URL")
        .with_timeout(Duration::from_secs(2));

    let result = MfaClient::new("test-api-key", config);

    assert!(result.is_ok());
}
