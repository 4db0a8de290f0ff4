use mfa_client::{ClientConfig, MfaClient};

/// Access point that accepts no connections - port 9 (discard) is closed
/// on any sane test machine, so requests fail fast with refused.
pub const DEAD_ACCESS_POINT: &str = "http://127.0.0.1:9/";

/// Build a client whose access points are the given URLs, in order.
pub fn client_for(access_points: &[&str]) -> MfaClient {
    let config = ClientConfig::parse(access_points).expect("test URLs are valid");
    MfaClient::new("test-api-key", config).expect("client builds from valid config")
}
