use crate::USER_AGENT;
use crate::config::ClientConfig;
use crate::error::api::ApiError;
use crate::error::config::ConfigError;
use crate::models::{ApiErrorEntry, AuthCheck, MfaUser, UserAttributes};
use crate::protocol::{Envelope, Params};

use common::{ErrorLocation, HttpStatusCode, RedactedApiKey};

use std::panic::Location;

use log::{debug, info, warn};
use reqwest::{Client, Method};
use serde_json::Value;
use url::Url;

const USERS_ENDPOINT: &str = "users/";
const CHECK_ENDPOINT: &str = "check/";
const TOKEN_ENDPOINT: &str = "token/";
const SMS_ENDPOINT: &str = "sms/";
const EMAIL_ENDPOINT: &str = "email/";
const VOICE_ENDPOINT: &str = "voice/";
const ERRORS_ENDPOINT: &str = "errors/";

const QUICK_TEST_UNIQUE_ID: &str = "quick-test-user";
const QUICK_TEST_DISPLAY_NAME: &str = "Quick Test User";

/// Async client for the MFA service.
///
/// Cheap to clone and safe to share across tasks; the underlying HTTP
/// client pools connections and every call is independent.
#[derive(Clone)]
pub struct MfaClient {
    access_points: Vec<Url>,
    api_key: RedactedApiKey,
    http: Client,
}

impl MfaClient {
    /// Build a client from an API key and validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the key is empty, the access-point list
    /// fails validation, or the HTTP client cannot be constructed.
    pub fn new(api_key: impl Into<String>, config: ClientConfig) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ConfigError::MissingApiKey {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        config.validate()?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            access_points: config.access_points,
            api_key: RedactedApiKey::new(api_key),
            http,
        })
    }

    /// Issue a request against each access point in order until one
    /// responds usably.
    ///
    /// A response is usable when its body decodes as a JSON envelope and
    /// its status is either below 400 or one of the documented
    /// structured-error codes. Anything else abandons the access point.
    /// A structured error is raised immediately - it indicts the request,
    /// not the access point, so no failover is attempted for it.
    async fn dispatch(
        &self,
        method: Method,
        path_suffix: &str,
        params: &Params,
    ) -> Result<Value, ApiError> {
        for access_point in &self.access_points {
            let url = match access_point.join(path_suffix) {
                Ok(url) => url,
                Err(error) => {
                    warn!("access point {access_point} rejected path {path_suffix}: {error}");
                    continue;
                }
            };

            let mut request = self
                .http
                .request(method.clone(), url.clone())
                .basic_auth("", Some(self.api_key.as_str()));
            if !params.is_empty() {
                // The service accepts parameters from either the query
                // string or the body; send both.
                request = request.query(params.as_slice()).form(params.as_slice());
            }

            let response = match request.send().await {
                Ok(response) => response,
                Err(error) => {
                    warn!("access point {access_point} unreachable: {error}");
                    continue;
                }
            };

            let status = HttpStatusCode::from(response.status().as_u16());
            let body = match response.text().await {
                Ok(body) => body,
                Err(error) => {
                    warn!("access point {access_point} body read failed: {error}");
                    continue;
                }
            };

            let envelope: Envelope = match serde_json::from_str(&body) {
                Ok(envelope) => envelope,
                Err(error) => {
                    warn!("access point {access_point} returned a non-JSON body: {error}");
                    continue;
                }
            };

            let is_error_status = status.is_client_error() || status.is_server_error();
            if is_error_status && !status.is_structured_error() {
                if status.is_server_error() {
                    warn!("access point {access_point} failed with server status {status}");
                } else {
                    warn!("access point {access_point} returned unrecognized status {status}");
                }
                continue;
            }

            debug!("{method} {url} -> {status}");

            let message = envelope.error_message.unwrap_or_default();
            let code = envelope.error_code.unwrap_or_default();
            if let Some(error) = ApiError::classify(status, message, code, body) {
                return Err(error);
            }

            return Ok(envelope.data);
        }

        Err(ApiError::Server {
            message: format!(
                "communication error with all {} access points",
                self.access_points.len()
            ),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Create a user with a fresh server-side secret.
    ///
    /// # Arguments
    /// * `unique_id` - Caller-chosen identifier (username, email, ...)
    /// * `display_name` - Name shown in authenticator apps
    /// * `attributes` - Optional delivery destinations and metadata
    ///
    /// # Errors
    ///
    /// [`ApiError::Conflict`] if the unique id is already provisioned.
    pub async fn create_user(
        &self,
        unique_id: &str,
        display_name: &str,
        attributes: UserAttributes,
    ) -> Result<MfaUser, ApiError> {
        let mut params = Params::new();
        params.push("unique_id", unique_id);
        params.push("display_name", display_name);
        extend_with_attributes(&mut params, attributes)?;

        let data = self.dispatch(Method::POST, USERS_ENDPOINT, &params).await?;
        Ok(serde_json::from_value(data)?)
    }

    /// Update an existing user. Only the supplied fields change.
    pub async fn update_user(
        &self,
        unique_id: &str,
        display_name: Option<&str>,
        attributes: UserAttributes,
    ) -> Result<MfaUser, ApiError> {
        let mut params = Params::new();
        params.push_opt("display_name", display_name);
        extend_with_attributes(&mut params, attributes)?;

        let data = self
            .dispatch(Method::PUT, &user_path(unique_id), &params)
            .await?;
        Ok(serde_json::from_value(data)?)
    }

    /// Delete a user. Returns the service's confirmation flag.
    pub async fn delete_user(&self, unique_id: &str) -> Result<bool, ApiError> {
        let data = self
            .dispatch(Method::DELETE, &user_path(unique_id), &Params::new())
            .await?;
        Ok(serde_json::from_value(data)?)
    }

    /// Retrieve every provisioned user.
    pub async fn get_all_users(&self) -> Result<Vec<MfaUser>, ApiError> {
        let data = self
            .dispatch(Method::GET, USERS_ENDPOINT, &Params::new())
            .await?;
        Ok(serde_json::from_value(data)?)
    }

    /// Retrieve a single user.
    pub async fn get_user(&self, unique_id: &str) -> Result<MfaUser, ApiError> {
        let data = self
            .dispatch(Method::GET, &user_path(unique_id), &Params::new())
            .await?;
        Ok(serde_json::from_value(data)?)
    }

    /// Verify a one-time password for a user.
    ///
    /// Returns whether the code was accepted. All errors propagate
    /// unchanged; see [`MfaClient::check_auth_fail_open`] for the
    /// fail-open variant.
    pub async fn check_auth(&self, unique_id: &str, auth_code: &str) -> Result<bool, ApiError> {
        let mut params = Params::new();
        params.push("unique_id", unique_id);
        params.push("auth_code", auth_code);

        let data = self.dispatch(Method::POST, CHECK_ENDPOINT, &params).await?;
        let check: AuthCheck = serde_json::from_value(data)?;
        Ok(check.authenticated)
    }

    /// Verify a one-time password, treating every failure as success.
    ///
    /// **This method is fail-open.** Credential errors, rate limits, and
    /// total access-point outages all report `true` (authenticated).
    /// Use it only where locking users out during an MFA-service outage
    /// is worse than waving them through, and make that decision
    /// deliberately - the swallowed error is logged at `warn` level.
    pub async fn check_auth_fail_open(&self, unique_id: &str, auth_code: &str) -> bool {
        match self.check_auth(unique_id, auth_code).await {
            Ok(authenticated) => authenticated,
            Err(error) => {
                warn!("check_auth failed, fail-open policy reports authenticated: {error}");
                true
            }
        }
    }

    /// Look up the user that a one-time token was issued for.
    pub async fn get_user_by_token(&self, token: &str) -> Result<MfaUser, ApiError> {
        let mut params = Params::new();
        params.push("token", token);

        let data = self.dispatch(Method::POST, TOKEN_ENDPOINT, &params).await?;
        Ok(serde_json::from_value(data)?)
    }

    /// Text the current one-time password to the user.
    ///
    /// Falls back to the user's stored number when `sms_number` is
    /// omitted.
    pub async fn send_sms(
        &self,
        unique_id: &str,
        sms_number: Option<&str>,
    ) -> Result<MfaUser, ApiError> {
        self.send_code(SMS_ENDPOINT, unique_id, "sms_number", sms_number)
            .await
    }

    /// Email the current one-time password to the user.
    pub async fn send_email(
        &self,
        unique_id: &str,
        email: Option<&str>,
    ) -> Result<MfaUser, ApiError> {
        self.send_code(EMAIL_ENDPOINT, unique_id, "email", email).await
    }

    /// Deliver the current one-time password by voice call.
    pub async fn send_voice(
        &self,
        unique_id: &str,
        voice_number: Option<&str>,
    ) -> Result<MfaUser, ApiError> {
        self.send_code(VOICE_ENDPOINT, unique_id, "voice_number", voice_number)
            .await
    }

    async fn send_code(
        &self,
        endpoint: &str,
        unique_id: &str,
        destination_key: &'static str,
        destination: Option<&str>,
    ) -> Result<MfaUser, ApiError> {
        let mut params = Params::new();
        params.push("unique_id", unique_id);
        params.push_opt(destination_key, destination);

        let data = self.dispatch(Method::POST, endpoint, &params).await?;
        Ok(serde_json::from_value(data)?)
    }

    /// Retrieve the service's error catalog.
    pub async fn api_errors(&self) -> Result<Vec<ApiErrorEntry>, ApiError> {
        let data = self
            .dispatch(Method::GET, ERRORS_ENDPOINT, &Params::new())
            .await?;
        Ok(serde_json::from_value(data)?)
    }

    /// End-to-end self check against the live service.
    ///
    /// Provisions a well-known test user, exercises retrieval, listing
    /// and OTP verification, optionally sends a code to the supplied
    /// destinations, then deletes the user. Progress is logged at `info`
    /// level; the first failing step is returned.
    pub async fn quick_test(
        &self,
        test_email: Option<&str>,
        test_sms_number: Option<&str>,
    ) -> Result<(), ApiError> {
        info!("1) creating test user {QUICK_TEST_UNIQUE_ID}");
        let user = match self
            .create_user(
                QUICK_TEST_UNIQUE_ID,
                QUICK_TEST_DISPLAY_NAME,
                UserAttributes::default(),
            )
            .await
        {
            Ok(user) => user,
            Err(ApiError::Conflict { .. }) => {
                info!("test user already provisioned, reusing it");
                self.get_user(QUICK_TEST_UNIQUE_ID).await?
            }
            Err(error) => return Err(error),
        };

        info!("2) retrieving created user");
        let fetched = self.get_user(QUICK_TEST_UNIQUE_ID).await?;

        info!("3) retrieving all users");
        let all_users = self.get_all_users().await?;
        if !all_users.iter().any(|u| u.unique_id == fetched.unique_id) {
            return Err(ApiError::Server {
                message: String::from("test user missing from user listing"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        info!("4) checking a wrong auth code");
        if self.check_auth(QUICK_TEST_UNIQUE_ID, "000000").await? {
            return Err(ApiError::Server {
                message: String::from("service accepted a wrong auth code"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        info!("5) checking the server-issued one-time password");
        let otp = user.otp.or(fetched.otp).ok_or_else(|| ApiError::Server {
            message: String::from("service did not return a current OTP for the test user"),
            location: ErrorLocation::from(Location::caller()),
        })?;
        if !self.check_auth(QUICK_TEST_UNIQUE_ID, &otp).await? {
            return Err(ApiError::Server {
                message: String::from("service rejected its own one-time password"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if let Some(email) = test_email {
            info!("5a) sending test email to {email}");
            self.send_email(QUICK_TEST_UNIQUE_ID, Some(email)).await?;
        }
        if let Some(sms_number) = test_sms_number {
            info!("5b) sending test SMS to {sms_number}");
            self.send_sms(QUICK_TEST_UNIQUE_ID, Some(sms_number)).await?;
        }

        info!("6) deleting test user");
        self.delete_user(QUICK_TEST_UNIQUE_ID).await?;

        info!("quick test passed");
        Ok(())
    }
}

fn user_path(unique_id: &str) -> String {
    format!("{USERS_ENDPOINT}{unique_id}/")
}

fn extend_with_attributes(
    params: &mut Params,
    attributes: UserAttributes,
) -> Result<(), ApiError> {
    params.push_opt("email", attributes.email);
    params.push_opt("sms_number", attributes.sms_number);
    params.push_opt("voice_number", attributes.voice_number);
    if let Some(meta) = attributes.meta {
        params.push("meta", serde_json::to_string(&meta)?);
    }
    Ok(())
}
