//! Client configuration

use chrono_tz::Tz;

use crate::error::ClientError;
use crate::http::NetworkHttpClient;

/// Client configuration for connecting to the Comanda server
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8080")
    pub base_url: String,

    /// JWT token for authentication (customer token, when logged in)
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Restaurant timezone; the booking calendar counts days in it
    pub timezone: Tz,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
            timezone: chrono_tz::Asia::Kolkata,
        }
    }

    /// Set the JWT token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the restaurant timezone
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> Result<NetworkHttpClient, ClientError> {
        NetworkHttpClient::from_config(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}
