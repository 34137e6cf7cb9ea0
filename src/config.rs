//! Client configuration
//!
//! Credentials, merchant identity and behavioural flags for [`crate::GatewayClient`].
//! Most applications build a [`ClientConfig`] in code; `from_env` and `from_file`
//! exist for services that prefer to keep gateway settings outside the binary.

use std::fmt;
use std::path::Path;

use reqwest::Url;
use serde::Deserialize;

use crate::error::{GatewayError, GatewayResult};

pub const DEFAULT_BASE_URL: &str = "https://api.ecocash.co.zw";
pub const DEFAULT_COUNTRY_CODE: &str = "ZW";
const ENV_PREFIX: &str = "ECOCASH";

/// Gateway client configuration
///
/// Immutable once handed to the client. The merchant identity fields are copied
/// onto every outbound transaction and cannot be overridden per call.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Gateway base URL, without the `/payment/v1` suffix
    pub base_url: String,
    /// HTTP basic-auth username
    pub username: String,
    /// HTTP basic-auth password
    pub password: String,
    pub merchant_code: String,
    pub merchant_pin: String,
    pub merchant_number: String,
    pub merchant_name: String,
    pub super_merchant_name: String,
    pub terminal_id: String,
    pub location: String,
    /// Usually "ZW"
    pub country_code: String,
    /// Webhook the gateway notifies when a transaction settles
    pub notify_url: String,
    /// Log every request and response body at debug level
    pub trace_requests: bool,
    /// Silence transport warnings such as credentials over plain HTTP
    pub disable_http_warnings: bool,
    /// Whole-request timeout applied to the HTTP transport
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            username: String::new(),
            password: String::new(),
            merchant_code: String::new(),
            merchant_pin: String::new(),
            merchant_number: String::new(),
            merchant_name: String::new(),
            super_merchant_name: String::new(),
            terminal_id: String::new(),
            location: String::new(),
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            notify_url: String::new(),
            trace_requests: false,
            disable_http_warnings: false,
            timeout_secs: None,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("merchant_code", &self.merchant_code)
            .field("merchant_pin", &"<redacted>")
            .field("merchant_number", &self.merchant_number)
            .field("merchant_name", &self.merchant_name)
            .field("super_merchant_name", &self.super_merchant_name)
            .field("terminal_id", &self.terminal_id)
            .field("location", &self.location)
            .field("country_code", &self.country_code)
            .field("notify_url", &self.notify_url)
            .field("trace_requests", &self.trace_requests)
            .field("disable_http_warnings", &self.disable_http_warnings)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ClientConfig {
    /// Load config from `ECOCASH_*` environment variables
    ///
    /// e.g. `ECOCASH_BASE_URL`, `ECOCASH_USERNAME`, `ECOCASH_MERCHANT_PIN`,
    /// `ECOCASH_TRACE_REQUESTS`. Unset variables fall back to [`Default`].
    pub fn from_env() -> GatewayResult<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::Environment::with_prefix(ENV_PREFIX))
            .build()?;

        let config: ClientConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a file (format picked by extension), with `ECOCASH_*`
    /// environment variables layered on top.
    pub fn from_file(path: impl AsRef<Path>) -> GatewayResult<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path.as_ref()))
            .add_source(::config::Environment::with_prefix(ENV_PREFIX))
            .build()?;

        let config: ClientConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check the settings the transport cannot work without.
    ///
    /// Business identifiers are passed through to the gateway as-is.
    pub fn validate(&self) -> GatewayResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(GatewayError::config_error("base_url cannot be empty"));
        }

        let url = Url::parse(&self.base_url).map_err(|e| {
            GatewayError::config_error(format!("base_url is not a valid URL: {}", e))
        })?;

        if url.cannot_be_a_base() {
            return Err(GatewayError::config_error(format!(
                "base_url cannot be used as a base: {}",
                self.base_url
            )));
        }

        if self.username.trim().is_empty() {
            return Err(GatewayError::config_error("username cannot be empty"));
        }

        if self.password.is_empty() {
            return Err(GatewayError::config_error("password cannot be empty"));
        }

        if self.timeout_secs == Some(0) {
            return Err(GatewayError::config_error(
                "timeout_secs must be greater than 0",
            ));
        }

        Ok(())
    }

    /// True when basic credentials would travel over cleartext HTTP.
    pub(crate) fn is_plain_http(&self) -> bool {
        Url::parse(&self.base_url)
            .map(|url| url.scheme() == "http")
            .unwrap_or(false)
    }
}
