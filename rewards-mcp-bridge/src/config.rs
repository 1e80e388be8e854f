//! Bridge configuration.
//!
//! Configuration is read from the process environment, optionally layered on a TOML
//! file named by `REWARDS_CONFIG`. The file may only carry non-secret settings; the
//! merchant key and secret are accepted from the environment alone.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `REWARDS_CONFIG` | Path to a TOML file with non-secret settings | none |
//! | `REWARDS_BASE_URL` | Base URL of the rewards API | required |
//! | `REWARDS_API_STUB` | Path prefix inserted before the program id | `v1` |
//! | `MERCHANT_KEY` / `MERCHANT_SECRET` | Basic auth credentials | empty (unauthenticated) |
//! | `MERCHANT_ID` | Value of the `X-Merchant-Id` header on balance calls | empty |
//! | `REWARDS_HTTP_TIMEOUT_SECS` | Request timeout | 30 |
//! | `REWARDS_HTTP_CONNECT_TIMEOUT_SECS` | Connect timeout | 10 |

use serde::Deserialize;
use url::Url;

use crate::{
    auth::Credentials,
    error::{BridgeError, Result},
    transport::HttpConfig,
};

/// Environment variable naming the optional TOML configuration file.
pub const CONFIG_PATH_VAR: &str = "REWARDS_CONFIG";
/// Environment variable holding the API base URL.
pub const BASE_URL_VAR: &str = "REWARDS_BASE_URL";
/// Environment variable holding the API path stub.
pub const API_STUB_VAR: &str = "REWARDS_API_STUB";
/// Environment variable holding the merchant key.
pub const MERCHANT_KEY_VAR: &str = "MERCHANT_KEY";
/// Environment variable holding the merchant secret.
pub const MERCHANT_SECRET_VAR: &str = "MERCHANT_SECRET";
/// Environment variable holding the merchant identifier.
pub const MERCHANT_ID_VAR: &str = "MERCHANT_ID";
/// Environment variable overriding the request timeout.
pub const TIMEOUT_VAR: &str = "REWARDS_HTTP_TIMEOUT_SECS";
/// Environment variable overriding the connect timeout.
pub const CONNECT_TIMEOUT_VAR: &str = "REWARDS_HTTP_CONNECT_TIMEOUT_SECS";

const DEFAULT_API_STUB: &str = "v1";

/// Non-secret settings accepted from the TOML file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    base_url: Option<String>,
    api_stub: Option<String>,
    merchant_id: Option<String>,
    #[serde(default)]
    http: HttpConfig,
}

/// Resolved bridge configuration.
///
/// Constructed once at startup and handed to the transport and operation clients;
/// nothing re-reads the environment afterwards.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Base URL of the rewards API, without trailing slash.
    pub base_url: String,
    /// Path prefix placed before the program id (e.g. `v1`).
    pub api_stub: String,
    /// Merchant identifier sent on balance lookups.
    pub merchant_id: String,
    /// Merchant key/secret pair.
    pub credentials: Credentials,
    /// HTTP client settings.
    pub http: HttpConfig,
}

impl BridgeConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::ConfigError`] if the configuration file cannot be read or
    /// parsed, if the base URL is missing, or if validation fails.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration using `lookup` in place of the process environment.
    ///
    /// # Errors
    ///
    /// Same as [`BridgeConfig::from_env`].
    ///
    /// # Examples
    ///
    /// ```
    /// use rewards_mcp_bridge::config::BridgeConfig;
    ///
    /// let config = BridgeConfig::from_lookup(|name| match name {
    ///     "REWARDS_BASE_URL" => Some("https://rewards.example.com/".to_owned()),
    ///     _ => None,
    /// })
    /// .unwrap();
    ///
    /// assert_eq!(config.base_url, "https://rewards.example.com");
    /// assert_eq!(config.api_stub, "v1");
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = match non_empty(lookup(CONFIG_PATH_VAR)) {
            Some(path) => {
                let text = std::fs::read_to_string(&path).map_err(|e| {
                    BridgeError::ConfigError(format!("cannot read config file '{path}': {e}"))
                })?;
                parse_file(&text)?
            }
            None => FileConfig::default(),
        };

        Self::resolve(file, &lookup)
    }

    /// Loads configuration from TOML text, with secrets and overrides taken from
    /// `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::ConfigError`] if the TOML is malformed, contains unknown
    /// keys (including secrets, which are not accepted from files), or fails validation.
    pub fn from_toml<F>(toml_text: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::resolve(parse_file(toml_text)?, &lookup)
    }

    fn resolve<F>(file: FileConfig, lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = non_empty(lookup(BASE_URL_VAR))
            .or(file.base_url)
            .ok_or_else(|| BridgeError::ConfigError(format!("{BASE_URL_VAR} is not set")))?;

        let api_stub = non_empty(lookup(API_STUB_VAR))
            .or(file.api_stub)
            .unwrap_or_else(|| DEFAULT_API_STUB.to_owned());

        let merchant_id = non_empty(lookup(MERCHANT_ID_VAR)).or(file.merchant_id).unwrap_or_default();

        let credentials = Credentials::new(
            lookup(MERCHANT_KEY_VAR).unwrap_or_default(),
            lookup(MERCHANT_SECRET_VAR).unwrap_or_default(),
        );

        let mut http = file.http;
        if let Some(secs) = parse_secs(lookup(TIMEOUT_VAR), TIMEOUT_VAR)? {
            http.timeout_secs = secs;
        }
        if let Some(secs) = parse_secs(lookup(CONNECT_TIMEOUT_VAR), CONNECT_TIMEOUT_VAR)? {
            http.connect_timeout_secs = secs;
        }

        let config = Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_stub: api_stub.trim().to_owned(),
            merchant_id,
            credentials,
            http,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks that:
    /// - the base URL parses and uses `http` or `https`
    /// - the API stub is a relative path without traversal sequences
    /// - HTTP timeouts are within bounds
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::ConfigError`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            BridgeError::ConfigError(format!("invalid base_url '{}': {e}", self.base_url))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(BridgeError::ConfigError(format!(
                "base_url must use http or https, got: {}",
                url.scheme()
            )));
        }

        if self.api_stub.is_empty() {
            return Err(BridgeError::ConfigError("api_stub must not be empty".to_owned()));
        }
        if self.api_stub.contains("..") || self.api_stub.contains("//") {
            return Err(BridgeError::ConfigError(format!(
                "api_stub contains a traversal sequence: {}",
                self.api_stub
            )));
        }
        if self.api_stub.starts_with('/') || self.api_stub.ends_with('/') {
            return Err(BridgeError::ConfigError(format!(
                "api_stub must not start or end with '/': {}",
                self.api_stub
            )));
        }

        self.http.validate()
    }
}

fn parse_file(text: &str) -> Result<FileConfig> {
    toml::from_str(text)
        .map_err(|e| BridgeError::ConfigError(format!("invalid configuration file: {e}")))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_secs(value: Option<String>, name: &str) -> Result<Option<u64>> {
    non_empty(value)
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .map_err(|e| BridgeError::ConfigError(format!("{name} must be an integer: {e}")))
        })
        .transpose()
}
