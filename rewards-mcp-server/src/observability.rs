//! Observability infrastructure for the rewards MCP server.
//!
//! Provides structured logging and the startup health report. Logs always go to
//! stderr: stdout carries the MCP protocol stream.

use std::io;

use rewards_mcp_bridge::BridgeConfig;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Environment variable selecting the log format.
pub const LOG_FORMAT_VAR: &str = "LOG_FORMAT";

/// Log format configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty format for development.
    Pretty,
    /// JSON format for production log aggregation.
    Json,
}

impl LogFormat {
    /// Determines log format from the `LOG_FORMAT` environment variable.
    #[must_use]
    pub fn from_env() -> Self {
        Self::parse(std::env::var(LOG_FORMAT_VAR).ok().as_deref())
    }

    /// Maps a `LOG_FORMAT` value to a format: `json` selects JSON, anything else pretty.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Initializes structured logging on stderr.
///
/// # Environment Variables
///
/// - `LOG_FORMAT`: `json` or `pretty` (default: `pretty`)
/// - `RUST_LOG`: Log level filter (default: `info`)
pub fn init_observability(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => {
            subscriber
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_ansi(false)
                        .with_span_events(FmtSpan::CLOSE)
                        .with_writer(io::stderr),
                )
                .init();
        }
        LogFormat::Json => {
            subscriber
                .with(
                    fmt::layer()
                        .json()
                        .with_current_span(true)
                        .with_span_list(true)
                        .with_target(true)
                        .with_span_events(FmtSpan::CLOSE)
                        .with_writer(io::stderr),
                )
                .init();
        }
    }
}

/// Overall health status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Every check passed.
    Healthy,
    /// Operational, but at least one check warned.
    Degraded,
    /// At least one check failed.
    Unhealthy,
}

/// Status of an individual check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthCheckStatus {
    /// Check passed.
    Pass,
    /// Check failed.
    Fail,
    /// Degraded but operational.
    Warn,
}

/// Individual health check result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    /// Check name.
    pub name: &'static str,
    /// Check status.
    pub status: HealthCheckStatus,
    /// Details.
    pub message: String,
}

impl HealthCheck {
    fn new(name: &'static str, status: HealthCheckStatus, message: impl Into<String>) -> Self {
        Self { name, status, message: message.into() }
    }
}

/// Startup health report derived from configuration.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    /// Overall status.
    pub status: HealthStatus,
    /// Server version.
    pub version: &'static str,
    /// Individual checks.
    pub checks: Vec<HealthCheck>,
}

impl HealthReport {
    /// Runs the configuration checks.
    ///
    /// Missing credentials or merchant id only warn: requests still go out, and the
    /// upstream answers with its own authorization error.
    #[must_use]
    pub fn from_config(config: &BridgeConfig) -> Self {
        let credentials = if config.credentials.is_complete() {
            HealthCheck::new("credentials", HealthCheckStatus::Pass, "merchant key and secret loaded")
        } else {
            HealthCheck::new(
                "credentials",
                HealthCheckStatus::Warn,
                "MERCHANT_KEY or MERCHANT_SECRET missing; requests are sent unauthenticated",
            )
        };

        let merchant_id = if config.merchant_id.is_empty() {
            HealthCheck::new(
                "merchant_id",
                HealthCheckStatus::Warn,
                "MERCHANT_ID missing; balance requests carry an empty merchant header",
            )
        } else {
            HealthCheck::new("merchant_id", HealthCheckStatus::Pass, "merchant id configured")
        };

        let base_url = match config.validate() {
            Ok(()) => HealthCheck::new("base_url", HealthCheckStatus::Pass, config.base_url.clone()),
            Err(e) => HealthCheck::new("base_url", HealthCheckStatus::Fail, e.to_string()),
        };

        let checks = vec![credentials, merchant_id, base_url];
        Self { status: Self::compute_status(&checks), version: env!("CARGO_PKG_VERSION"), checks }
    }

    /// Determines overall health status from individual checks.
    #[must_use]
    pub fn compute_status(checks: &[HealthCheck]) -> HealthStatus {
        if checks.iter().any(|c| c.status == HealthCheckStatus::Fail) {
            HealthStatus::Unhealthy
        } else if checks.iter().any(|c| c.status == HealthCheckStatus::Warn) {
            HealthStatus::Degraded
        } else {
            HealthStatus::Healthy
        }
    }

    /// Serializes the report as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns error if JSON serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Logs every check, warning on those that did not pass.
    pub fn log(&self) {
        for check in &self.checks {
            match check.status {
                HealthCheckStatus::Pass => info!(check = check.name, message = %check.message, "health check passed"),
                HealthCheckStatus::Warn | HealthCheckStatus::Fail => {
                    warn!(check = check.name, status = ?check.status, message = %check.message, "health check did not pass");
                }
            }
        }
        info!(status = ?self.status, version = self.version, "startup health report");
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(pairs: &[(&str, &str)]) -> BridgeConfig {
        let vars: HashMap<String, String> =
            pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
        BridgeConfig::from_lookup(|name| vars.get(name).cloned()).unwrap()
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse(None), LogFormat::Pretty);
        assert_eq!(LogFormat::parse(Some("json")), LogFormat::Json);
        assert_eq!(LogFormat::parse(Some("JSON ")), LogFormat::Json);
        assert_eq!(LogFormat::parse(Some("pretty")), LogFormat::Pretty);
        assert_eq!(LogFormat::parse(Some("unknown")), LogFormat::Pretty);
    }

    #[test]
    fn test_health_report_healthy() {
        let report = HealthReport::from_config(&config(&[
            ("REWARDS_BASE_URL", "https://rewards.example.com"),
            ("MERCHANT_KEY", "key"),
            ("MERCHANT_SECRET", "secret"),
            ("MERCHANT_ID", "m-1"),
        ]));

        assert_eq!(report.status, HealthStatus::Healthy);
        assert!(report.checks.iter().all(|c| c.status == HealthCheckStatus::Pass));
    }

    #[test]
    fn test_health_report_missing_credentials_degrades() {
        let report = HealthReport::from_config(&config(&[("REWARDS_BASE_URL", "https://rewards.example.com")]));

        assert_eq!(report.status, HealthStatus::Degraded);
        assert_eq!(report.checks[0].status, HealthCheckStatus::Warn);
        assert_eq!(report.checks[1].status, HealthCheckStatus::Warn);
    }

    #[test]
    fn test_health_report_bad_base_url_fails() {
        let mut config = config(&[
            ("REWARDS_BASE_URL", "https://rewards.example.com"),
            ("MERCHANT_KEY", "key"),
            ("MERCHANT_SECRET", "secret"),
            ("MERCHANT_ID", "m-1"),
        ]);
        config.base_url = "ftp://rewards.example.com".to_owned();
        let report = HealthReport::from_config(&config);

        assert_eq!(report.status, HealthStatus::Unhealthy);
        assert_eq!(report.checks[2].status, HealthCheckStatus::Fail);
    }

    #[test]
    fn test_health_report_never_contains_secret() {
        let report = HealthReport::from_config(&config(&[
            ("REWARDS_BASE_URL", "https://rewards.example.com"),
            ("MERCHANT_KEY", "key"),
            ("MERCHANT_SECRET", "super-secret-value"),
        ]));

        let json = report.to_json().unwrap();
        assert!(!json.contains("super-secret-value"));
        assert!(json.contains("\"status\": \"degraded\""));
        assert!(json.contains("\"name\": \"merchant_id\""));
    }

    #[test]
    fn test_health_status_compute_empty() {
        assert_eq!(HealthReport::compute_status(&[]), HealthStatus::Healthy);
    }
}
