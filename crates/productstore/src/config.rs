use std::{env, time::Duration};

use productstore_core::product::PRODUCT_TABLE_NAME;
use productstore_core::storage::PollPolicy;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// DynamoDB table name (default: "activities")
    pub table_name: String,
    /// Custom endpoint URL, e.g. DynamoDB Local (default: none)
    pub aws_endpoint_url: Option<String>,
    /// AWS region (default: "us-east-1")
    pub aws_region: String,
    /// First delay while waiting for a new table, in milliseconds (default: 3,000)
    pub provision_poll_initial_ms: u64,
    /// Upper bound for the table wait delay, in milliseconds (default: 30,000)
    pub provision_poll_max_ms: u64,
    /// Number of table status checks before giving up (default: 20)
    pub provision_max_attempts: u32,
    /// Per-request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,
    /// Health probe timeout in milliseconds (default: 2,000)
    pub health_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DYNAMODB_TABLE_NAME` - Table name (default: "activities")
    /// - `AWS_ENDPOINT_URL` - Custom DynamoDB endpoint (default: none)
    /// - `AWS_REGION` - AWS region (default: "us-east-1")
    /// - `PROVISION_POLL_INITIAL_MS` - First table wait delay (default: 3,000)
    /// - `PROVISION_POLL_MAX_MS` - Maximum table wait delay (default: 30,000)
    /// - `PROVISION_MAX_ATTEMPTS` - Table status checks before giving up (default: 20)
    /// - `REQUEST_TIMEOUT_SECONDS` - Per-request timeout (default: 10)
    /// - `HEALTH_TIMEOUT_MS` - Health probe timeout (default: 2,000)
    pub fn from_env() -> Self {
        Self {
            table_name: env::var("DYNAMODB_TABLE_NAME")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| PRODUCT_TABLE_NAME.to_string()),
            aws_endpoint_url: env::var("AWS_ENDPOINT_URL")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            provision_poll_initial_ms: parse_env("PROVISION_POLL_INITIAL_MS").unwrap_or(3_000),
            provision_poll_max_ms: parse_env("PROVISION_POLL_MAX_MS").unwrap_or(30_000),
            provision_max_attempts: parse_env("PROVISION_MAX_ATTEMPTS")
                .filter(|n| *n > 0)
                .unwrap_or(20),
            request_timeout_seconds: parse_env("REQUEST_TIMEOUT_SECONDS").unwrap_or(10),
            health_timeout_ms: parse_env("HEALTH_TIMEOUT_MS").unwrap_or(2_000),
        }
    }

    /// Backoff schedule for table provisioning.
    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            initial_delay: Duration::from_millis(self.provision_poll_initial_ms),
            max_delay: Duration::from_millis(
                self.provision_poll_max_ms.max(self.provision_poll_initial_ms),
            ),
            max_attempts: self.provision_max_attempts,
        }
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Get the health probe timeout as a Duration.
    pub fn health_timeout(&self) -> Duration {
        Duration::from_millis(self.health_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
