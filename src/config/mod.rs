//! Configuration management for the dashboard service.
//!
//! This module handles loading and managing application configuration
//! from an optional configuration file and environment variables.

use std::env;
use config::{Config as ConfigBuilder, ConfigError, Environment, File};

pub use crate::models::{Config, ContactConfig, DashboardConfig, MetricsConfig, ServerConfig};

/// Prefix for environment overrides, e.g. `SHIELD__SERVER__PORT=9090`
pub const ENV_PREFIX: &str = "SHIELD";

/// Load configuration from the file named by `CONFIG_FILE` and the environment
pub fn load_config() -> Result<Config, ConfigError> {
    let config_file = env::var("CONFIG_FILE").unwrap_or_else(|_| "config/default.toml".to_string());
    load_config_from(&config_file)
}

/// Load configuration from a specific file; a missing file falls back to defaults
pub fn load_config_from(config_file: &str) -> Result<Config, ConfigError> {
    let defaults = Config::default();

    let config = ConfigBuilder::builder()
        .set_default("server.host", defaults.server.host)?
        .set_default("server.port", defaults.server.port as i64)?
        .set_default("dashboard.refresh_interval_ms", defaults.dashboard.refresh_interval_ms as i64)?
        .set_default("dashboard.alert_probability", defaults.dashboard.alert_probability)?
        .set_default("dashboard.traffic_sample_count", defaults.dashboard.traffic_sample_count as i64)?
        .set_default("dashboard.scrubbing_duration_ms", defaults.dashboard.scrubbing_duration_ms as i64)?
        .set_default("contact.submit_delay_ms", defaults.contact.submit_delay_ms as i64)?
        .set_default("metrics.enabled", defaults.metrics.enabled)?
        .add_source(File::with_name(config_file).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_env_overrides() {
        let config = load_config_from("does/not/exist.toml").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.dashboard.refresh_interval_ms, 5_000);
        assert_eq!(config.dashboard.traffic_sample_count, 20);
        assert!((config.dashboard.alert_probability - 0.3).abs() < f64::EPSILON);
        assert!(config.metrics.enabled);

        env::set_var("SHIELD__SERVER__PORT", "9090");
        env::set_var("SHIELD__DASHBOARD__REFRESH_INTERVAL_MS", "250");
        let config = load_config_from("does/not/exist.toml").unwrap();
        env::remove_var("SHIELD__SERVER__PORT");
        env::remove_var("SHIELD__DASHBOARD__REFRESH_INTERVAL_MS");

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.dashboard.refresh_interval_ms, 250);
        assert_eq!(config.contact.submit_delay_ms, 2_000);
    }
}
