use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
}

/// Dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Refresh interval in milliseconds
    pub refresh_interval_ms: u64,
    /// Chance that a tick raises an alert (0.0 - 1.0)
    pub alert_probability: f64,
    /// Number of traffic samples per tick
    pub traffic_sample_count: usize,
    /// How long manual scrubbing stays active, in milliseconds
    pub scrubbing_duration_ms: u64,
}

impl DashboardConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    pub fn scrubbing_duration(&self) -> Duration {
        Duration::from_millis(self.scrubbing_duration_ms)
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: 5_000,
            alert_probability: 0.3,
            traffic_sample_count: 20,
            scrubbing_duration_ms: 3_000,
        }
    }
}

/// Contact form configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactConfig {
    /// Simulated submission delay in milliseconds
    pub submit_delay_ms: u64,
}

impl ContactConfig {
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self { submit_delay_ms: 2_000 }
    }
}

/// Metrics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Whether to expose the Prometheus endpoint
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Dashboard configuration
    pub dashboard: DashboardConfig,
    /// Contact form configuration
    pub contact: ContactConfig,
    /// Metrics configuration
    pub metrics: MetricsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            dashboard: DashboardConfig::default(),
            contact: ContactConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_durations() {
        let config = Config::default();
        assert_eq!(config.dashboard.refresh_interval(), Duration::from_secs(5));
        assert_eq!(config.dashboard.scrubbing_duration(), Duration::from_secs(3));
        assert_eq!(config.contact.submit_delay(), Duration::from_secs(2));
        assert_eq!(config.dashboard.traffic_sample_count, 20);
    }
}
