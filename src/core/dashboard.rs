//! Dashboard view model.
//!
//! Holds the four mock telemetry collections, the active alert and the local
//! state behind the dashboard controls. Everything here is synchronous; the
//! scheduler and the API share it behind a mutex and serialize all mutations.
//!
//! None of the controls reach a backend or enforce anything. Applying rules
//! or requesting a report only produces a notice for the UI to show.

use log::{debug, info};
use metrics::increment_counter;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::core::alerts::{AlertEmitter, AlertNotification};
use crate::core::generators::{
    GeoRegion, ServerLoad, TelemetrySource, ThreatCategory, TrafficSample, WafRequest,
};
use crate::models::DashboardConfig;
use crate::utils::snap_to_step;

/// Cloud status badge, always shown as optimal
pub const CLOUD_STATUS: &str = "Optimal";
/// Traffic health score, hardcoded
pub const TRAFFIC_HEALTH_SCORE: u8 = 85;
/// Number of regions listed under "Top Blocked Regions"
pub const TOP_BLOCKED_REGIONS: usize = 3;

pub const IP_BLOCKING_MAX: u32 = 100;
pub const IP_BLOCKING_STEP: u32 = 1;
pub const RATE_LIMITING_MAX: u32 = 1000;
pub const RATE_LIMITING_STEP: u32 = 10;

/// Values of the WAF custom-rule sliders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WafRuleControls {
    /// Requests per minute, `0..=100`
    pub ip_blocking_threshold: u32,
    /// Requests per minute, `0..=1000` in steps of 10
    pub rate_limiting: u32,
}

impl Default for WafRuleControls {
    fn default() -> Self {
        Self {
            ip_blocking_threshold: 50,
            rate_limiting: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    #[default]
    Ddos,
    Waf,
    Traffic,
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ddos => write!(f, "ddos"),
            Self::Waf => write!(f, "waf"),
            Self::Traffic => write!(f, "traffic"),
        }
    }
}

/// Custom report form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub start_date: String,
    pub end_date: String,
    pub report_type: ReportType,
}

/// Partial update of the report form; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportUpdate {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub report_type: Option<ReportType>,
}

/// Message the UI shows after a manual action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub id: Uuid,
    pub message: String,
}

impl Notice {
    fn new(message: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            message,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct ScrubbingState {
    active: bool,
    // bumped on every change so a stale reset timer can tell it was superseded
    generation: u64,
}

/// Indicators the dashboard shows but never computes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusIndicators {
    pub cloud_status: &'static str,
    pub traffic_health_score: u8,
    pub risk_levels: [ThreatCategory; 3],
}

impl Default for StatusIndicators {
    fn default() -> Self {
        Self {
            cloud_status: CLOUD_STATUS,
            traffic_health_score: TRAFFIC_HEALTH_SCORE,
            risk_levels: ThreatCategory::ALL,
        }
    }
}

/// Everything the dashboard renders, as of one moment
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub traffic: Vec<TrafficSample>,
    pub geo: Vec<GeoRegion>,
    pub servers: Vec<ServerLoad>,
    pub waf: Vec<WafRequest>,
    pub alert: Option<AlertNotification>,
    pub controls: WafRuleControls,
    pub scrubbing: bool,
    pub report: ReportRequest,
    pub indicators: StatusIndicators,
    pub refresh_count: u64,
}

/// The dashboard's local state
pub struct Dashboard {
    source: Box<dyn TelemetrySource>,
    traffic_sample_count: usize,
    traffic: Vec<TrafficSample>,
    geo: Vec<GeoRegion>,
    servers: Vec<ServerLoad>,
    waf: Vec<WafRequest>,
    alerts: AlertEmitter,
    controls: WafRuleControls,
    scrubbing: ScrubbingState,
    report: ReportRequest,
    refresh_count: u64,
}

impl Dashboard {
    /// Create the dashboard with an initial set of generated collections
    pub fn new(mut source: Box<dyn TelemetrySource>, config: &DashboardConfig) -> Self {
        let traffic_sample_count = config.traffic_sample_count;
        Self {
            traffic: source.traffic(traffic_sample_count),
            geo: source.geo(),
            servers: source.server_loads(),
            waf: source.waf_requests(),
            source,
            traffic_sample_count,
            alerts: AlertEmitter::new(config.alert_probability),
            controls: WafRuleControls::default(),
            scrubbing: ScrubbingState::default(),
            report: ReportRequest::default(),
            refresh_count: 0,
        }
    }

    /// Run one tick: replace all four collections, then maybe raise an alert.
    ///
    /// Returns `true` if this tick raised a new alert.
    pub fn refresh(&mut self) -> bool {
        self.traffic = self.source.traffic(self.traffic_sample_count);
        self.geo = self.source.geo();
        self.servers = self.source.server_loads();
        self.waf = self.source.waf_requests();
        self.refresh_count += 1;

        let roll = self.source.alert_roll();
        let raised = self.alerts.on_tick(roll);
        increment_counter!("dashboard_refresh_ticks_total");
        if raised {
            increment_counter!("dashboard_alerts_raised_total");
        }
        debug!("Dashboard refresh #{} (alert raised: {})", self.refresh_count, raised);
        raised
    }

    pub fn traffic(&self) -> &[TrafficSample] {
        &self.traffic
    }

    pub fn geo(&self) -> &[GeoRegion] {
        &self.geo
    }

    pub fn server_loads(&self) -> &[ServerLoad] {
        &self.servers
    }

    pub fn waf_requests(&self) -> &[WafRequest] {
        &self.waf
    }

    /// The regions listed under "Top Blocked Regions" (the first entries of
    /// the current geo collection, not a ranking)
    pub fn top_blocked_regions(&self) -> &[GeoRegion] {
        &self.geo[..self.geo.len().min(TOP_BLOCKED_REGIONS)]
    }

    pub fn refresh_count(&self) -> u64 {
        self.refresh_count
    }

    pub fn active_alert(&self) -> Option<&AlertNotification> {
        self.alerts.active()
    }

    /// Raise an alert now, unless one is already active
    pub fn force_alert(&mut self) -> bool {
        let raised = self.alerts.raise();
        if raised {
            increment_counter!("dashboard_alerts_raised_total");
        }
        raised
    }

    pub fn dismiss_alert(&mut self) -> Option<AlertNotification> {
        self.alerts.dismiss()
    }

    /// Regenerate the server loads and nothing else
    pub fn optimize_load_distribution(&mut self) -> &[ServerLoad] {
        self.servers = self.source.server_loads();
        info!("Load distribution optimized");
        increment_counter!("dashboard_manual_actions_total", "action" => "optimize_load");
        &self.servers
    }

    pub fn controls(&self) -> &WafRuleControls {
        &self.controls
    }

    /// Set the IP blocking slider, clamped to its range
    pub fn set_ip_blocking_threshold(&mut self, value: i64) -> u32 {
        self.controls.ip_blocking_threshold = snap_to_step(value, IP_BLOCKING_MAX, IP_BLOCKING_STEP);
        self.controls.ip_blocking_threshold
    }

    /// Set the rate limiting slider, clamped to its range and snapped to its step
    pub fn set_rate_limiting(&mut self, value: i64) -> u32 {
        self.controls.rate_limiting = snap_to_step(value, RATE_LIMITING_MAX, RATE_LIMITING_STEP);
        self.controls.rate_limiting
    }

    pub fn apply_custom_rules(&self) -> Notice {
        increment_counter!("dashboard_manual_actions_total", "action" => "apply_rules");
        let notice = Notice::new(format!(
            "Custom rules applied: IP Blocking Threshold: {}, Rate Limiting: {} req/min",
            self.controls.ip_blocking_threshold, self.controls.rate_limiting
        ));
        info!("{}", notice.message);
        notice
    }

    pub fn is_scrubbing(&self) -> bool {
        self.scrubbing.active
    }

    /// Flip the scrubbing switch, returning the new generation
    pub fn set_scrubbing(&mut self, active: bool) -> u64 {
        self.scrubbing.active = active;
        self.scrubbing.generation += 1;
        self.scrubbing.generation
    }

    /// Start manual scrubbing. The caller arms the reset timer with the
    /// returned generation.
    pub fn begin_scrubbing(&mut self) -> u64 {
        increment_counter!("dashboard_manual_actions_total", "action" => "scrubbing");
        info!("Manual traffic scrubbing initiated");
        self.set_scrubbing(true)
    }

    /// End scrubbing if `generation` is still current.
    ///
    /// Returns `false` when a later change superseded this activation.
    pub fn finish_scrubbing(&mut self, generation: u64) -> bool {
        if self.scrubbing.generation != generation {
            return false;
        }
        self.scrubbing.active = false;
        debug!("Manual traffic scrubbing finished");
        true
    }

    pub fn report(&self) -> &ReportRequest {
        &self.report
    }

    pub fn update_report(&mut self, update: ReportUpdate) -> &ReportRequest {
        if let Some(start_date) = update.start_date {
            self.report.start_date = start_date;
        }
        if let Some(end_date) = update.end_date {
            self.report.end_date = end_date;
        }
        if let Some(report_type) = update.report_type {
            self.report.report_type = report_type;
        }
        &self.report
    }

    pub fn generate_report(&self) -> Notice {
        increment_counter!("dashboard_manual_actions_total", "action" => "report");
        let notice = Notice::new(format!(
            "Generating {} report for {} to {}",
            self.report.report_type, self.report.start_date, self.report.end_date
        ));
        info!("{}", notice.message);
        notice
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            traffic: self.traffic.clone(),
            geo: self.geo.clone(),
            servers: self.servers.clone(),
            waf: self.waf.clone(),
            alert: self.alerts.active().cloned(),
            controls: self.controls.clone(),
            scrubbing: self.scrubbing.active,
            report: self.report.clone(),
            indicators: StatusIndicators::default(),
            refresh_count: self.refresh_count,
        }
    }
}
