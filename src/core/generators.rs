//! Mock telemetry generators for the dashboard.
//!
//! Every generator returns a freshly allocated collection with uniformly
//! random field values. Nothing here is derived from real traffic, and the
//! series are independent of each other.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::format_origin;

/// Exclusive upper bound for `TrafficSample::traffic`
pub const TRAFFIC_UPPER_BOUND: u32 = 1000;
/// Exclusive upper bound for `TrafficSample::attacks`
pub const ATTACKS_UPPER_BOUND: u32 = 100;
/// Exclusive upper bound for `GeoRegion::value`
pub const GEO_VALUE_UPPER_BOUND: u32 = 1000;
/// Exclusive upper bound for `GeoRegion::blocked`
pub const GEO_BLOCKED_UPPER_BOUND: u32 = 100;
/// Exclusive upper bound for `ServerLoad::load`
pub const LOAD_UPPER_BOUND: u8 = 100;
/// Number of servers in the load-balancing view
pub const SERVER_COUNT: usize = 3;
/// Number of entries in the WAF request log
pub const WAF_LOG_SIZE: usize = 5;
/// Exclusive upper bound for the random octets of a WAF origin
const ORIGIN_OCTET_UPPER_BOUND: u8 = 255;

/// Threat category attached to a traffic sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThreatCategory {
    Low,
    Medium,
    High,
}

impl ThreatCategory {
    pub const ALL: [ThreatCategory; 3] = [Self::Low, Self::Medium, Self::High];
}

impl fmt::Display for ThreatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
        }
    }
}

/// One point of the traffic/attack series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficSample {
    /// Sequence label, `T1`..`Tn`
    pub name: String,
    pub traffic: u32,
    pub attacks: u32,
    pub category: ThreatCategory,
}

/// Geographic region shown in the geo-blocking view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "North America")]
    NorthAmerica,
    Europe,
    Asia,
    #[serde(rename = "South America")]
    SouthAmerica,
    Africa,
    Australia,
}

impl Region {
    pub const ALL: [Region; 6] = [
        Self::NorthAmerica,
        Self::Europe,
        Self::Asia,
        Self::SouthAmerica,
        Self::Africa,
        Self::Australia,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::NorthAmerica => "North America",
            Self::Europe => "Europe",
            Self::Asia => "Asia",
            Self::SouthAmerica => "South America",
            Self::Africa => "Africa",
            Self::Australia => "Australia",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Blocking stats for one region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoRegion {
    pub name: Region,
    pub value: u32,
    pub blocked: u32,
}

/// Load percentage of one server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerLoad {
    /// `Server 1`..`Server 3`
    pub name: String,
    pub load: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 4] = [Self::Get, Self::Post, Self::Put, Self::Delete];
}

/// WAF verdict for a logged request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestStatus {
    Allowed,
    Blocked,
}

/// One entry of the WAF request log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WafRequest {
    /// 1-based position in the log, reset every tick
    pub id: u32,
    #[serde(rename = "type")]
    pub method: HttpMethod,
    pub origin: String,
    pub status: RequestStatus,
}

/// Generate `count` traffic samples labelled `T1`..`Tcount`
pub fn generate_traffic<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<TrafficSample> {
    (0..count)
        .map(|i| TrafficSample {
            name: format!("T{}", i + 1),
            traffic: rng.gen_range(0..TRAFFIC_UPPER_BOUND),
            attacks: rng.gen_range(0..ATTACKS_UPPER_BOUND),
            category: ThreatCategory::ALL[rng.gen_range(0..ThreatCategory::ALL.len())],
        })
        .collect()
}

/// Generate one entry per region, in `Region::ALL` order
pub fn generate_geo<R: Rng + ?Sized>(rng: &mut R) -> Vec<GeoRegion> {
    Region::ALL
        .iter()
        .map(|&name| GeoRegion {
            name,
            value: rng.gen_range(0..GEO_VALUE_UPPER_BOUND),
            blocked: rng.gen_range(0..GEO_BLOCKED_UPPER_BOUND),
        })
        .collect()
}

pub fn generate_server_loads<R: Rng + ?Sized>(rng: &mut R) -> Vec<ServerLoad> {
    (0..SERVER_COUNT)
        .map(|i| ServerLoad {
            name: format!("Server {}", i + 1),
            load: rng.gen_range(0..LOAD_UPPER_BOUND),
        })
        .collect()
}

pub fn generate_waf_requests<R: Rng + ?Sized>(rng: &mut R) -> Vec<WafRequest> {
    (0..WAF_LOG_SIZE)
        .map(|i| WafRequest {
            id: i as u32 + 1,
            method: HttpMethod::ALL[rng.gen_range(0..HttpMethod::ALL.len())],
            origin: format_origin(
                rng.gen_range(0..ORIGIN_OCTET_UPPER_BOUND),
                rng.gen_range(0..ORIGIN_OCTET_UPPER_BOUND),
            ),
            status: if rng.gen_bool(0.5) {
                RequestStatus::Allowed
            } else {
                RequestStatus::Blocked
            },
        })
        .collect()
}

/// Source of mock telemetry consumed by the dashboard
#[cfg_attr(test, mockall::automock)]
pub trait TelemetrySource: Send {
    fn traffic(&mut self, count: usize) -> Vec<TrafficSample>;
    fn geo(&mut self) -> Vec<GeoRegion>;
    fn server_loads(&mut self) -> Vec<ServerLoad>;
    fn waf_requests(&mut self) -> Vec<WafRequest>;
    /// Uniform draw in `[0, 1)` used to decide whether a tick raises an alert
    fn alert_roll(&mut self) -> f64;
}

/// `TelemetrySource` backed by the generator functions
pub struct RandomTelemetry {
    rng: StdRng,
}

impl RandomTelemetry {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible source for tests and benches
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomTelemetry {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetrySource for RandomTelemetry {
    fn traffic(&mut self, count: usize) -> Vec<TrafficSample> {
        generate_traffic(&mut self.rng, count)
    }

    fn geo(&mut self) -> Vec<GeoRegion> {
        generate_geo(&mut self.rng)
    }

    fn server_loads(&mut self) -> Vec<ServerLoad> {
        generate_server_loads(&mut self.rng)
    }

    fn waf_requests(&mut self) -> Vec<WafRequest> {
        generate_waf_requests(&mut self.rng)
    }

    fn alert_roll(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}
