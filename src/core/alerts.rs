//! Transient threat notifications for the dashboard.
//!
//! At most one alert is active at a time. A tick may raise one with a fixed
//! probability; while one is showing, further raises are ignored until the
//! user dismisses it. Nothing is queued and no history is kept.

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

/// Text of every mock alert
pub const ALERT_MESSAGE: &str = "New potential threat detected!";

/// Alert shown at the top of the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertNotification {
    /// Creation time in milliseconds since the Unix epoch
    pub id: i64,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl AlertNotification {
    fn new(created_at: DateTime<Utc>) -> Self {
        Self {
            id: created_at.timestamp_millis(),
            message: ALERT_MESSAGE.to_string(),
            created_at,
        }
    }
}

/// Holds the single active alert, if any
#[derive(Debug, Clone)]
pub struct AlertEmitter {
    probability: f64,
    active: Option<AlertNotification>,
}

impl AlertEmitter {
    pub fn new(probability: f64) -> Self {
        Self {
            probability,
            active: None,
        }
    }

    pub fn active(&self) -> Option<&AlertNotification> {
        self.active.as_ref()
    }

    /// Called once per tick with a uniform draw in `[0, 1)`.
    ///
    /// Returns `true` if a new alert was raised.
    pub fn on_tick(&mut self, roll: f64) -> bool {
        if roll < self.probability {
            self.raise()
        } else {
            false
        }
    }

    /// Raise an alert unless one is already active
    pub fn raise(&mut self) -> bool {
        if self.active.is_some() {
            return false;
        }
        let alert = AlertNotification::new(Utc::now());
        info!("Alert raised: {} (id {})", alert.message, alert.id);
        self.active = Some(alert);
        true
    }

    /// Clear the active alert, returning it
    pub fn dismiss(&mut self) -> Option<AlertNotification> {
        let dismissed = self.active.take();
        if let Some(alert) = &dismissed {
            info!("Alert {} dismissed", alert.id);
        }
        dismissed
    }
}
