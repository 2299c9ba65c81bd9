//! Core functionality for the dashboard service.
//!
//! This module contains the mock telemetry generators, the alert emitter,
//! the dashboard view model and its refresh scheduler, plus the contact
//! form and static site content.

pub mod generators;
pub mod alerts;
pub mod dashboard;
pub mod scheduler;
pub mod contact;
pub mod content;

pub use generators::{RandomTelemetry, TelemetrySource};
pub use alerts::{AlertEmitter, AlertNotification};
pub use dashboard::{Dashboard, DashboardSnapshot, Notice, ReportUpdate};
pub use scheduler::{DashboardRuntime, RefreshScheduler, SharedDashboard};
pub use contact::{ContactError, ContactForm, ContactSession, SubmitStatus};
