//! DDoS Shield dashboard service
//!
//! Backend for the DDoS Shield product demo: a mock telemetry dashboard that
//! regenerates random data on a timer, plus the site's static content and a
//! simulated contact form.

pub mod api;
pub mod config;
pub mod core;
pub mod models;
pub mod utils;
