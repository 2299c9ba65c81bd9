//! DDoS Shield dashboard service
//!
//! This is the main entry point for the dashboard service.
//! It mounts the mock telemetry dashboard and starts the web server.

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use dotenv::dotenv;
use log::info;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::sync::Arc;

use ddos_shield_dashboard::api::{self, ApiState};
use ddos_shield_dashboard::config;
use ddos_shield_dashboard::core::{Dashboard, DashboardRuntime, RandomTelemetry};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    env_logger::init();

    info!("Starting DDoS Shield dashboard service...");

    let config = config::load_config().context("Failed to load configuration")?;
    let config = Arc::new(config);

    let metrics = if config.metrics.enabled {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("Failed to install Prometheus recorder")?;
        Some(handle)
    } else {
        None
    };

    // Mount the dashboard; its timers live until the server stops
    let dashboard = Dashboard::new(Box::new(RandomTelemetry::new()), &config.dashboard);
    let runtime = Arc::new(DashboardRuntime::mount(dashboard, &config.dashboard));

    let state = web::Data::new(ApiState::new(runtime.clone(), config.clone(), metrics));

    info!("Listening on {}:{}", config.server.host, config.server.port);
    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::config)
    })
    .bind((config.server.host.as_str(), config.server.port))
    .context("Failed to bind HTTP server")?
    .run();

    let result = server.await;

    runtime.unmount().await;

    result.context("HTTP server failed")
}
