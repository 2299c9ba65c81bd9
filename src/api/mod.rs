//! API endpoints for the dashboard service.
//!
//! This module exposes the mounted dashboard, its manual controls, the
//! contact form and the static site content over HTTP.

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core::contact::{ContactError, ContactForm, ContactSession, SubmitStatus};
use crate::core::content::site_content;
use crate::core::{DashboardRuntime, ReportUpdate};
use crate::models::Config;

pub struct ApiState {
    pub runtime: Arc<DashboardRuntime>,
    pub config: Arc<Config>,
    pub metrics: Option<PrometheusHandle>,
}

impl ApiState {
    pub fn new(runtime: Arc<DashboardRuntime>, config: Arc<Config>, metrics: Option<PrometheusHandle>) -> Self {
        Self { runtime, config, metrics }
    }
}

/// API configuration function for Actix-web
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/metrics").route(web::get().to(render_metrics)))
        .service(
            web::scope("/api/v1")
                .service(web::resource("/health").route(web::get().to(health_check)))
                .service(web::resource("/content").route(web::get().to(get_content)))
                .service(web::resource("/contact").route(web::post().to(submit_contact)))
                .service(
                    web::scope("/dashboard")
                        .service(web::resource("").route(web::get().to(get_dashboard)))
                        .service(web::resource("/traffic").route(web::get().to(get_traffic)))
                        .service(web::resource("/geo").route(web::get().to(get_geo)))
                        .service(web::resource("/geo/top-blocked").route(web::get().to(get_top_blocked)))
                        .service(web::resource("/servers").route(web::get().to(get_servers)))
                        .service(web::resource("/waf").route(web::get().to(get_waf)))
                        .service(web::resource("/alert").route(web::post().to(force_alert)))
                        .service(web::resource("/alert/dismiss").route(web::post().to(dismiss_alert)))
                        .service(
                            web::resource("/load-balancing/optimize")
                                .route(web::post().to(optimize_load_distribution)),
                        )
                        .service(web::resource("/waf/rules").route(web::put().to(update_waf_rules)))
                        .service(web::resource("/waf/rules/apply").route(web::post().to(apply_custom_rules)))
                        .service(
                            web::resource("/scrubbing")
                                .route(web::post().to(initiate_scrubbing))
                                .route(web::put().to(set_scrubbing)),
                        )
                        .service(
                            web::resource("/reports")
                                .route(web::put().to(update_report))
                                .route(web::post().to(generate_report)),
                        ),
                ),
        );
}

/// Health check endpoint response
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    refreshing: bool,
}

/// Slider update; absent fields are left untouched
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct WafRulesUpdate {
    pub ip_blocking_threshold: Option<i64>,
    pub rate_limiting: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScrubbingRequest {
    pub active: bool,
}

#[derive(Serialize)]
struct ScrubbingResponse {
    active: bool,
}

#[derive(Serialize)]
struct ForceAlertResponse<'a> {
    raised: bool,
    alert: Option<&'a crate::core::AlertNotification>,
}

/// Contact submission response
#[derive(Debug, Serialize, Deserialize)]
pub struct ContactResponse {
    pub status: SubmitStatus,
    pub form: ContactForm,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}

/// Health check endpoint
async fn health_check(state: web::Data<ApiState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        refreshing: state.runtime.is_refreshing(),
    })
}

async fn render_metrics(state: web::Data<ApiState>) -> impl Responder {
    match &state.metrics {
        Some(handle) => HttpResponse::Ok()
            .content_type("text/plain; version=0.0.4")
            .body(handle.render()),
        None => HttpResponse::NotFound().finish(),
    }
}

async fn get_content() -> impl Responder {
    HttpResponse::Ok().json(site_content())
}

async fn get_dashboard(state: web::Data<ApiState>) -> impl Responder {
    let dashboard = state.runtime.dashboard();
    let snapshot = dashboard.lock().await.snapshot();
    HttpResponse::Ok().json(snapshot)
}

async fn get_traffic(state: web::Data<ApiState>) -> impl Responder {
    let dashboard = state.runtime.dashboard();
    let dashboard = dashboard.lock().await;
    HttpResponse::Ok().json(dashboard.traffic())
}

async fn get_geo(state: web::Data<ApiState>) -> impl Responder {
    let dashboard = state.runtime.dashboard();
    let dashboard = dashboard.lock().await;
    HttpResponse::Ok().json(dashboard.geo())
}

async fn get_top_blocked(state: web::Data<ApiState>) -> impl Responder {
    let dashboard = state.runtime.dashboard();
    let dashboard = dashboard.lock().await;
    HttpResponse::Ok().json(dashboard.top_blocked_regions())
}

async fn get_servers(state: web::Data<ApiState>) -> impl Responder {
    let dashboard = state.runtime.dashboard();
    let dashboard = dashboard.lock().await;
    HttpResponse::Ok().json(dashboard.server_loads())
}

async fn get_waf(state: web::Data<ApiState>) -> impl Responder {
    let dashboard = state.runtime.dashboard();
    let dashboard = dashboard.lock().await;
    HttpResponse::Ok().json(dashboard.waf_requests())
}

async fn force_alert(state: web::Data<ApiState>) -> impl Responder {
    let dashboard = state.runtime.dashboard();
    let mut dashboard = dashboard.lock().await;
    let raised = dashboard.force_alert();
    HttpResponse::Ok().json(ForceAlertResponse {
        raised,
        alert: dashboard.active_alert(),
    })
}

async fn dismiss_alert(state: web::Data<ApiState>) -> impl Responder {
    let dashboard = state.runtime.dashboard();
    let dismissed = dashboard.lock().await.dismiss_alert();
    HttpResponse::Ok().json(dismissed)
}

async fn optimize_load_distribution(state: web::Data<ApiState>) -> impl Responder {
    let dashboard = state.runtime.dashboard();
    let mut dashboard = dashboard.lock().await;
    HttpResponse::Ok().json(dashboard.optimize_load_distribution())
}

async fn update_waf_rules(
    state: web::Data<ApiState>,
    req: web::Json<WafRulesUpdate>,
) -> impl Responder {
    let dashboard = state.runtime.dashboard();
    let mut dashboard = dashboard.lock().await;
    if let Some(threshold) = req.ip_blocking_threshold {
        dashboard.set_ip_blocking_threshold(threshold);
    }
    if let Some(rate) = req.rate_limiting {
        dashboard.set_rate_limiting(rate);
    }
    HttpResponse::Ok().json(dashboard.controls())
}

async fn apply_custom_rules(state: web::Data<ApiState>) -> impl Responder {
    let dashboard = state.runtime.dashboard();
    let notice = dashboard.lock().await.apply_custom_rules();
    HttpResponse::Ok().json(notice)
}

async fn initiate_scrubbing(state: web::Data<ApiState>) -> impl Responder {
    state.runtime.initiate_manual_scrubbing().await;
    HttpResponse::Ok().json(ScrubbingResponse { active: true })
}

async fn set_scrubbing(
    state: web::Data<ApiState>,
    req: web::Json<ScrubbingRequest>,
) -> impl Responder {
    state.runtime.set_scrubbing(req.active).await;
    HttpResponse::Ok().json(ScrubbingResponse { active: req.active })
}

async fn update_report(
    state: web::Data<ApiState>,
    req: web::Json<ReportUpdate>,
) -> impl Responder {
    let dashboard = state.runtime.dashboard();
    let mut dashboard = dashboard.lock().await;
    HttpResponse::Ok().json(dashboard.update_report(req.into_inner()))
}

async fn generate_report(state: web::Data<ApiState>) -> impl Responder {
    let dashboard = state.runtime.dashboard();
    let notice = dashboard.lock().await.generate_report();
    HttpResponse::Ok().json(notice)
}

/// Contact form endpoint
async fn submit_contact(
    state: web::Data<ApiState>,
    form: web::Json<ContactForm>,
) -> Result<HttpResponse, ContactError> {
    let mut session = ContactSession::with_form(state.config.contact.submit_delay(), form.into_inner());
    let status = session.submit().await?;
    Ok(HttpResponse::Ok().json(ContactResponse {
        status,
        form: session.form().clone(),
    }))
}
