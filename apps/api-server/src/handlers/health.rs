//! Liveness check reporting which guards are active.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use lumen_shared::ApiResponse;

use crate::state::AppState;

#[derive(Serialize)]
pub struct GuardStatus {
    pub sensitive_fields: usize,
    pub admin_resets: bool,
}

#[derive(Serialize)]
pub struct HealthReport {
    pub version: &'static str,
    pub checked_at: String,
    pub guards: GuardStatus,
}

/// GET /api/health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let report = HealthReport {
        version: env!("CARGO_PKG_VERSION"),
        checked_at: chrono::Utc::now().to_rfc3339(),
        guards: GuardStatus {
            sensitive_fields: state.redactor.config().sensitive_fields.len(),
            admin_resets: state.admin_token.is_some(),
        },
    };

    HttpResponse::Ok().json(ApiResponse::ok(report))
}
