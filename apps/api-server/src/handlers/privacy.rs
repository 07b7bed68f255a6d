//! PII redaction endpoints.

use actix_web::{HttpResponse, web};
use serde_json::Value;

use lumen_core::domain::PromptIdentity;
use lumen_shared::ApiResponse;
use lumen_shared::dto::{SanitizePromptRequest, SanitizePromptResponse, SanitizeStructureResponse};

use crate::state::AppState;

/// Redact values under sensitive keys anywhere in a JSON document.
///
/// POST /api/privacy/sanitize
pub async fn sanitize_structure(
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> HttpResponse {
    let document = state.redactor.sanitize_structure(&body);
    HttpResponse::Ok().json(ApiResponse::ok(SanitizeStructureResponse { document }))
}

/// Scrub identity strings and name-like phrases from a prompt.
///
/// POST /api/privacy/prompt
pub async fn sanitize_prompt(
    state: web::Data<AppState>,
    body: web::Json<SanitizePromptRequest>,
) -> HttpResponse {
    let request = body.into_inner();
    let identity = request.identity.map(|identity| PromptIdentity {
        full_name: identity.full_name,
        email: identity.email,
    });

    let prompt = state
        .redactor
        .sanitize_prompt_text(request.prompt.as_deref(), identity.as_ref());

    HttpResponse::Ok().json(ApiResponse::ok(SanitizePromptResponse { prompt }))
}
