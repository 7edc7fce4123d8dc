//! Axum route handlers for AI content.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use tracing::{error, info};

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::generation::sample::sample_resume;
use crate::generation::{
    apply_content, request_for_resume, ApplyRequest, GenerateRequest, GeneratedContent,
    GenerationError, GenerationInput,
};
use crate::models::resume::Resume;
use crate::resume::load_or_default;
use crate::state::AppState;

/// Shown instead of backend failures on the flat endpoint.
pub const GENERATION_FAILED: &str = "There was an error generating AI content.";

#[derive(Debug, Serialize)]
pub struct GenerateApplyResponse {
    pub content: GeneratedContent,
    pub resume: Resume,
}

async fn generate(
    state: &AppState,
    request: &GenerateRequest,
) -> Result<GeneratedContent, GenerationError> {
    let input = GenerationInput::from_request(request)?;
    let content = state.generator.generate(&input).await?;
    info!(
        "Generated {:?} via {} backend",
        input.section,
        state.generator.backend()
    );
    Ok(content)
}

/// Flat `{error}` body for the browser-facing endpoint.
fn flat_error(e: GenerationError) -> (StatusCode, Json<serde_json::Value>) {
    match e {
        GenerationError::MissingInput(msg)
        | GenerationError::Unsupported(msg)
        | GenerationError::Rejected(msg) => {
            (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "error": msg })))
        }
        other => {
            error!("Content generation failed: {other}");
            (StatusCode::BAD_GATEWAY, Json(json!({ "error": GENERATION_FAILED })))
        }
    }
}

/// POST /api/generate
///
/// `{section, jobTitle}` in; exactly one of `{summary}`, `{skills}`,
/// `{description}` or `{error}` out.
pub async fn handle_generate(
    State(state): State<AppState>,
    _user: AuthUser,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Response {
    // Unreadable bodies get the same flat shape as every other outcome here.
    let Json(request) = match payload {
        Ok(request) => request,
        Err(rejection) => {
            info!("Rejected generate request: {}", rejection.body_text());
            return (rejection.status(), Json(json!({ "error": rejection.body_text() })))
                .into_response();
        }
    };
    match generate(&state, &request).await {
        Ok(content) => Json(content).into_response(),
        Err(e) => flat_error(e).into_response(),
    }
}

/// POST /api/v1/resume/generate
///
/// Generates content from the user's own resume and writes it into the form.
pub async fn handle_generate_into_resume(
    State(state): State<AppState>,
    user: AuthUser,
    Json(apply): Json<ApplyRequest>,
) -> Result<Json<GenerateApplyResponse>, AppError> {
    let mut resume = load_or_default(&state, user.id).await?;
    let request = request_for_resume(&resume, &apply);
    let content = generate(&state, &request).await?;

    let index = apply.index.unwrap_or(0);
    if !apply_content(&mut resume, content.clone(), index) {
        return Err(AppError::NotFound(format!(
            "Work experience entry {index} not found"
        )));
    }

    state.autosave.schedule(user.id, resume.clone()).await;
    Ok(Json(GenerateApplyResponse { content, resume }))
}

/// POST /api/v1/resume/autofill
///
/// Replaces the whole form with the built-in example resume.
pub async fn handle_autofill(
    State(state): State<AppState>,
    user: AuthUser,
) -> Json<Resume> {
    let resume = sample_resume();
    state.autosave.schedule(user.id, resume.clone()).await;
    info!("Auto-filled resume for user {}", user.id);
    Json(resume)
}
