use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::resume::{Resume, ResumeRecord, Section};
use crate::render::export::{ExportDocument, ExportFormat};
use crate::render::{render_html, TemplateKind};
use crate::resume::autosave::ResumeSource;
use crate::resume::feedback::{compute_feedback, digest};
use crate::resume::validation::{validate_resume, ValidationReport};
use crate::resume::{load_existing, load_or_default};
use crate::state::AppState;

#[derive(Serialize)]
pub struct ResumeResponse {
    pub resume: Resume,
    pub source: ResumeSource,
}

#[derive(Serialize)]
pub struct DraftAccepted {
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct FeedbackResponse {
    pub feedback: Vec<String>,
}

#[derive(Serialize)]
pub struct DigestResponse {
    pub summary: String,
}

#[derive(Deserialize)]
pub struct TemplateQuery {
    pub template: Option<String>,
}

#[derive(Deserialize)]
pub struct ExportQuery {
    pub template: Option<String>,
    pub format: Option<String>,
}

fn parse_section(name: &str) -> Result<Section, AppError> {
    Section::parse(name).ok_or_else(|| AppError::Validation(format!("Unknown section '{name}'")))
}

/// GET /api/v1/resume
pub async fn handle_get_resume(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ResumeResponse>, AppError> {
    let (resume, source) = state
        .autosave
        .load(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("No resume saved yet".to_string()))?;
    debug!(
        "Loaded {source:?} resume for {} ({})",
        user.id,
        user.email.as_deref().unwrap_or("no email")
    );
    Ok(Json(ResumeResponse { resume, source }))
}

/// PUT /api/v1/resume
///
/// Explicit save. Supersedes any pending draft.
pub async fn handle_save_resume(
    State(state): State<AppState>,
    user: AuthUser,
    Json(resume): Json<Resume>,
) -> Result<Json<ResumeRecord>, AppError> {
    let record = state.autosave.save_now(user.id, &resume).await?;
    Ok(Json(record))
}

/// PUT /api/v1/resume/draft
///
/// Debounced autosave. The draft is visible to reads immediately.
pub async fn handle_save_draft(
    State(state): State<AppState>,
    user: AuthUser,
    Json(resume): Json<Resume>,
) -> impl IntoResponse {
    state.autosave.schedule(user.id, resume).await;
    (StatusCode::ACCEPTED, Json(DraftAccepted { status: "scheduled" }))
}

/// POST /api/v1/resume/validate
pub async fn handle_validate(
    _user: AuthUser,
    Json(resume): Json<Resume>,
) -> Json<ValidationReport> {
    Json(validate_resume(&resume))
}

/// GET /api/v1/resume/feedback
pub async fn handle_feedback(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<FeedbackResponse>, AppError> {
    let resume = load_existing(&state, user.id).await?;
    Ok(Json(FeedbackResponse {
        feedback: compute_feedback(&resume),
    }))
}

/// GET /api/v1/resume/digest
pub async fn handle_digest(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<DigestResponse>, AppError> {
    let resume = load_existing(&state, user.id).await?;
    Ok(Json(DigestResponse {
        summary: digest(&resume),
    }))
}

/// POST /api/v1/resume/sections/:section
pub async fn handle_add_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(section): Path<String>,
) -> Result<Json<Resume>, AppError> {
    let section = parse_section(&section)?;
    let mut resume = load_or_default(&state, user.id).await?;
    resume.add_item(section);
    state.autosave.schedule(user.id, resume.clone()).await;
    Ok(Json(resume))
}

/// DELETE /api/v1/resume/sections/:section/:index
///
/// Removing the last item of a section, or an index past the end, is a no-op.
pub async fn handle_remove_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path((section, index)): Path<(String, usize)>,
) -> Result<Json<Resume>, AppError> {
    let section = parse_section(&section)?;
    let mut resume = load_or_default(&state, user.id).await?;
    if resume.remove_item(section, index) {
        state.autosave.schedule(user.id, resume.clone()).await;
    }
    Ok(Json(resume))
}

/// GET /api/v1/resume/preview?template=
pub async fn handle_preview(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<TemplateQuery>,
) -> Result<Html<String>, AppError> {
    let resume = load_existing(&state, user.id).await?;
    let template = TemplateKind::from_name(query.template.as_deref());
    Ok(Html(render_html(&resume, template)?))
}

/// GET /api/v1/resume/export?template=&format=
///
/// Returns the document as a download. Archiving is best effort.
pub async fn handle_export(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let format = ExportFormat::parse(query.format.as_deref()).ok_or_else(|| {
        AppError::Validation("format must be html or markdown".to_string())
    })?;
    let template = TemplateKind::from_name(query.template.as_deref());

    let resume = load_existing(&state, user.id).await?;
    let document = ExportDocument::render(&resume, template, format)?;

    if let Some(archive) = &state.exports {
        if let Err(e) = archive.store(user.id, &document).await {
            warn!("Export archive failed for user {}: {e:?}", user.id);
        }
    }

    info!(
        "Exported {} resume ({}) for user {}",
        template.name(),
        format.extension(),
        user.id
    );

    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, document.content_disposition()),
        ],
        document.body,
    ))
}
