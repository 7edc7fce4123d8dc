//! The builder form: persistence, debounced autosave, validation and advisory
//! feedback, plus the `/api/v1/resume` handlers.

pub mod autosave;
pub mod feedback;
pub mod handlers;
pub mod store;
pub mod validation;

use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::Resume;
use crate::state::AppState;

/// The user's current resume, or 404 when nothing has been saved or drafted.
pub async fn load_existing(state: &AppState, user_id: Uuid) -> Result<Resume, AppError> {
    state
        .autosave
        .load(user_id)
        .await?
        .map(|(resume, _)| resume)
        .ok_or_else(|| AppError::NotFound("No resume saved yet".to_string()))
}

/// The user's current resume, or a fresh form when there is none.
pub async fn load_or_default(state: &AppState, user_id: Uuid) -> Result<Resume, AppError> {
    Ok(state
        .autosave
        .load(user_id)
        .await?
        .map(|(resume, _)| resume)
        .unwrap_or_default())
}
