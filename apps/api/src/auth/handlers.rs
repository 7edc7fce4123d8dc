use axum::{extract::State, Json};
use serde_json::Value;
use tracing::info;

use crate::auth::provider::{AuthProvider, Credentials};
use crate::errors::AppError;
use crate::resume::validation::is_valid_email;
use crate::state::AppState;

fn provider(state: &AppState) -> Result<&AuthProvider, AppError> {
    state
        .auth
        .as_ref()
        .ok_or_else(|| AppError::ServiceUnavailable("Sign up and sign in are not configured".into()))
}

fn check_credentials(credentials: &Credentials) -> Result<(), AppError> {
    if !is_valid_email(&credentials.email) {
        return Err(AppError::Validation("Invalid email address".into()));
    }
    if credentials.password.is_empty() {
        return Err(AppError::Validation("Password is required".into()));
    }
    Ok(())
}

/// POST /api/v1/auth/signup
pub async fn handle_signup(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<Value>, AppError> {
    check_credentials(&credentials)?;
    let body = provider(&state)?.sign_up(&credentials).await?;
    info!("Sign up forwarded for {}", credentials.email);
    Ok(Json(body))
}

/// POST /api/v1/auth/signin
pub async fn handle_signin(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<Value>, AppError> {
    check_credentials(&credentials)?;
    let session = provider(&state)?.sign_in(&credentials).await?;
    Ok(Json(session))
}
