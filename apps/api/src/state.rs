use std::sync::Arc;

use crate::auth::provider::AuthProvider;
use crate::auth::TokenVerifier;
use crate::generation::ContentGenerator;
use crate::render::export::ExportArchive;
use crate::resume::autosave::Autosaver;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Front door to the resume store; every write goes through it.
    pub autosave: Autosaver,
    /// Pluggable content backend. Chosen by GENERATION_BACKEND.
    pub generator: Arc<dyn ContentGenerator>,
    pub tokens: TokenVerifier,
    /// Unset when AUTH_URL / AUTH_API_KEY are not configured.
    pub auth: Option<AuthProvider>,
    pub exports: Option<ExportArchive>,
}
