use axum::Json;
use serde_json::{json, Value};

use crate::render::TemplateKind;

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "cvforge-api"
    }))
}

/// GET /api/v1/templates
pub async fn templates_handler() -> Json<Value> {
    let names: Vec<&str> = TemplateKind::ALL.iter().map(|t| t.name()).collect();
    Json(json!({
        "templates": names,
        "default": TemplateKind::default().name()
    }))
}
