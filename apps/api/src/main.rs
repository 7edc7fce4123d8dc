mod auth;
mod config;
mod db;
mod errors;
mod generation;
mod llm_client;
mod models;
mod render;
mod resume;
mod routes;
mod state;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::auth::provider::AuthProvider;
use crate::auth::TokenVerifier;
use crate::config::{Config, GenerationBackend, S3Config};
use crate::db::create_pool;
use crate::generation::llm::LlmGenerator;
use crate::generation::remote::RemoteGenerator;
use crate::generation::templates::TemplateGenerator;
use crate::generation::ContentGenerator;
use crate::llm_client::LlmClient;
use crate::render::export::ExportArchive;
use crate::resume::autosave::Autosaver;
use crate::resume::store::{MemoryResumeStore, PgResumeStore, ResumeStore};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing or inconsistent env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CVForge API v{}", env!("CARGO_PKG_VERSION"));

    // Resume store: PostgreSQL, or process memory for local development
    let store: Arc<dyn ResumeStore> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            info!("PostgreSQL resume store ready");
            Arc::new(PgResumeStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set; resumes are kept in memory and lost on restart");
            Arc::new(MemoryResumeStore::new())
        }
    };

    let autosave = Autosaver::new(store, config.autosave_debounce);
    info!(
        "Autosave debounce: {}ms",
        config.autosave_debounce.as_millis()
    );

    // Content generator (template by default; swap via GENERATION_BACKEND)
    let generator: Arc<dyn ContentGenerator> = match &config.generation {
        GenerationBackend::Template => Arc::new(TemplateGenerator),
        GenerationBackend::Remote { endpoint } => {
            Arc::new(RemoteGenerator::new(endpoint.clone())?)
        }
        GenerationBackend::Llm { api_key } => {
            let llm = LlmClient::new(api_key.clone())?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Arc::new(LlmGenerator(llm))
        }
    };
    info!("Content generation backend: {}", generator.backend());

    // Hosted auth provider for sign up / sign in
    let auth = match &config.auth_provider {
        Some(provider) => Some(AuthProvider::new(provider.clone())?),
        None => {
            warn!("AUTH_URL not set; sign up and sign in are disabled");
            None
        }
    };

    // Export archive on S3 / MinIO
    let exports = match &config.s3 {
        Some(s3) => {
            let client = build_s3_client(s3).await;
            info!("Export archive enabled (bucket: {})", s3.bucket);
            Some(ExportArchive::new(client, s3.bucket.clone()))
        }
        None => None,
    };

    let state = AppState {
        autosave: autosave.clone(),
        generator,
        tokens: TokenVerifier::new(&config.jwt_secret),
        auth,
        exports,
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Drafts still waiting on their debounce timer
    let flushed = autosave.flush_all().await?;
    info!("Shutdown complete ({flushed} drafts flushed)");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &S3Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.access_key_id,
        &config.secret_access_key,
        None,
        None,
        "cvforge-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
