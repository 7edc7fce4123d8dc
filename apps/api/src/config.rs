use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Which backend produces AI content.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationBackend {
    /// Canned role-based text, no network.
    Template,
    /// Pass-through POST to an external generation endpoint.
    Remote { endpoint: String },
    /// Anthropic Messages API via `llm_client`.
    Llm { api_key: String },
}

/// Hosted auth provider used for sign up / sign in.
#[derive(Debug, Clone)]
pub struct AuthProviderConfig {
    pub url: String,
    pub api_key: String,
}

/// S3 / MinIO settings for archiving exports. All four must be set together.
#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub endpoint: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or inconsistent.
#[derive(Debug, Clone)]
pub struct Config {
    /// Unset means the in-memory store (development only).
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub auth_provider: Option<AuthProviderConfig>,
    pub generation: GenerationBackend,
    pub s3: Option<S3Config>,
    pub autosave_debounce: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| {
            get(key).with_context(|| format!("Required environment variable '{key}' is not set"))
        };

        let auth_provider = match (get("AUTH_URL"), get("AUTH_API_KEY")) {
            (Some(url), Some(api_key)) => Some(AuthProviderConfig {
                url: url.trim_end_matches('/').to_string(),
                api_key,
            }),
            (None, None) => None,
            _ => bail!("AUTH_URL and AUTH_API_KEY must be set together"),
        };

        let generation = match get("GENERATION_BACKEND").as_deref().unwrap_or("template") {
            "template" => GenerationBackend::Template,
            "remote" => GenerationBackend::Remote {
                endpoint: require("GENERATION_ENDPOINT")?,
            },
            "llm" => GenerationBackend::Llm {
                api_key: require("ANTHROPIC_API_KEY")?,
            },
            other => bail!("GENERATION_BACKEND must be template, remote or llm (got '{other}')"),
        };

        let s3_vars = [
            get("S3_BUCKET"),
            get("S3_ENDPOINT"),
            get("AWS_ACCESS_KEY_ID"),
            get("AWS_SECRET_ACCESS_KEY"),
        ];
        let s3 = match s3_vars {
            [Some(bucket), Some(endpoint), Some(access_key_id), Some(secret_access_key)] => {
                Some(S3Config {
                    bucket,
                    endpoint,
                    access_key_id,
                    secret_access_key,
                })
            }
            [None, None, None, None] => None,
            _ => bail!(
                "S3_BUCKET, S3_ENDPOINT, AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY must be set together"
            ),
        };

        let autosave_ms = get("AUTOSAVE_DEBOUNCE_MS")
            .unwrap_or_else(|| "1500".to_string())
            .parse::<u64>()
            .context("AUTOSAVE_DEBOUNCE_MS must be a number of milliseconds")?;

        Ok(Config {
            database_url: get("DATABASE_URL"),
            jwt_secret: require("JWT_SECRET")?,
            auth_provider,
            generation,
            s3,
            autosave_debounce: Duration::from_millis(autosave_ms),
            port: get("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
