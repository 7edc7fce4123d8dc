use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};

use crate::generation::{
    ContentGenerator, GeneratedContent, GenerationError, GenerationInput, GenerationReply,
    GenerationSection,
};

/// Forwards generation to an external HTTP endpoint and passes its answer through.
///
/// The endpoint receives `{section, jobTitle}` (plus `company` for job
/// descriptions) and answers `{summary}`, `{skills}`, `{description}` or `{error}`.
pub struct RemoteGenerator {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RemoteRequest<'a> {
    section: GenerationSection,
    job_title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    company: Option<&'a str>,
}

impl RemoteGenerator {
    pub fn new(endpoint: String) -> Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(Duration::from_secs(30)).build()?,
            endpoint,
        })
    }
}

#[async_trait]
impl ContentGenerator for RemoteGenerator {
    fn backend(&self) -> &'static str {
        "remote"
    }

    async fn generate(&self, input: &GenerationInput) -> Result<GeneratedContent, GenerationError> {
        let body = RemoteRequest {
            section: input.section,
            job_title: &input.job_title,
            company: input.company.as_deref(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Upstream(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GenerationError::Upstream(e.to_string()))?;

        // Error bodies carry a message even on non-2xx statuses.
        let reply = match serde_json::from_str::<GenerationReply>(&text) {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Generation endpoint returned {status}: {text}");
                return Err(GenerationError::Upstream(format!(
                    "unreadable response (status {status}): {e}"
                )));
            }
        };

        debug!("Generation endpoint answered {status} for {:?}", input.section);
        reply.into_content(input.section)
    }
}
