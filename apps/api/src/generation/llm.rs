use async_trait::async_trait;
use tracing::debug;

use crate::generation::prompts::{
    CONTENT_SYSTEM, DESCRIPTION_PROMPT, SKILLS_PROMPT, SUMMARY_PROMPT,
};
use crate::generation::{
    ContentGenerator, GeneratedContent, GenerationError, GenerationInput, GenerationReply,
    GenerationSection,
};
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;

/// Generates content with Claude. All calls go through `llm_client`.
pub struct LlmGenerator(pub LlmClient);

/// Fills the section's prompt template from the validated input.
pub fn build_prompt(input: &GenerationInput) -> String {
    let template = match input.section {
        GenerationSection::Summary => SUMMARY_PROMPT,
        GenerationSection::Skills => SKILLS_PROMPT,
        GenerationSection::WorkExperience => DESCRIPTION_PROMPT,
    };
    template
        .replace("{job_title}", &input.job_title)
        .replace("{company}", input.company.as_deref().unwrap_or_default())
}

#[async_trait]
impl ContentGenerator for LlmGenerator {
    fn backend(&self) -> &'static str {
        "llm"
    }

    async fn generate(&self, input: &GenerationInput) -> Result<GeneratedContent, GenerationError> {
        let prompt = build_prompt(input);
        let system = format!("{CONTENT_SYSTEM} {JSON_ONLY_SYSTEM}");
        debug!("Generating {:?} via LLM", input.section);

        let reply: GenerationReply = self.0.complete_json(&prompt, &system).await?;
        reply.into_content(input.section)
    }
}
