//! AI-assisted content for the builder: summaries, skill lists, job descriptions.
//!
//! `AppState` holds an `Arc<dyn ContentGenerator>` chosen at startup by
//! `GENERATION_BACKEND`. Input rules (which sections exist, what each needs) are
//! enforced here once, before any backend is called.

pub mod handlers;
pub mod llm;
pub mod prompts;
pub mod remote;
pub mod sample;
pub mod templates;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::models::resume::{present, Resume};

pub const SUMMARY_NEEDS_TITLE: &str = "Please add a job title to generate a relevant summary.";
pub const SKILLS_NEED_TITLE: &str = "Please add a job title to generate relevant skills.";
pub const DESCRIPTION_NEEDS_TITLE: &str =
    "Please add a job title and company to generate a description.";
pub const SECTION_UNAVAILABLE: &str = "AI generation for this section is not available yet.";

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("{0}")]
    MissingInput(String),

    #[error("{0}")]
    Unsupported(String),

    /// The generation service answered with an `{error}` body.
    #[error("{0}")]
    Rejected(String),

    #[error("Generation endpoint error: {0}")]
    Upstream(String),

    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// Sections that have an AI helper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GenerationSection {
    Summary,
    Skills,
    WorkExperience,
}

impl GenerationSection {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "summary" => Some(GenerationSection::Summary),
            "skills" => Some(GenerationSection::Skills),
            "workExperience" => Some(GenerationSection::WorkExperience),
            _ => None,
        }
    }
}

/// Wire request: `{section, jobTitle}`, plus `company` for job descriptions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub section: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

/// A request that passed the input rules.
#[derive(Debug, Clone)]
pub struct GenerationInput {
    pub section: GenerationSection,
    pub job_title: String,
    pub company: Option<String>,
}

impl GenerationInput {
    pub fn from_request(request: &GenerateRequest) -> Result<Self, GenerationError> {
        let section = GenerationSection::parse(&request.section)
            .ok_or_else(|| GenerationError::Unsupported(SECTION_UNAVAILABLE.to_string()))?;

        let job_title = request
            .job_title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());
        let company = request
            .company
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty());

        let missing = |msg: &str| GenerationError::MissingInput(msg.to_string());
        let job_title = match section {
            GenerationSection::Summary => job_title.ok_or_else(|| missing(SUMMARY_NEEDS_TITLE))?,
            GenerationSection::Skills => job_title.ok_or_else(|| missing(SKILLS_NEED_TITLE))?,
            GenerationSection::WorkExperience => match (job_title, company) {
                (Some(title), Some(_)) => title,
                _ => return Err(missing(DESCRIPTION_NEEDS_TITLE)),
            },
        };

        Ok(Self {
            section,
            job_title: job_title.to_string(),
            company: company.map(str::to_string),
        })
    }
}

/// Exactly one of the three content shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeneratedContent {
    Summary { summary: String },
    Skills { skills: Vec<String> },
    Description { description: String },
}

impl GeneratedContent {
    pub fn matches(&self, section: GenerationSection) -> bool {
        matches!(
            (self, section),
            (GeneratedContent::Summary { .. }, GenerationSection::Summary)
                | (GeneratedContent::Skills { .. }, GenerationSection::Skills)
                | (
                    GeneratedContent::Description { .. },
                    GenerationSection::WorkExperience
                )
        )
    }
}

/// What a generation service may answer: content, or `{error}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GenerationReply {
    Content(GeneratedContent),
    Error { error: String },
}

impl GenerationReply {
    /// Turns a reply into content for `section`, rejecting error bodies and wrong shapes.
    pub fn into_content(
        self,
        section: GenerationSection,
    ) -> Result<GeneratedContent, GenerationError> {
        match self {
            GenerationReply::Error { error } => Err(GenerationError::Rejected(error)),
            GenerationReply::Content(content) if content.matches(section) => Ok(content),
            GenerationReply::Content(_) => Err(GenerationError::Upstream(format!(
                "response shape does not match section {section:?}"
            ))),
        }
    }
}

#[async_trait]
pub trait ContentGenerator: Send + Sync {
    fn backend(&self) -> &'static str;

    async fn generate(&self, input: &GenerationInput) -> Result<GeneratedContent, GenerationError>;
}

/// Where generated content lands in the form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub section: String,
    #[serde(default)]
    pub job_title: Option<String>,
    /// Work entry to describe; defaults to the first.
    #[serde(default)]
    pub index: Option<usize>,
}

/// Fills in missing request fields from the resume itself.
/// Summary and skills fall back to the first job title; descriptions use the
/// title and company of the addressed work entry.
pub fn request_for_resume(resume: &Resume, apply: &ApplyRequest) -> GenerateRequest {
    let explicit_title = apply
        .job_title
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .map(str::to_string);

    if GenerationSection::parse(&apply.section) == Some(GenerationSection::WorkExperience) {
        let job = resume.work_experience.get(apply.index.unwrap_or(0));
        return GenerateRequest {
            section: apply.section.clone(),
            job_title: job.and_then(|j| present(&j.title)).map(str::to_string),
            company: job.and_then(|j| present(&j.company)).map(str::to_string),
        };
    }

    GenerateRequest {
        section: apply.section.clone(),
        job_title: explicit_title.or_else(|| resume.primary_job_title().map(str::to_string)),
        company: None,
    }
}

/// Writes generated content into the resume. Returns false when the addressed
/// work entry does not exist.
pub fn apply_content(resume: &mut Resume, content: GeneratedContent, index: usize) -> bool {
    match content {
        GeneratedContent::Summary { summary } => resume.summary = summary,
        GeneratedContent::Skills { skills } => resume.skills = skills,
        GeneratedContent::Description { description } => {
            match resume.work_experience.get_mut(index) {
                Some(job) => job.description = description,
                None => return false,
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(section: &str, title: Option<&str>, company: Option<&str>) -> GenerateRequest {
        GenerateRequest {
            section: section.into(),
            job_title: title.map(String::from),
            company: company.map(String::from),
        }
    }

    fn missing_message(result: Result<GenerationInput, GenerationError>) -> String {
        match result {
            Err(GenerationError::MissingInput(msg)) => msg,
            other => panic!("expected missing input, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_section_unsupported() {
        let result = GenerationInput::from_request(&request("education", Some("x"), None));
        assert!(matches!(result, Err(GenerationError::Unsupported(m)) if m == SECTION_UNAVAILABLE));
    }

    #[test]
    fn test_summary_needs_title() {
        let msg = missing_message(GenerationInput::from_request(&request("summary", Some("  "), None)));
        assert_eq!(msg, SUMMARY_NEEDS_TITLE);
    }

    #[test]
    fn test_skills_need_title() {
        let msg = missing_message(GenerationInput::from_request(&request("skills", None, None)));
        assert_eq!(msg, SKILLS_NEED_TITLE);
    }

    #[test]
    fn test_description_needs_title_and_company() {
        let msg = missing_message(GenerationInput::from_request(&request(
            "workExperience",
            Some("Engineer"),
            None,
        )));
        assert_eq!(msg, DESCRIPTION_NEEDS_TITLE);

        let input =
            GenerationInput::from_request(&request("workExperience", Some("Engineer"), Some("Acme")))
                .unwrap();
        assert_eq!(input.section, GenerationSection::WorkExperience);
        assert_eq!(input.company.as_deref(), Some("Acme"));
    }

    #[test]
    fn test_request_wire_format() {
        let req: GenerateRequest =
            serde_json::from_str(r#"{"section": "summary", "jobTitle": "Chef"}"#).unwrap();
        assert_eq!(req.job_title.as_deref(), Some("Chef"));
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({"section": "summary", "jobTitle": "Chef"}));
    }

    #[test]
    fn test_reply_shapes() {
        let reply: GenerationReply = serde_json::from_str(r#"{"summary": "Hi"}"#).unwrap();
        assert_eq!(
            reply.into_content(GenerationSection::Summary).unwrap(),
            GeneratedContent::Summary { summary: "Hi".into() }
        );

        let reply: GenerationReply = serde_json::from_str(r#"{"skills": ["a", "b"]}"#).unwrap();
        assert!(reply.into_content(GenerationSection::Skills).is_ok());

        let reply: GenerationReply = serde_json::from_str(r#"{"error": "quota"}"#).unwrap();
        assert!(matches!(
            reply.into_content(GenerationSection::Summary),
            Err(GenerationError::Rejected(m)) if m == "quota"
        ));
    }

    #[test]
    fn test_reply_wrong_shape_is_upstream_error() {
        let reply: GenerationReply = serde_json::from_str(r#"{"skills": ["a"]}"#).unwrap();
        assert!(matches!(
            reply.into_content(GenerationSection::Summary),
            Err(GenerationError::Upstream(_))
        ));
    }

    #[test]
    fn test_request_for_resume_defaults_to_first_job() {
        let mut resume = Resume::default();
        resume.work_experience[0].title = "Designer".into();
        let req = request_for_resume(
            &resume,
            &ApplyRequest {
                section: "skills".into(),
                ..Default::default()
            },
        );
        assert_eq!(req.job_title.as_deref(), Some("Designer"));

        let req = request_for_resume(
            &resume,
            &ApplyRequest {
                section: "summary".into(),
                job_title: Some("Chef".into()),
                index: None,
            },
        );
        assert_eq!(req.job_title.as_deref(), Some("Chef"));
    }

    #[test]
    fn test_request_for_resume_uses_indexed_job() {
        let mut resume = Resume::default();
        resume.add_item(crate::models::resume::Section::WorkExperience);
        resume.work_experience[1].title = "Manager".into();
        resume.work_experience[1].company = "Initech".into();
        let req = request_for_resume(
            &resume,
            &ApplyRequest {
                section: "workExperience".into(),
                job_title: None,
                index: Some(1),
            },
        );
        assert_eq!(req.job_title.as_deref(), Some("Manager"));
        assert_eq!(req.company.as_deref(), Some("Initech"));
    }

    #[test]
    fn test_apply_content() {
        let mut resume = Resume::default();
        assert!(apply_content(
            &mut resume,
            GeneratedContent::Description {
                description: "• Did things".into()
            },
            0
        ));
        assert_eq!(resume.work_experience[0].description, "• Did things");
        assert!(!apply_content(
            &mut resume,
            GeneratedContent::Description {
                description: "x".into()
            },
            3
        ));
    }
}
