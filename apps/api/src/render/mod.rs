//! Resume rendering. HTML templates are compiled askama templates under
//! `templates/`; all interpolated text is HTML-escaped.

pub mod export;
pub mod markdown;

use askama::Template;
use serde::{Deserialize, Serialize};

use crate::models::resume::Resume;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    #[default]
    Modern,
    Minimal,
    Professional,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 3] = [
        TemplateKind::Modern,
        TemplateKind::Minimal,
        TemplateKind::Professional,
    ];

    /// Unknown or missing names fall back to the modern template.
    pub fn from_name(name: Option<&str>) -> Self {
        match name.map(|n| n.trim().to_ascii_lowercase()).as_deref() {
            Some("minimal") => TemplateKind::Minimal,
            Some("professional") => TemplateKind::Professional,
            _ => TemplateKind::Modern,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TemplateKind::Modern => "modern",
            TemplateKind::Minimal => "minimal",
            TemplateKind::Professional => "professional",
        }
    }
}

#[derive(Template)]
#[template(path = "modern.html")]
struct ModernTemplate<'a> {
    resume: &'a Resume,
}

#[derive(Template)]
#[template(path = "minimal.html")]
struct MinimalTemplate<'a> {
    resume: &'a Resume,
}

#[derive(Template)]
#[template(path = "professional.html")]
struct ProfessionalTemplate<'a> {
    resume: &'a Resume,
}

/// Renders the resume as a standalone HTML document.
pub fn render_html(resume: &Resume, kind: TemplateKind) -> Result<String, askama::Error> {
    match kind {
        TemplateKind::Modern => ModernTemplate { resume }.render(),
        TemplateKind::Minimal => MinimalTemplate { resume }.render(),
        TemplateKind::Professional => ProfessionalTemplate { resume }.render(),
    }
}
