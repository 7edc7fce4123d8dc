use anyhow::Result;
use aws_sdk_s3::primitives::ByteStream;
use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::models::resume::Resume;
use crate::render::{markdown::render_markdown, render_html, TemplateKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Html,
    Markdown,
}

impl ExportFormat {
    /// `None` for anything other than `html`, `markdown` or `md`. A missing
    /// format means HTML.
    pub fn parse(name: Option<&str>) -> Option<Self> {
        match name.map(|n| n.trim().to_ascii_lowercase()).as_deref() {
            None | Some("") | Some("html") => Some(ExportFormat::Html),
            Some("markdown") | Some("md") => Some(ExportFormat::Markdown),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::Markdown => "md",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Html => "text/html; charset=utf-8",
            ExportFormat::Markdown => "text/markdown; charset=utf-8",
        }
    }
}

/// A rendered resume ready to be sent as a download.
#[derive(Debug, Clone)]
pub struct ExportDocument {
    pub template: TemplateKind,
    pub format: ExportFormat,
    pub body: String,
}

impl ExportDocument {
    pub fn render(
        resume: &Resume,
        template: TemplateKind,
        format: ExportFormat,
    ) -> Result<Self, askama::Error> {
        let body = match format {
            ExportFormat::Html => render_html(resume, template)?,
            ExportFormat::Markdown => render_markdown(resume),
        };
        Ok(Self {
            template,
            format,
            body,
        })
    }

    pub fn filename(&self) -> String {
        format!("resume.{}", self.format.extension())
    }

    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename())
    }

    /// Object key used when archiving this export for `user_id`.
    pub fn archive_key(&self, user_id: Uuid, at: DateTime<Utc>) -> String {
        format!(
            "exports/{}/{}-{}.{}",
            user_id,
            at.format("%Y%m%dT%H%M%SZ"),
            self.template.name(),
            self.format.extension()
        )
    }
}

/// Archives exported documents in S3 / MinIO.
#[derive(Clone)]
pub struct ExportArchive {
    s3: aws_sdk_s3::Client,
    bucket: String,
}

impl ExportArchive {
    pub fn new(s3: aws_sdk_s3::Client, bucket: String) -> Self {
        Self { s3, bucket }
    }

    /// Uploads the document and returns its key.
    pub async fn store(&self, user_id: Uuid, document: &ExportDocument) -> Result<String> {
        let key = document.archive_key(user_id, Utc::now());
        self.s3
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(document.body.clone().into_bytes()))
            .content_type(document.format.content_type())
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("S3 upload failed: {e}"))?;

        info!("Archived export to s3://{}/{}", self.bucket, key);
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_parse() {
        assert_eq!(ExportFormat::parse(None), Some(ExportFormat::Html));
        assert_eq!(ExportFormat::parse(Some("HTML")), Some(ExportFormat::Html));
        assert_eq!(ExportFormat::parse(Some("md")), Some(ExportFormat::Markdown));
        assert_eq!(ExportFormat::parse(Some("markdown")), Some(ExportFormat::Markdown));
        assert_eq!(ExportFormat::parse(Some("png")), None);
    }

    #[test]
    fn test_document_metadata() {
        let resume = Resume::default();
        let doc =
            ExportDocument::render(&resume, TemplateKind::Minimal, ExportFormat::Markdown).unwrap();
        assert_eq!(doc.filename(), "resume.md");
        assert_eq!(doc.content_disposition(), "attachment; filename=\"resume.md\"");
        assert!(doc.body.starts_with("# Your Name"));

        let doc = ExportDocument::render(&resume, TemplateKind::Modern, ExportFormat::Html).unwrap();
        assert_eq!(doc.filename(), "resume.html");
        assert!(doc.body.contains("modern-resume"));
    }

    #[test]
    fn test_archive_key() {
        let user = Uuid::nil();
        let at = Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap();
        let doc = ExportDocument::render(
            &Resume::default(),
            TemplateKind::Professional,
            ExportFormat::Html,
        )
        .unwrap();
        assert_eq!(
            doc.archive_key(user, at),
            "exports/00000000-0000-0000-0000-000000000000/20250304T050607Z-professional.html"
        );
    }
}
