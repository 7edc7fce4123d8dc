use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Returns the value only when it is non-empty. Form fields are plain strings and
/// an empty string means the user left the field blank.
pub fn present(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub website: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkExperience {
    pub title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    pub description: String,
    pub link: String,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub description: String,
}

impl PersonalInfo {
    pub fn display_name(&self) -> &str {
        present(&self.name).unwrap_or("Your Name")
    }
}

/// `"{start} - {end}"`, with a blank end shown as "Present".
pub fn date_range(start: &str, end: &str) -> String {
    format!("{start} - {}", present(end).unwrap_or("Present"))
}

impl WorkExperience {
    pub fn date_range(&self) -> String {
        date_range(&self.start_date, &self.end_date)
    }
}

impl Education {
    pub fn date_range(&self) -> String {
        date_range(&self.start_date, &self.end_date)
    }
}

impl Project {
    /// Link usable as an `href`. Bare hosts get `https://`; non-web schemes are dropped.
    pub fn href(&self) -> String {
        let link = self.link.trim();
        match link.split_once("://") {
            None if link.is_empty() => String::new(),
            None => format!("https://{link}"),
            Some((scheme, _))
                if scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https") =>
            {
                link.to_string()
            }
            Some(_) => "#".to_string(),
        }
    }
}

/// The whole builder form. Every field defaults so partially filled drafts
/// deserialize without complaint; validation is a separate step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Resume {
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub skills: Vec<String>,
    pub work_experience: Vec<WorkExperience>,
    pub education: Vec<Education>,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
}

impl Default for Resume {
    /// A fresh form: one blank job and one blank degree, everything else empty.
    fn default() -> Self {
        Self {
            personal_info: PersonalInfo::default(),
            summary: String::new(),
            skills: Vec::new(),
            work_experience: vec![WorkExperience::default()],
            education: vec![Education::default()],
            projects: Vec::new(),
            certifications: Vec::new(),
        }
    }
}

/// The list-valued parts of a resume that the form can grow and shrink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    Skills,
    WorkExperience,
    Education,
    Projects,
    Certifications,
}

impl Section {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "skills" => Some(Section::Skills),
            "workExperience" => Some(Section::WorkExperience),
            "education" => Some(Section::Education),
            "projects" => Some(Section::Projects),
            "certifications" => Some(Section::Certifications),
            _ => None,
        }
    }
}

impl Resume {
    pub fn section_len(&self, section: Section) -> usize {
        match section {
            Section::Skills => self.skills.len(),
            Section::WorkExperience => self.work_experience.len(),
            Section::Education => self.education.len(),
            Section::Projects => self.projects.len(),
            Section::Certifications => self.certifications.len(),
        }
    }

    /// Appends a blank item to the section.
    pub fn add_item(&mut self, section: Section) {
        match section {
            Section::Skills => self.skills.push(String::new()),
            Section::WorkExperience => self.work_experience.push(WorkExperience::default()),
            Section::Education => self.education.push(Education::default()),
            Section::Projects => self.projects.push(Project::default()),
            Section::Certifications => self.certifications.push(Certification::default()),
        }
    }

    /// Removes the item at `index`. A section never shrinks below one item, and
    /// an out-of-range index is ignored. Returns whether anything was removed.
    pub fn remove_item(&mut self, section: Section, index: usize) -> bool {
        let len = self.section_len(section);
        if len <= 1 || index >= len {
            return false;
        }
        match section {
            Section::Skills => {
                self.skills.remove(index);
            }
            Section::WorkExperience => {
                self.work_experience.remove(index);
            }
            Section::Education => {
                self.education.remove(index);
            }
            Section::Projects => {
                self.projects.remove(index);
            }
            Section::Certifications => {
                self.certifications.remove(index);
            }
        }
        true
    }

    /// Title of the most recent job, used as the default role for AI content.
    pub fn primary_job_title(&self) -> Option<&str> {
        self.work_experience
            .first()
            .and_then(|job| present(&job.title))
    }
}

/// One row of the `resumes` table. One per user, last write wins.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ResumeRecord {
    pub user_id: Uuid,
    pub content: Json<Resume>,
    pub updated_at: DateTime<Utc>,
}
