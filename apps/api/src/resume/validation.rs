use serde::{Deserialize, Serialize};

use crate::models::resume::Resume;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    /// Dotted path into the form, e.g. `workExperience.0.title`.
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<FieldError>,
}

/// Checks the fields the builder form requires before moving on to the preview.
/// Autosaved drafts are never validated.
pub fn validate_resume(resume: &Resume) -> ValidationReport {
    let mut errors = Vec::new();
    let mut require = |field: String, value: &str, message: &str| {
        if value.is_empty() {
            errors.push(FieldError {
                field,
                message: message.to_string(),
            });
        }
    };

    let info = &resume.personal_info;
    require("personalInfo.name".into(), &info.name, "Name is required");

    for (i, job) in resume.work_experience.iter().enumerate() {
        require(
            format!("workExperience.{i}.title"),
            &job.title,
            "Job title is required",
        );
        require(
            format!("workExperience.{i}.company"),
            &job.company,
            "Company name is required",
        );
    }

    for (i, edu) in resume.education.iter().enumerate() {
        require(
            format!("education.{i}.degree"),
            &edu.degree,
            "Degree is required",
        );
        require(
            format!("education.{i}.institution"),
            &edu.institution,
            "Institution name is required",
        );
    }

    for (i, project) in resume.projects.iter().enumerate() {
        require(
            format!("projects.{i}.name"),
            &project.name,
            "Project name is required",
        );
    }

    for (i, cert) in resume.certifications.iter().enumerate() {
        require(
            format!("certifications.{i}.name"),
            &cert.name,
            "Certification name is required",
        );
    }

    if !is_valid_email(&info.email) {
        errors.push(FieldError {
            field: "personalInfo.email".into(),
            message: "Invalid email address".into(),
        });
    }

    if resume.skills.is_empty() {
        errors.push(FieldError {
            field: "skills".into(),
            message: "At least one skill is required".into(),
        });
    }

    errors.sort_by_key(|e| field_rank(&e.field));

    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}

/// Orders errors the way the form lays out its tabs.
fn field_rank(field: &str) -> u8 {
    match field.split('.').next().unwrap_or_default() {
        "personalInfo" => 0,
        "skills" => 1,
        "workExperience" => 2,
        "education" => 3,
        "projects" => 4,
        "certifications" => 5,
        _ => 6,
    }
}

/// Shape check only: one `@`, a non-empty local part without spaces, and a
/// dotted domain whose labels are non-empty.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|l| {
            !l.is_empty()
                && !l.starts_with('-')
                && !l.ends_with('-')
                && l.chars().all(|c| c.is_alphanumeric() || c == '-')
        })
        && labels.last().map_or(false, |tld| tld.len() >= 2)
}
