//! Rule-based advice shown next to the builder, and the one-line digest shown on the preview.

use crate::models::resume::{present, Resume};

const MIN_SUMMARY_CHARS: usize = 200;
const MIN_SKILLS: usize = 5;
const MIN_DESCRIPTION_CHARS: usize = 50;

pub const LINKEDIN_TIP: &str =
    "Adding a LinkedIn profile can strengthen your professional presence.";
pub const SHORT_SUMMARY_TIP: &str =
    "Your summary is quite brief. Consider expanding it to highlight your key strengths.";
pub const FEW_SKILLS_TIP: &str =
    "Adding more skills relevant to your target job can improve your resume.";
pub const THIN_DESCRIPTION_TIP: &str =
    "Add detailed job descriptions with accomplishments and metrics for better impact.";

/// Returns advisory messages for the current form, in display order.
pub fn compute_feedback(resume: &Resume) -> Vec<String> {
    let mut feedback = Vec::new();

    if resume.personal_info.linkedin.is_empty() {
        feedback.push(LINKEDIN_TIP.to_string());
    }

    if !resume.summary.is_empty() && resume.summary.chars().count() < MIN_SUMMARY_CHARS {
        feedback.push(SHORT_SUMMARY_TIP.to_string());
    }

    if resume.skills.len() < MIN_SKILLS {
        feedback.push(FEW_SKILLS_TIP.to_string());
    }

    // Only entries the user has started filling in count.
    let thin_description = resume.work_experience.iter().any(|job| {
        !job.title.is_empty()
            && !job.company.is_empty()
            && job.description.chars().count() < MIN_DESCRIPTION_CHARS
    });
    if thin_description {
        feedback.push(THIN_DESCRIPTION_TIP.to_string());
    }

    feedback
}

/// One-sentence overview of the candidate.
pub fn digest(resume: &Resume) -> String {
    let name = present(&resume.personal_info.name).unwrap_or("The candidate");
    let role = resume.primary_job_title().unwrap_or("professional");
    let experience = resume.work_experience.len();
    let education = resume
        .education
        .first()
        .and_then(|e| present(&e.degree))
        .unwrap_or("relevant education");
    let named: Vec<&str> = resume
        .skills
        .iter()
        .filter_map(|s| present(s))
        .take(3)
        .collect();
    let skills = if named.is_empty() {
        "various skills".to_string()
    } else {
        named.join(", ")
    };

    format!(
        "{name} is a {role} with {experience} work experiences and {education}. \
         Their resume highlights {skills}, making them a strong candidate for similar roles."
    )
}
