use crate::models::resume::{present, Resume};

/// Renders the resume as a plain Markdown document for text export.
/// Empty sections and blank fields are left out, the same as the HTML templates.
pub fn render_markdown(resume: &Resume) -> String {
    let info = &resume.personal_info;
    let mut md = format!("# {}\n\n", info.display_name());

    if let Some(title) = present(&info.title) {
        md.push_str(&format!("**{title}**\n\n"));
    }

    let contact: Vec<&str> = [
        &info.email,
        &info.phone,
        &info.location,
        &info.linkedin,
        &info.website,
    ]
    .into_iter()
    .filter_map(|field| present(field))
    .collect();
    if !contact.is_empty() {
        md.push_str(&contact.join(" | "));
        md.push_str("\n\n");
    }

    if let Some(summary) = present(&resume.summary) {
        md.push_str(&format!("## Summary\n\n{summary}\n\n"));
    }

    if !resume.work_experience.is_empty() {
        md.push_str("## Work Experience\n\n");
        for job in &resume.work_experience {
            md.push_str(&format!("### {}", job.title));
            if let Some(company) = present(&job.company) {
                md.push_str(&format!(", {company}"));
            }
            md.push('\n');
            md.push_str(&format!("*{}*", job.date_range()));
            if let Some(location) = present(&job.location) {
                md.push_str(&format!(" | {location}"));
            }
            md.push_str("\n\n");
            if let Some(description) = present(&job.description) {
                md.push_str(description);
                md.push_str("\n\n");
            }
        }
    }

    if !resume.education.is_empty() {
        md.push_str("## Education\n\n");
        for edu in &resume.education {
            md.push_str(&format!("### {}", edu.degree));
            if let Some(institution) = present(&edu.institution) {
                md.push_str(&format!(", {institution}"));
            }
            md.push('\n');
            md.push_str(&format!("*{}*\n\n", edu.date_range()));
            if let Some(description) = present(&edu.description) {
                md.push_str(description);
                md.push_str("\n\n");
            }
        }
    }

    let skills: Vec<&str> = resume.skills.iter().filter_map(|s| present(s)).collect();
    if !skills.is_empty() {
        md.push_str("## Skills\n\n");
        for skill in skills {
            md.push_str(&format!("- {skill}\n"));
        }
        md.push('\n');
    }

    if !resume.projects.is_empty() {
        md.push_str("## Projects\n\n");
        for project in &resume.projects {
            if present(&project.link).is_some() {
                md.push_str(&format!("### [{}]({})\n", project.name, project.href()));
            } else {
                md.push_str(&format!("### {}\n", project.name));
            }
            if !project.technologies.is_empty() {
                md.push_str(&format!("*{}*\n", project.technologies.join(", ")));
            }
            md.push('\n');
            if let Some(description) = present(&project.description) {
                md.push_str(description);
                md.push_str("\n\n");
            }
        }
    }

    if !resume.certifications.is_empty() {
        md.push_str("## Certifications\n\n");
        for cert in &resume.certifications {
            md.push_str(&format!("- **{}**", cert.name));
            if let Some(issuer) = present(&cert.issuer) {
                md.push_str(&format!(", {issuer}"));
            }
            if let Some(date) = present(&cert.date) {
                md.push_str(&format!(" ({date})"));
            }
            md.push('\n');
        }
        md.push('\n');
    }

    md.truncate(md.trim_end().len());
    md.push('\n');
    md
}
