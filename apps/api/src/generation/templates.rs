//! Canned AI content: role-aware text that needs no network call.

use async_trait::async_trait;

use crate::generation::{
    ContentGenerator, GeneratedContent, GenerationError, GenerationInput, GenerationSection,
};

/// Coarse grouping of job titles that picks which canned text to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleFamily {
    Engineering,
    Design,
    Management,
    General,
}

impl RoleFamily {
    /// Case-insensitive keyword match; engineering wins over design over management.
    pub fn classify(title: &str) -> Self {
        let title = title.to_lowercase();
        if title.contains("developer") || title.contains("engineer") {
            RoleFamily::Engineering
        } else if title.contains("designer") {
            RoleFamily::Design
        } else if title.contains("manager") {
            RoleFamily::Management
        } else {
            RoleFamily::General
        }
    }
}

pub fn summary_for(job_title: &str) -> String {
    format!(
        "Experienced {job_title} with a proven track record of delivering high-quality results. \
         Skilled in collaboration, problem-solving, and adapting to new technologies. \
         Passionate about creating innovative solutions that drive business growth while \
         maintaining excellence in technical implementation."
    )
}

pub fn skills_for(family: RoleFamily) -> Vec<String> {
    let skills: &[&str] = match family {
        RoleFamily::Engineering => &[
            "JavaScript",
            "TypeScript",
            "React",
            "Node.js",
            "CSS",
            "HTML",
            "Git",
            "REST APIs",
            "Problem Solving",
            "Team Collaboration",
        ],
        RoleFamily::Design => &[
            "UI/UX Design",
            "Figma",
            "Adobe Creative Suite",
            "Prototyping",
            "Wireframing",
            "User Research",
            "Design Systems",
            "Typography",
            "Color Theory",
            "Responsive Design",
        ],
        RoleFamily::Management => &[
            "Team Leadership",
            "Project Management",
            "Strategic Planning",
            "Stakeholder Management",
            "Budgeting",
            "Agile Methodologies",
            "Performance Evaluation",
            "Conflict Resolution",
            "Communication",
            "Decision Making",
        ],
        RoleFamily::General => &[
            "Communication",
            "Problem Solving",
            "Team Collaboration",
            "Time Management",
            "Project Management",
            "Adaptability",
            "Analytical Thinking",
            "Attention to Detail",
        ],
    };
    skills.iter().map(|s| s.to_string()).collect()
}

pub fn description_for(family: RoleFamily) -> String {
    let bullets: [&str; 4] = match family {
        RoleFamily::Engineering => [
            "Developed and maintained web applications using modern JavaScript frameworks, resulting in a 30% increase in user engagement.",
            "Collaborated with cross-functional teams to implement new features and resolve complex technical issues.",
            "Optimized application performance, reducing page load times by 40%.",
            "Participated in code reviews and mentored junior developers.",
        ],
        RoleFamily::Design => [
            "Created user-centered designs for web and mobile applications that increased user satisfaction by 25%.",
            "Conducted user research and usability testing to inform design decisions.",
            "Developed responsive design systems that ensured consistency across multiple platforms.",
            "Collaborated with developers to ensure high-quality implementation of designs.",
        ],
        RoleFamily::Management => [
            "Led a team of 8 professionals, providing mentorship and guidance to achieve departmental goals.",
            "Managed project timelines and resources, delivering 95% of projects on time and within budget.",
            "Developed strategic plans that aligned with company objectives and increased revenue by 20%.",
            "Fostered a collaborative team environment that improved employee retention by 15%.",
        ],
        RoleFamily::General => [
            "Executed key responsibilities that contributed to team and organizational success.",
            "Collaborated with cross-functional teams to achieve shared objectives.",
            "Implemented process improvements that increased efficiency by 15%.",
            "Received recognition for outstanding performance and contributions.",
        ],
    };
    bullets
        .iter()
        .map(|b| format!("• {b}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Default generator: deterministic, offline.
pub struct TemplateGenerator;

#[async_trait]
impl ContentGenerator for TemplateGenerator {
    fn backend(&self) -> &'static str {
        "template"
    }

    async fn generate(&self, input: &GenerationInput) -> Result<GeneratedContent, GenerationError> {
        let family = RoleFamily::classify(&input.job_title);
        Ok(match input.section {
            GenerationSection::Summary => GeneratedContent::Summary {
                summary: summary_for(&input.job_title),
            },
            GenerationSection::Skills => GeneratedContent::Skills {
                skills: skills_for(family),
            },
            GenerationSection::WorkExperience => GeneratedContent::Description {
                description: description_for(family),
            },
        })
    }
}
