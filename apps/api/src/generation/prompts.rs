// LLM prompt templates for the Generation module.
// The JSON-only system fragment lives in llm_client::prompts.

/// System prompt for all resume content generation.
pub const CONTENT_SYSTEM: &str = "\
You are a resume writing assistant. \
Write concise, professional resume content in plain English. \
You MUST respond with valid JSON only. No markdown fences and no explanations. \
Never invent employers, dates, or credentials.";

/// Replace `{job_title}` before sending.
pub const SUMMARY_PROMPT: &str = r#"Write a professional resume summary of 3 sentences for a {job_title}.
Focus on strengths, collaboration, and impact. Do not use first person.

Return exactly: {"summary": "string"}"#;

/// Replace `{job_title}` before sending.
pub const SKILLS_PROMPT: &str = r#"List the 8 to 10 most relevant resume skills for a {job_title}.
Mix technical and interpersonal skills. Each skill is 1 to 3 words.

Return exactly: {"skills": ["string"]}"#;

/// Replace `{job_title}` and `{company}` before sending.
pub const DESCRIPTION_PROMPT: &str = r#"Write a resume job description for a {job_title} at {company}.
Use exactly 4 bullet points, each on its own line starting with "• ".
Start each bullet with a strong action verb. Include plausible metrics only as round percentages.

Return exactly: {"description": "string"}"#;
