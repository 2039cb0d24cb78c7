//! Prompt text for the query generator.
//!
//! The system prompt has one placeholder, `{project_details}`, filled by
//! [`case_study_system_prompt`]. The user instruction is fixed.

/// Placeholder replaced with the project description.
pub const PROJECT_DETAILS_PLACEHOLDER: &str = "{project_details}";

/// System prompt for the query generator.
pub const CASE_STUDY_QUERY_PROMPT: &str = r#"You are a research assistant that finds case studies of past projects similar to a new one.

Project details:
{project_details}

Write one web search query that will surface published case studies, success stories or post-mortems of comparable projects. Focus on the product type, the problem it solves and its audience. Keep the query short (under 12 words), use plain keywords, and do not add quotes, operators or site filters.

Reply with JSON only, matching the requested schema."#;

/// Fixed user message sent after the system prompt.
pub const CASE_STUDY_QUERY_INSTRUCTION: &str =
    "Generate a query to search for case studies that are relevant to the project.";

/// Fills the system prompt with `project_details`.
///
/// Only the placeholder is replaced; braces inside `project_details` are kept as-is.
pub fn case_study_system_prompt(project_details: &str) -> String {
    CASE_STUDY_QUERY_PROMPT.replacen(PROJECT_DETAILS_PLACEHOLDER, project_details, 1)
}
