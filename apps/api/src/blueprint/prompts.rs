// LLM prompt constants for the Blueprint module.

/// Blueprint generation prompt template. Replace `{job_title}` before sending.
pub const BLUEPRINT_PROMPT_TEMPLATE: &str = r#"Generate a job blueprint for the position of {job_title}. Include responsibilities, required skills, and qualifications. Format the output as a JSON object with the following structure:
{
    "jobTitle": "The job title",
    "responsibilities": ["Responsibility 1", "Responsibility 2", ...],
    "requiredSkills": ["Skill 1", "Skill 2", ...],
    "qualifications": ["Qualification 1", "Qualification 2", ...]
}"#;

pub fn build_blueprint_prompt(job_title: &str) -> String {
    BLUEPRINT_PROMPT_TEMPLATE.replace("{job_title}", job_title)
}
