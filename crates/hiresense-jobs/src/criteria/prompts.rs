//! Prompt text for resume criteria extraction.

use super::STANDARD_CATEGORIES;

const SYSTEM_PROMPT: &str = "You are a career advisor and applicant-tracking-system specialist. \
Read the candidate profile below and extract the job search criteria that best describe the roles \
they are qualified for: their core technical and soft skills, their experience level, the job \
titles that fit them, the industries they suit, and their likely market value.";

const RESPONSE_SHAPE: &str = r#"Respond with a single JSON object inside a ```json fenced block, using exactly these fields:
- "keywords": 15-20 high-signal ATS keywords (technologies, tools, soft skills)
- "roles": 5-8 precise job titles the candidate is qualified for
- "skills": every technical and soft skill identifiable in the profile
- "categories": 3-5 entries taken from the standard category list
- "experience_level": one of "Entry Level", "Junior", "Mid Level", "Senior", "Lead", "Principal", "Executive"
- "preferred_locations": locations mentioned in the profile, or ["Remote"] if none
- "salary_expectation": an estimated range such as "$80,000 - $120,000"
- "industry_preferences": 3-5 industries where these skills are most valued"#;

/// Build the single-turn prompt sent to the generative-language API.
pub(super) fn resume_criteria_prompt(
    resume_text: &str,
    skills: &[String],
    target_role: Option<&str>,
) -> String {
    let resume = if resume_text.trim().is_empty() {
        "No resume uploaded"
    } else {
        resume_text
    };
    let skills = if skills.is_empty() {
        "Not specified".to_string()
    } else {
        skills.join(", ")
    };
    let target_role = target_role
        .filter(|r| !r.trim().is_empty())
        .unwrap_or("Not specified");

    format!(
        "{SYSTEM_PROMPT}\n\nStandard job categories: {categories}.\n\
         Map the candidate onto these categories and pick keywords that recruiters \
         searching those categories would use.\n\n\
         Resume text:\n{resume}\n\n\
         Profile skills: {skills}\n\
         Target role: {target_role}\n\n\
         {RESPONSE_SHAPE}",
        categories = STANDARD_CATEGORIES.join(", "),
    )
}
