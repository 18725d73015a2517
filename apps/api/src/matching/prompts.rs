//! Prompt Builder: turns a (candidate, job posting) pair into the scoring prompt.
//!
//! Pure string formatting: no I/O and no validation of the inputs. Absent
//! optional fields render as `Not specified`.

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::models::profile::{CandidateRow, JobPostingRow};

/// Role instruction sent as the system prompt for every scoring call.
pub const MATCH_ROLE_SYSTEM: &str = "You are an expert HR analyst specializing in \
    candidate-job compatibility assessment. Judge how well the candidate fits the \
    posting and explain your reasoning concisely.";

/// Placeholder for optional profile fields that are absent.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Scoring prompt template. Every `{placeholder}` is replaced before sending.
pub const MATCH_PROMPT_TEMPLATE: &str = r#"Analyze the compatibility between the following candidate and job posting.

CANDIDATE PROFILE:
- Skills: {candidate_skills}
- Years of experience: {candidate_experience}
- Education: {candidate_education}
- Location: {candidate_location}
- Bio: {candidate_bio}

JOB POSTING:
- Title: {job_title}
- Required skills: {job_skills}
- Required years of experience: {job_experience}
- Required education: {job_education}
- Location: {job_location}
- Remote work: {job_remote}
- Salary range: {job_salary}

Score the match from 0 (no fit) to 100 (perfect fit), weighing skills overlap,
experience, education, location and remote compatibility.

Return a JSON object with this EXACT schema (no extra fields):
{
  "score": 75,
  "analysis": "Two to four sentences explaining the score.",
  "key_matches": ["Requirement the candidate clearly meets"],
  "gaps": ["Requirement the candidate does not meet"]
}

"score" MUST be an integer between 0 and 100 inclusive."#;

/// Full system prompt: the HR analyst role plus the JSON-only output rules.
pub fn match_system_prompt() -> String {
    format!("{MATCH_ROLE_SYSTEM} {JSON_ONLY_SYSTEM}")
}

/// Builds the deterministic scoring prompt for one pair.
pub fn build_match_prompt(candidate: &CandidateRow, posting: &JobPostingRow) -> String {
    MATCH_PROMPT_TEMPLATE
        .replace("{candidate_skills}", &join_list(&candidate.skills))
        .replace("{candidate_experience}", &candidate.experience_years.to_string())
        .replace("{candidate_education}", or_unspecified(&candidate.education))
        .replace("{candidate_location}", or_unspecified(&candidate.location))
        .replace("{candidate_bio}", or_unspecified(&candidate.bio))
        .replace("{job_title}", &posting.title)
        .replace("{job_skills}", &join_list(&posting.required_skills))
        .replace("{job_experience}", &posting.required_experience.to_string())
        .replace("{job_education}", or_unspecified(&posting.required_education))
        .replace("{job_location}", or_unspecified(&posting.location))
        .replace("{job_remote}", if posting.remote { "Yes" } else { "No" })
        .replace(
            "{job_salary}",
            &salary_band(posting.salary_min, posting.salary_max),
        )
}

fn join_list(items: &[String]) -> String {
    if items.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        items.join(", ")
    }
}

fn or_unspecified(value: &Option<String>) -> &str {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(NOT_SPECIFIED)
}

fn salary_band(min: Option<i64>, max: Option<i64>) -> String {
    match (min, max) {
        (None, None) => NOT_SPECIFIED.to_string(),
        (min, max) => format!(
            "{} - {}",
            min.map(|v| v.to_string())
                .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
            max.map(|v| v.to_string())
                .unwrap_or_else(|| NOT_SPECIFIED.to_string())
        ),
    }
}
