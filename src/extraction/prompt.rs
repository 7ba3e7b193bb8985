// src/extraction/prompt.rs
use crate::utils::truncate_chars;

pub const DEFAULT_MAX_INPUT_CHARS: usize = 6000;

pub const SYSTEM_PROMPT: &str = r#"You are a precise data extraction assistant. You will receive text copied from a LinkedIn profile page. Extract information ONLY about the profile owner (the person whose profile this is), NOT about other people, companies, or suggested connections.

RULES:
- "location": Extract the location shown directly under the person's name/headline on LinkedIn. This is their city/region, NOT their company's location. Use the EXACT text shown.
- "name": The profile owner's full name (the large name at the top).
- "title": Their current headline/title shown right below their name.
- "bio": Summarize their About/Summary section in 1-2 sentences. If no About section, summarize from their experience.
- "expertise": Extract 5-8 specific professional skills from their Skills section, endorsements, headline, or experience descriptions. Include SPECIFIC technical skills (e.g. "FDA 510(k) Submissions", "GMP Auditing", "Clinical Trial Design"), NOT generic ones like "Leadership" or "Communication".
- "services": Extract 2-4 services they could offer as a consultant, inferred from their experience and skills.
- "yearsExperience": Calculate from their earliest work experience to now. If unclear, estimate from graduation year.
- "industries": Extract from their industry field or infer from their work history.

Return ONLY this JSON, no markdown formatting:
{
  "name": "string",
  "title": "string",
  "location": "string",
  "bio": "string",
  "expertise": ["specific_skill_1", "specific_skill_2", ...],
  "services": ["service_1", "service_2", ...],
  "yearsExperience": number,
  "industries": ["industry_1", "industry_2"]
}
If a field truly cannot be determined, use null."#;

const USER_PREAMBLE: &str = "Extract the profile owner's consultant data from this LinkedIn profile text. Pay special attention to their EXACT location and their SPECIFIC technical skills/expertise:";

/// User turn for the completion call. Only the first `max_chars` characters
/// of the pasted text are sent.
pub fn user_message(profile_text: &str, max_chars: usize) -> String {
    format!(
        "{}\n\n{}",
        USER_PREAMBLE,
        truncate_chars(profile_text, max_chars)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_truncates_input() {
        let text = "é".repeat(DEFAULT_MAX_INPUT_CHARS + 500);
        let message = user_message(&text, DEFAULT_MAX_INPUT_CHARS);
        let body = message.split("\n\n").nth(1).unwrap();
        assert_eq!(body.chars().count(), DEFAULT_MAX_INPUT_CHARS);
    }

    #[test]
    fn test_user_message_keeps_short_input() {
        let message = user_message("Jane Doe\nRegulatory Affairs Lead", 6000);
        assert!(message.starts_with(USER_PREAMBLE));
        assert!(message.ends_with("Regulatory Affairs Lead"));
    }
}
