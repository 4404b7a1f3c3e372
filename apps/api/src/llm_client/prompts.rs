// Shared prompt fragments. Each scorer keeps its own prompts.rs alongside it;
// this file holds the cross-cutting pieces.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Appended to every scoring prompt so the model's output can replace the heuristic result.
pub const SCORE_RANGE_INSTRUCTION: &str = "\
    Every numeric score MUST be an integer between 0 and 100 inclusive. \
    Use the exact field names shown in the schema. Arrays must be arrays of strings, \
    even when empty. Be strict: an average answer or CV scores around 50, not 80.";

/// Joins the shared JSON-only system prompt with a scorer-specific role.
pub fn system_prompt(role: &str) -> String {
    format!("{role} {JSON_ONLY_SYSTEM}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_keeps_json_rule() {
        let system = system_prompt("You are a recruiter.");
        assert!(system.starts_with("You are a recruiter."));
        assert!(system.contains("valid JSON only"));
    }
}
