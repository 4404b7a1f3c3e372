// Prompts for AI-backed interview answer evaluation.

use crate::interview::evaluator::{AnswerRecord, Seniority};
use crate::llm_client::prompts::SCORE_RANGE_INSTRUCTION;

pub const INTERVIEW_ROLE: &str = "You are a strict but fair technical interviewer evaluating \
    a candidate's answer.";

/// Replace `{level}`, `{category}`, `{question}`, `{answer}` and `{score_rules}` before sending.
pub const EVALUATION_PROMPT_TEMPLATE: &str = r#"Evaluate this {category} interview answer from a {level}-level candidate.
Short, vague or evasive answers must score low regardless of the terms they mention.

Return a JSON object with this EXACT schema:
{
  "overallScore": 0,
  "relevanceScore": 0,
  "depthScore": 0,
  "clarityScore": 0,
  "feedback": ["string"],
  "suggestions": ["string"],
  "followUpQuestion": "string" | null,
  "rating": "Excellent" | "Good" | "Satisfactory" | "Needs Improvement"
}

{score_rules}

QUESTION:
{question}

ANSWER:
{answer}"#;

pub fn build_evaluation_prompt(record: &AnswerRecord, level: Seniority) -> String {
    let answer = if record.answer_text.trim().is_empty() {
        "(no answer given)"
    } else {
        record.answer_text.as_str()
    };
    EVALUATION_PROMPT_TEMPLATE
        .replace("{score_rules}", SCORE_RANGE_INSTRUCTION)
        .replace("{level}", &level.to_string())
        .replace("{category}", &record.category)
        .replace("{question}", &record.question)
        .replace("{answer}", answer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_fills_every_placeholder() {
        let record = AnswerRecord {
            question: "What is a hash map?".to_string(),
            category: "technical".to_string(),
            answer_text: "A key-value store with O(1) lookups.".to_string(),
        };
        let prompt = build_evaluation_prompt(&record, Seniority::Senior);
        assert!(prompt.contains("technical interview answer from a senior-level candidate"));
        assert!(prompt.contains("What is a hash map?"));
        assert!(prompt.contains("O(1) lookups"));
        for placeholder in ["{level}", "{category}", "{question}", "{answer}", "{score_rules}"] {
            assert!(!prompt.contains(placeholder), "{placeholder} left in prompt");
        }
    }

    #[test]
    fn test_blank_answer_is_marked() {
        let record = AnswerRecord {
            question: "Why Rust?".to_string(),
            ..AnswerRecord::default()
        };
        assert!(build_evaluation_prompt(&record, Seniority::Mid).contains("(no answer given)"));
    }
}
