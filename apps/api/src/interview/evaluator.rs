//! Heuristic interview answer evaluation, used when the AI evaluator is unavailable.
//!
//! Strict on purpose: the base score is banded by answer length before any
//! keyword bonus applies, so a short or evasive answer cannot score well no
//! matter which terms it drops. Jitter inside each band comes from the caller's
//! `Jitter` source.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::interview::follow_up::pick_follow_up;
use crate::scoring::tables::GENERAL_CATEGORY;
use crate::scoring::{clamp_score, round_score, Jitter, Lexicon, Normalize};

/// Non-answers and answers under 5 words land in `[5, 5 + NON_ANSWER_SPAN)`.
pub const NON_ANSWER_SPAN: u32 = 15;
/// Answers under 20 words land in `[15, 15 + SHORT_ANSWER_SPAN)`.
pub const SHORT_ANSWER_SPAN: u32 = 20;
/// Random component added to the two longer bands.
pub const ANSWER_JITTER_SPAN: u32 = 15;
/// Floor applied to the overall score, even for empty answers.
pub const MIN_OVERALL_SCORE: u32 = 5;

const DETAILED_ANSWER_CHARS: usize = 100;
const STRUCTURED_ANSWER_CHARS: usize = 200;
const STRONG_SCORE: u32 = 70;

pub const FEEDBACK_RELEVANT: &str =
    "Your answer stays on the question and uses the right technical vocabulary.";
pub const FEEDBACK_DEPTH: &str = "Good depth: you explained the details and backed them up.";
pub const SUGGEST_RELEVANCE: &str =
    "Address the question more directly and name the concepts it is asking about.";
pub const SUGGEST_DEPTH: &str =
    "Go deeper: explain why your approach works and support it with a concrete example.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seniority {
    Junior,
    #[default]
    Mid,
    Senior,
    Lead,
}

impl fmt::Display for Seniority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self {
            Seniority::Junior => "junior",
            Seniority::Mid => "mid",
            Seniority::Senior => "senior",
            Seniority::Lead => "lead",
        };
        f.write_str(level)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    Excellent,
    Good,
    Satisfactory,
    #[default]
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl Rating {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 80 => Rating::Excellent,
            s if s >= 60 => Rating::Good,
            s if s >= 40 => Rating::Satisfactory,
            _ => Rating::NeedsImprovement,
        }
    }
}

/// One interview exchange.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question: String,
    #[serde(default = "general_category")]
    pub category: String,
    #[serde(default)]
    pub answer_text: String,
}

fn general_category() -> String {
    GENERAL_CATEGORY.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSignals {
    pub word_count: usize,
    pub char_count: usize,
    pub has_keywords: bool,
    pub has_examples: bool,
    pub is_structured: bool,
    pub has_explanation: bool,
    pub is_non_answer: bool,
}

pub fn detect_answer_signals(answer_text: &str, lexicon: &Lexicon) -> AnswerSignals {
    let answer = answer_text.trim();
    let char_count = answer.chars().count();
    AnswerSignals {
        word_count: answer.split_whitespace().count(),
        char_count,
        has_keywords: lexicon.interview_tech.is_match(answer),
        has_examples: lexicon.interview_examples.is_match(answer),
        is_structured: answer.contains('\n') || char_count > STRUCTURED_ANSWER_CHARS,
        has_explanation: lexicon.interview_explanation.is_match(answer),
        is_non_answer: lexicon.interview_non_answer.is_match(answer),
    }
}

fn bonus(signal: bool, value: i64) -> i64 {
    if signal {
        value
    } else {
        0
    }
}

/// Length-banded base score, checked from most to least restrictive:
///
/// | condition                      | range                                |
/// |--------------------------------|--------------------------------------|
/// | non-answer or fewer than 5 words | `[5, 20)`                          |
/// | fewer than 20 words            | `[15, 35)`                           |
/// | fewer than 50 words            | `25 + 15·keywords + [0, 15)`         |
/// | otherwise                      | `35 + 20·keywords + 15·examples + 15·explanation + [0, 15)` |
pub fn base_score(signals: &AnswerSignals, rng: &mut dyn Jitter) -> i64 {
    if signals.is_non_answer || signals.word_count < 5 {
        5 + rng.roll(NON_ANSWER_SPAN) as i64
    } else if signals.word_count < 20 {
        15 + rng.roll(SHORT_ANSWER_SPAN) as i64
    } else if signals.word_count < 50 {
        25 + bonus(signals.has_keywords, 15) + rng.roll(ANSWER_JITTER_SPAN) as i64
    } else {
        35 + bonus(signals.has_keywords, 20)
            + bonus(signals.has_examples, 15)
            + bonus(signals.has_explanation, 15)
            + rng.roll(ANSWER_JITTER_SPAN) as i64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerEvaluation {
    pub overall_score: u32,
    pub relevance_score: u32,
    pub depth_score: u32,
    pub clarity_score: u32,
    #[serde(default)]
    pub feedback: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub follow_up_question: Option<String>,
    #[serde(default)]
    pub rating: Rating,
}

impl Normalize for AnswerEvaluation {
    fn normalize(mut self) -> Self {
        self.relevance_score = self.relevance_score.min(100);
        self.depth_score = self.depth_score.min(100);
        self.clarity_score = self.clarity_score.min(100);
        self.overall_score = self.overall_score.clamp(MIN_OVERALL_SCORE, 100);
        self.rating = Rating::from_score(self.overall_score);
        self.follow_up_question = self
            .follow_up_question
            .filter(|q| !q.trim().is_empty());
        self
    }
}

/// Scores one answer. `level` is accepted for parity with the AI evaluator; the
/// heuristic bands do not depend on it.
pub fn evaluate_answer(
    record: &AnswerRecord,
    level: Seniority,
    lexicon: &Lexicon,
    rng: &mut dyn Jitter,
) -> AnswerEvaluation {
    let signals = detect_answer_signals(&record.answer_text, lexicon);
    let base = base_score(&signals, rng);

    let relevance_score = clamp_score(base + if signals.has_keywords { 10 } else { -10 });
    let depth_score = clamp_score(
        base + if signals.char_count > DETAILED_ANSWER_CHARS { 10 } else { -15 }
            + bonus(signals.has_examples, 10),
    );
    let clarity_score = clamp_score(
        base + bonus(signals.is_structured, 15) + bonus(signals.has_explanation, 10),
    );
    let mean = (relevance_score + depth_score + clarity_score) as f64 / 3.0;
    let overall_score = round_score(mean).max(MIN_OVERALL_SCORE);

    let mut feedback = Vec::new();
    let mut suggestions = Vec::new();
    if relevance_score >= STRONG_SCORE {
        feedback.push(FEEDBACK_RELEVANT.to_string());
    } else {
        suggestions.push(SUGGEST_RELEVANCE.to_string());
    }
    if depth_score >= STRONG_SCORE {
        feedback.push(FEEDBACK_DEPTH.to_string());
    } else {
        suggestions.push(SUGGEST_DEPTH.to_string());
    }

    debug!(
        %level,
        category = %record.category,
        word_count = signals.word_count,
        non_answer = signals.is_non_answer,
        base,
        "Interview answer scored"
    );

    AnswerEvaluation {
        overall_score,
        relevance_score,
        depth_score,
        clarity_score,
        feedback,
        suggestions,
        follow_up_question: pick_follow_up(&record.category, overall_score, lexicon, rng),
        rating: Rating::from_score(overall_score),
    }
}
