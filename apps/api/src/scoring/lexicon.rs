//! Compiled form of [`ScoringTables`]: one case-insensitive regex per term list.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::scoring::tables::{ScoringTables, GENERAL_CATEGORY};

/// Lexicon compiled from the built-in tables, shared by tests and as the startup default.
pub static DEFAULT_LEXICON: Lazy<Lexicon> = Lazy::new(|| {
    Lexicon::compile(&ScoringTables::default()).expect("built-in scoring tables must compile")
});

/// Matches nothing. Used for empty term lists, since an empty alternation matches everything.
const NEVER: &str = r"[^\s\S]";

#[derive(Debug, Clone)]
pub struct Lexicon {
    version: String,
    pub(crate) analysis_action: Regex,
    pub(crate) analysis_tech: Regex,
    pub(crate) analysis_quantified: Regex,
    pub(crate) quality_action_verbs: Vec<String>,
    pub(crate) quality_tech_keywords: Vec<String>,
    pub(crate) quality_quantified: Vec<Regex>,
    pub(crate) interview_tech: Regex,
    pub(crate) interview_examples: Regex,
    pub(crate) interview_explanation: Regex,
    pub(crate) interview_non_answer: Regex,
    follow_ups: BTreeMap<String, Vec<String>>,
}

impl Lexicon {
    /// Compiles every list in `tables`. Term lists are escaped, so only a malformed
    /// quantified pattern can make this fail.
    pub fn compile(tables: &ScoringTables) -> Result<Self, regex::Error> {
        let quantified_tail = alternation(&tables.analysis_count_nouns, Inflection::Exact);
        let analysis_quantified = if tables.analysis_count_nouns.is_empty() {
            Regex::new(r"\d+(?:[.,]\d+)?\s*%")?
        } else {
            Regex::new(&format!(r"(?i)\d+(?:[.,]\d+)?\s*(?:%|\+?\s*{quantified_tail})"))?
        };

        let quality_quantified = tables
            .quality_quantified_patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            version: tables.version.clone(),
            analysis_action: term_regex(&tables.analysis_action_verbs)?,
            analysis_tech: noun_regex(&tables.analysis_tech_terms)?,
            analysis_quantified,
            quality_action_verbs: lowercase_terms(&tables.quality_action_verbs),
            quality_tech_keywords: lowercase_terms(&tables.quality_tech_keywords),
            quality_quantified,
            interview_tech: noun_regex(&tables.interview_tech_terms)?,
            interview_examples: term_regex(&tables.interview_example_markers)?,
            interview_explanation: term_regex(&tables.interview_explanation_markers)?,
            interview_non_answer: term_regex(&tables.interview_non_answer_markers)?,
            follow_ups: tables
                .follow_up_questions
                .iter()
                .map(|(category, pool)| (normalize_category(category), pool.clone()))
                .collect(),
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Follow-up pool for an interview category, falling back to the general pool.
    pub fn follow_up_pool(&self, category: &str) -> &[String] {
        self.follow_ups
            .get(&normalize_category(category))
            .or_else(|| self.follow_ups.get(GENERAL_CATEGORY))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// "System Design", "system_design" and "system-design" name the same pool.
pub fn normalize_category(category: &str) -> String {
    category
        .trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Counts non-overlapping occurrences of `needle` in an already-lowercased haystack.
pub fn count_occurrences(haystack_lower: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack_lower.matches(needle).count()
}

fn lowercase_terms(terms: &[String]) -> Vec<String> {
    terms
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// How a term may end when matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Inflection {
    /// Whole word only: "pass" does not match "bypass" or "passes".
    Exact,
    /// Also accepts an `s`/`es` plural: "array" matches "arrays", "index" matches "indexes".
    Plural,
}

/// `(?:a|b|c)` with each term escaped and given a word boundary on any side that
/// starts or ends with a word character. `c++` and `O(` match as written.
fn alternation(terms: &[String], inflection: Inflection) -> String {
    let parts: Vec<String> = terms
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(|term| {
            let lead = if term.starts_with(is_word_char) { r"\b" } else { "" };
            let trail = match (term.ends_with(is_word_char), inflection) {
                (false, _) => "",
                (true, Inflection::Exact) => r"\b",
                (true, Inflection::Plural) => r"(?:s|es)?\b",
            };
            format!("{lead}{}{trail}", regex::escape(term))
        })
        .collect();
    format!("(?:{})", parts.join("|"))
}

fn compile_terms(terms: &[String], inflection: Inflection) -> Result<Regex, regex::Error> {
    if terms.iter().all(|t| t.trim().is_empty()) {
        return Regex::new(NEVER);
    }
    Regex::new(&format!("(?i){}", alternation(terms, inflection)))
}

/// Markers and verbs: whole words only.
fn term_regex(terms: &[String]) -> Result<Regex, regex::Error> {
    compile_terms(terms, Inflection::Exact)
}

/// Technical vocabulary: singular or plural.
fn noun_regex(terms: &[String]) -> Result<Regex, regex::Error> {
    compile_terms(terms, Inflection::Plural)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
