//! Job-description keyword matching for the CV analysis scorer.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::scoring::round_score;

/// Job keywords absent from the CV that are reported back.
pub const MAX_MISSING_KEYWORDS: usize = 5;

static WORD_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w{4,}\b").expect("word token pattern must compile"));

/// Lowercased word tokens of at least four characters, in text order.
pub fn tokenize(text: &str) -> Vec<String> {
    WORD_TOKEN
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobMatch {
    /// `None` when the job description has no tokens to match against.
    pub score: Option<u32>,
    /// First-seen order, no duplicates, at most `MAX_MISSING_KEYWORDS`.
    pub missing_keywords: Vec<String>,
}

/// Scores how much of the job description's vocabulary appears in the CV.
///
/// `score = round(100 * matched / total)` over every job token (repeats included),
/// so a keyword the job mentions five times weighs five times as much.
pub fn match_job_description(cv_text: &str, job_description: &str) -> JobMatch {
    let cv_tokens: HashSet<String> = tokenize(cv_text).into_iter().collect();
    let job_tokens = tokenize(job_description);

    if job_tokens.is_empty() {
        return JobMatch::default();
    }

    let matched = job_tokens.iter().filter(|t| cv_tokens.contains(*t)).count();

    let mut seen = HashSet::new();
    let missing_keywords = job_tokens
        .iter()
        .filter(|t| !cv_tokens.contains(*t))
        .filter(|t| seen.insert(*t))
        .take(MAX_MISSING_KEYWORDS)
        .cloned()
        .collect();

    JobMatch {
        score: Some(round_score(100.0 * matched as f64 / job_tokens.len() as f64)),
        missing_keywords,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_keeps_words_of_four_or_more() {
        assert_eq!(
            tokenize("Go and Rust on AWS, Kubernetes!"),
            vec!["rust".to_string(), "kubernetes".to_string()]
        );
    }

    #[test]
    fn test_missing_keyword_reported_lowercase() {
        let result = match_job_description(
            "Python developer with Docker experience",
            "Kubernetes and Docker experience",
        );
        assert_eq!(result.missing_keywords, vec!["kubernetes".to_string()]);
        // job tokens: kubernetes, docker, experience → 2 of 3 matched
        assert_eq!(result.score, Some(67));
    }

    #[test]
    fn test_missing_keywords_deduplicated_in_first_seen_order() {
        let result = match_job_description(
            "nothing relevant",
            "terraform kafka terraform spark kafka airflow",
        );
        assert_eq!(
            result.missing_keywords,
            vec!["terraform", "kafka", "spark", "airflow"]
        );
        assert_eq!(result.score, Some(0));
    }

    #[test]
    fn test_missing_keywords_capped_at_five() {
        let result = match_job_description(
            "",
            "alpha bravo charlie delta echo foxtrot golf hotel",
        );
        assert_eq!(result.missing_keywords.len(), MAX_MISSING_KEYWORDS);
        assert_eq!(result.missing_keywords[0], "alpha");
    }

    #[test]
    fn test_empty_job_description_has_no_score() {
        let result = match_job_description("Rust engineer", "a an of");
        assert_eq!(result.score, None);
        assert!(result.missing_keywords.is_empty());
    }

    #[test]
    fn test_full_overlap_scores_hundred() {
        let result = match_job_description("Senior Rust engineer", "rust engineer");
        assert_eq!(result.score, Some(100));
        assert!(result.missing_keywords.is_empty());
    }
}
