//! Session-level summary over a set of already scored answers.

use serde::{Deserialize, Serialize};

use crate::interview::evaluator::Rating;
use crate::scoring::lexicon::normalize_category;
use crate::scoring::round_score;
use crate::scoring::tables::GENERAL_CATEGORY;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnsweredQuestion {
    #[serde(default)]
    pub category: String,
    pub overall_score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    pub category: String,
    pub average_score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub average_score: u32,
    pub rating: Rating,
    pub answered_count: usize,
    pub category_scores: Vec<CategoryScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strongest_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weakest_category: Option<String>,
}

fn mean(scores: &[u32]) -> u32 {
    if scores.is_empty() {
        return 0;
    }
    let total: u32 = scores.iter().map(|s| (*s).min(100)).sum();
    round_score(total as f64 / scores.len() as f64)
}

/// Averages per answer and per category. Categories keep first-seen order.
/// Strongest and weakest are only reported when there are at least two
/// categories to compare; ties go to the earlier category.
pub fn summarize_session(answers: &[AnsweredQuestion]) -> SessionSummary {
    let mut groups: Vec<(String, Vec<u32>)> = Vec::new();
    for answer in answers {
        let mut category = normalize_category(&answer.category);
        if category.is_empty() {
            category = GENERAL_CATEGORY.to_string();
        }
        match groups.iter_mut().find(|(name, _)| *name == category) {
            Some((_, scores)) => scores.push(answer.overall_score),
            None => groups.push((category, vec![answer.overall_score])),
        }
    }

    let category_scores: Vec<CategoryScore> = groups
        .into_iter()
        .map(|(category, scores)| CategoryScore {
            category,
            average_score: mean(&scores),
        })
        .collect();

    let (strongest_category, weakest_category) = if category_scores.len() >= 2 {
        let mut strongest = &category_scores[0];
        let mut weakest = &category_scores[0];
        for score in &category_scores[1..] {
            if score.average_score > strongest.average_score {
                strongest = score;
            }
            if score.average_score < weakest.average_score {
                weakest = score;
            }
        }
        (
            Some(strongest.category.clone()),
            Some(weakest.category.clone()),
        )
    } else {
        (None, None)
    };

    let all: Vec<u32> = answers.iter().map(|a| a.overall_score).collect();
    let average_score = mean(&all);

    SessionSummary {
        average_score,
        rating: Rating::from_score(average_score),
        answered_count: answers.len(),
        category_scores,
        strongest_category,
        weakest_category,
    }
}
