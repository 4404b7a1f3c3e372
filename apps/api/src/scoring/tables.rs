//! Versioned vocabulary tables consulted by the heuristic scorers.
//!
//! Data, not code: every list the scorers match against lives here, and the whole
//! table can be replaced from a JSON file for localization or testing.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Version of the built-in tables. Bump when any list below changes.
pub const TABLES_VERSION: &str = "2024.06";

/// Verbs that signal ownership in free CV text (whole-word match).
pub const ANALYSIS_ACTION_VERBS: &[&str] = &[
    "led",
    "developed",
    "managed",
    "created",
    "implemented",
    "designed",
    "built",
    "improved",
    "increased",
    "reduced",
    "launched",
    "delivered",
    "achieved",
    "optimized",
    "architected",
    "spearheaded",
];

/// Named technologies whose presence marks a CV as technical (whole-word match).
pub const ANALYSIS_TECH_TERMS: &[&str] = &[
    "python",
    "java",
    "javascript",
    "typescript",
    "react",
    "angular",
    "vue",
    "node.js",
    "node",
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "sql",
    "postgresql",
    "mongodb",
    "git",
    "linux",
    "rust",
    "golang",
    "c++",
    "terraform",
    "graphql",
];

/// Nouns that turn a bare number into a quantified achievement ("3 microservices").
pub const ANALYSIS_COUNT_NOUNS: &[&str] = &[
    "percent",
    "users",
    "clients",
    "customers",
    "projects",
    "people",
    "engineers",
    "team members",
    "services",
    "microservices",
    "applications",
    "countries",
    "million",
    "thousand",
];

/// The 20 action verbs counted by the CV quality scorer (case-insensitive substring count).
pub const QUALITY_ACTION_VERBS: &[&str] = &[
    "led",
    "developed",
    "managed",
    "created",
    "implemented",
    "designed",
    "built",
    "improved",
    "increased",
    "reduced",
    "launched",
    "delivered",
    "achieved",
    "optimized",
    "streamlined",
    "established",
    "coordinated",
    "negotiated",
    "mentored",
    "automated",
];

/// The 21 technical keywords counted by the CV quality scorer (case-insensitive substring count).
pub const QUALITY_TECH_KEYWORDS: &[&str] = &[
    "javascript",
    "typescript",
    "python",
    "java",
    "react",
    "node",
    "angular",
    "vue",
    "sql",
    "aws",
    "azure",
    "docker",
    "kubernetes",
    "git",
    "api",
    "agile",
    "scrum",
    "ci/cd",
    "machine learning",
    "cloud",
    "microservices",
];

/// Regexes for quantified impact. Each match counts once.
pub const QUALITY_QUANTIFIED_PATTERNS: &[&str] = &[
    r"\d+%",
    r"\$\d+",
    r"\d+\+",
    r"(?i)\d+ (?:users|clients|projects|years|months)",
];

/// CS vocabulary that marks an interview answer as technical.
pub const INTERVIEW_TECH_TERMS: &[&str] = &[
    "algorithm",
    "data structure",
    "complexity",
    "O(",
    "array",
    "linked list",
    "hash",
    "hashmap",
    "tree",
    "graph",
    "stack",
    "queue",
    "recursion",
    "dynamic programming",
    "binary search",
    "database",
    "index",
    "cache",
    "api",
    "thread",
    "concurrency",
    "memory",
    "pointer",
    "inheritance",
    "polymorphism",
    "scalability",
    "latency",
];

/// Discourse markers that introduce a concrete example.
pub const INTERVIEW_EXAMPLE_MARKERS: &[&str] = &[
    "for example",
    "for instance",
    "such as",
    "e.g.",
    "in my experience",
    "in my last project",
    "like when",
];

/// Causal connectives that signal an explanation rather than a bare assertion.
pub const INTERVIEW_EXPLANATION_MARKERS: &[&str] = &[
    "because",
    "therefore",
    "since",
    "as a result",
    "which means",
    "this means",
    "so that",
    "due to",
    "the reason",
];

/// Phrases that mark an evasive or empty answer.
pub const INTERVIEW_NON_ANSWER_MARKERS: &[&str] = &[
    "don't know",
    "don\u{2019}t know",
    "dont know",
    "do not know",
    "not sure",
    "no idea",
    "skip",
    "pass",
    "i would google",
];

/// Category used when an answer's category has no pool of its own.
pub const GENERAL_CATEGORY: &str = "general";

fn default_follow_ups() -> BTreeMap<String, Vec<String>> {
    let pools: &[(&str, &[&str])] = &[
        (
            "technical",
            &[
                "How would your approach change if the input were ten times larger?",
                "What trade-offs did you consider between time and space complexity?",
                "How would you test this to be confident it is correct?",
            ],
        ),
        (
            "coding",
            &[
                "Can you walk through the edge cases your solution handles?",
                "What is the time complexity of your solution, and can it be improved?",
                "How would you refactor this for readability?",
            ],
        ),
        (
            "system-design",
            &[
                "Where is the single point of failure in this design?",
                "How would you scale the write path?",
                "Which consistency guarantees does this design give up, and why is that acceptable?",
            ],
        ),
        (
            "behavioral",
            &[
                "What would you do differently if you faced that situation again?",
                "How did you measure whether the outcome was a success?",
                "How did the rest of the team respond to your decision?",
            ],
        ),
        (
            GENERAL_CATEGORY,
            &[
                "Can you give a concrete example from your own work?",
                "What was the hardest part of that, and how did you handle it?",
            ],
        ),
    ];

    pools
        .iter()
        .map(|(category, questions)| {
            (
                category.to_string(),
                questions.iter().map(|q| q.to_string()).collect(),
            )
        })
        .collect()
}

/// Every vocabulary list the heuristic scorers consult, under one version tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringTables {
    pub version: String,
    pub analysis_action_verbs: Vec<String>,
    pub analysis_tech_terms: Vec<String>,
    pub analysis_count_nouns: Vec<String>,
    pub quality_action_verbs: Vec<String>,
    pub quality_tech_keywords: Vec<String>,
    pub quality_quantified_patterns: Vec<String>,
    pub interview_tech_terms: Vec<String>,
    pub interview_example_markers: Vec<String>,
    pub interview_explanation_markers: Vec<String>,
    pub interview_non_answer_markers: Vec<String>,
    /// Follow-up questions keyed by lowercase interview category.
    pub follow_up_questions: BTreeMap<String, Vec<String>>,
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for ScoringTables {
    fn default() -> Self {
        Self {
            version: TABLES_VERSION.to_string(),
            analysis_action_verbs: owned(ANALYSIS_ACTION_VERBS),
            analysis_tech_terms: owned(ANALYSIS_TECH_TERMS),
            analysis_count_nouns: owned(ANALYSIS_COUNT_NOUNS),
            quality_action_verbs: owned(QUALITY_ACTION_VERBS),
            quality_tech_keywords: owned(QUALITY_TECH_KEYWORDS),
            quality_quantified_patterns: owned(QUALITY_QUANTIFIED_PATTERNS),
            interview_tech_terms: owned(INTERVIEW_TECH_TERMS),
            interview_example_markers: owned(INTERVIEW_EXAMPLE_MARKERS),
            interview_explanation_markers: owned(INTERVIEW_EXPLANATION_MARKERS),
            interview_non_answer_markers: owned(INTERVIEW_NON_ANSWER_MARKERS),
            follow_up_questions: default_follow_ups(),
        }
    }
}

impl ScoringTables {
    /// Loads a replacement table from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scoring tables from {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Scoring tables in {} are not valid JSON", path.display()))
    }
}
