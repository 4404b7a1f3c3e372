//! Heuristic CV analysis, the scorer behind `/cv/analyze` when the AI path fails.
//!
//! Signal extraction is deterministic; each axis score then receives a bounded
//! random jitter so that near-identical CVs do not come back with identical
//! numbers. The jitter is intentional variability, drawn from the caller's
//! `Jitter` source, and symmetric: each axis moves up or down by at most
//! `ANALYSIS_JITTER_RADIUS` around its base.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::keywords::{match_job_description, MAX_MISSING_KEYWORDS};
use crate::scoring::{clamp_score, round_score, Jitter, Lexicon, Normalize};

/// Each axis score is offset by a uniform integer in `[-ANALYSIS_JITTER_RADIUS, ANALYSIS_JITTER_RADIUS]`.
pub const ANALYSIS_JITTER_RADIUS: u32 = 7;

const STRUCTURAL_BASE: i64 = 42;
const TECHNICAL_BASE: i64 = 37;
const ATS_BASE: i64 = 42;
const REALISM_BASE: i64 = 47;

/// Below this many characters the CV is flagged as too thin for ATS extraction.
pub const SHORT_CV_CHARS: usize = 500;
const DETAILED_CV_CHARS: usize = 1000;

pub const ISSUE_NO_ACTION_VERBS: &str =
    "Few strong action verbs; responsibilities read as passive duties";
pub const ISSUE_NO_TECH_SKILLS: &str = "No recognizable technical skills or tools were found";
pub const ISSUE_TOO_SHORT: &str =
    "CV text is too short for applicant tracking systems to extract meaningful content";
pub const FLAG_NOT_QUANTIFIED: &str =
    "Achievements are not quantified, so their impact cannot be verified";

pub const IMPROVE_ACTION_VERBS: &str =
    "Start each bullet with a strong action verb such as Led, Built or Reduced";
pub const IMPROVE_TECH_SKILLS: &str =
    "Add a skills section naming the languages, frameworks and tools you use";
pub const IMPROVE_LENGTH: &str =
    "Expand your experience section with concrete responsibilities and results";
pub const IMPROVE_QUANTIFY: &str = "Quantify achievements with numbers, percentages or team sizes";

pub const STRENGTH_QUANTIFIED: &str = "Achievements are backed by quantified results";
pub const STRENGTH_TECH_SKILLS: &str = "Lists concrete technical skills and tools";
pub const STRENGTH_ACTION_VERBS: &str = "Uses strong action verbs to describe experience";
pub const STRENGTH_DETAILED: &str = "Gives enough detail for a recruiter to assess the experience";

pub const DOUBT_LOW_SCORE: &str =
    "The CV does not yet make a convincing case for the role; a recruiter may move on quickly.";
pub const DOUBT_NOT_QUANTIFIED: &str =
    "Without numbers it is hard to tell how much of the claimed impact was the candidate's own.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterRisk {
    Low,
    Medium,
    #[default]
    High,
}

impl FilterRisk {
    pub fn from_overall(overall_score: u32) -> Self {
        if overall_score < 50 {
            FilterRisk::High
        } else if overall_score < 70 {
            FilterRisk::Medium
        } else {
            FilterRisk::Low
        }
    }
}

/// Boolean signals extracted from raw CV text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CvSignals {
    pub has_quantified_achievements: bool,
    pub has_technical_skills: bool,
    pub has_action_verbs: bool,
    pub text_length: usize,
}

pub fn detect_signals(cv_text: &str, lexicon: &Lexicon) -> CvSignals {
    CvSignals {
        has_quantified_achievements: lexicon.analysis_quantified.is_match(cv_text),
        has_technical_skills: lexicon.analysis_tech.is_match(cv_text),
        has_action_verbs: lexicon.analysis_action.is_match(cv_text),
        text_length: cv_text.trim().chars().count(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvAnalysisResult {
    pub overall_score: u32,
    pub structural_score: u32,
    pub technical_score: u32,
    pub ats_score: u32,
    pub realism_score: u32,
    #[serde(default)]
    pub structural_issues: Vec<String>,
    #[serde(default)]
    pub technical_issues: Vec<String>,
    #[serde(default)]
    pub ats_issues: Vec<String>,
    #[serde(default)]
    pub realism_flags: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
    #[serde(default)]
    pub recruiter_doubts: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_match_score: Option<u32>,
    #[serde(default)]
    pub missing_keywords: Vec<String>,
    #[serde(default)]
    pub filter_risk: FilterRisk,
}

impl Normalize for CvAnalysisResult {
    fn normalize(mut self) -> Self {
        for score in [
            &mut self.overall_score,
            &mut self.structural_score,
            &mut self.technical_score,
            &mut self.ats_score,
            &mut self.realism_score,
        ] {
            *score = (*score).min(100);
        }
        self.job_match_score = self.job_match_score.map(|s| s.min(100));

        let mut seen = std::collections::HashSet::new();
        self.missing_keywords = self
            .missing_keywords
            .into_iter()
            .map(|k| k.to_lowercase())
            .filter(|k| seen.insert(k.clone()))
            .take(MAX_MISSING_KEYWORDS)
            .collect();

        self.filter_risk = FilterRisk::from_overall(self.overall_score);
        self
    }
}

/// Points for sheer volume of text; a longer CV gives a parser more to work with.
fn length_points(text_length: usize) -> i64 {
    match text_length {
        n if n >= 2000 => 20,
        n if n >= DETAILED_CV_CHARS => 15,
        n if n >= SHORT_CV_CHARS => 10,
        n if n >= 200 => 5,
        _ => 0,
    }
}

fn points(signal: bool, value: i64) -> i64 {
    if signal {
        value
    } else {
        0
    }
}

/// Scores raw CV text on structure, technical depth, ATS-friendliness and realism.
///
/// Never fails: empty text yields all signals false, the minimum base scores and
/// a populated issue list on every axis.
pub fn analyze_fallback(
    cv_text: &str,
    job_description: Option<&str>,
    lexicon: &Lexicon,
    rng: &mut dyn Jitter,
) -> CvAnalysisResult {
    let signals = detect_signals(cv_text, lexicon);
    debug!(?signals, "CV analysis signals");

    let length = length_points(signals.text_length);
    let radius = ANALYSIS_JITTER_RADIUS as i64;
    let mut jitter = || rng.roll(2 * ANALYSIS_JITTER_RADIUS + 1) as i64 - radius;

    let structural_score = clamp_score(
        STRUCTURAL_BASE + length + points(signals.has_action_verbs, 10) + jitter(),
    );
    let technical_score = clamp_score(
        TECHNICAL_BASE
            + points(signals.has_technical_skills, 25)
            + points(signals.text_length >= DETAILED_CV_CHARS, 10)
            + jitter(),
    );
    let ats_score = clamp_score(
        ATS_BASE
            + points(signals.has_technical_skills, 15)
            + points(signals.has_action_verbs, 10)
            + length / 2
            + jitter(),
    );
    let realism_score = clamp_score(
        REALISM_BASE
            + points(signals.has_quantified_achievements, 20)
            + points(signals.has_action_verbs, 5)
            + jitter(),
    );

    let overall_score = round_score(
        (structural_score + technical_score + ats_score + realism_score) as f64 / 4.0,
    );

    let mut result = CvAnalysisResult {
        overall_score,
        structural_score,
        technical_score,
        ats_score,
        realism_score,
        structural_issues: Vec::new(),
        technical_issues: Vec::new(),
        ats_issues: Vec::new(),
        realism_flags: Vec::new(),
        strengths: Vec::new(),
        improvements: Vec::new(),
        recruiter_doubts: Vec::new(),
        job_match_score: None,
        missing_keywords: Vec::new(),
        filter_risk: FilterRisk::from_overall(overall_score),
    };

    apply_signal_rules(&signals, &mut result);

    if let Some(job_description) = job_description.filter(|jd| !jd.trim().is_empty()) {
        let job_match = match_job_description(cv_text, job_description);
        if !job_match.missing_keywords.is_empty() {
            result.ats_issues.push(format!(
                "Missing keywords from the job description: {}",
                job_match.missing_keywords.join(", ")
            ));
        }
        result.job_match_score = job_match.score;
        result.missing_keywords = job_match.missing_keywords;
    }

    if overall_score < 50 {
        result.recruiter_doubts.push(DOUBT_LOW_SCORE.to_string());
    }
    if !signals.has_quantified_achievements {
        result.recruiter_doubts.push(DOUBT_NOT_QUANTIFIED.to_string());
    }

    result
}

/// Each absent signal contributes exactly one issue and one improvement; each
/// present signal contributes a strength.
fn apply_signal_rules(signals: &CvSignals, result: &mut CvAnalysisResult) {
    if signals.has_action_verbs {
        result.strengths.push(STRENGTH_ACTION_VERBS.to_string());
    } else {
        result.structural_issues.push(ISSUE_NO_ACTION_VERBS.to_string());
        result.improvements.push(IMPROVE_ACTION_VERBS.to_string());
    }

    if signals.has_technical_skills {
        result.strengths.push(STRENGTH_TECH_SKILLS.to_string());
    } else {
        result.technical_issues.push(ISSUE_NO_TECH_SKILLS.to_string());
        result.improvements.push(IMPROVE_TECH_SKILLS.to_string());
    }

    if signals.text_length < SHORT_CV_CHARS {
        result.ats_issues.push(ISSUE_TOO_SHORT.to_string());
        result.improvements.push(IMPROVE_LENGTH.to_string());
    } else if signals.text_length >= DETAILED_CV_CHARS {
        result.strengths.push(STRENGTH_DETAILED.to_string());
    }

    if signals.has_quantified_achievements {
        result.strengths.push(STRENGTH_QUANTIFIED.to_string());
    } else {
        result.realism_flags.push(FLAG_NOT_QUANTIFIED.to_string());
        result.improvements.push(IMPROVE_QUANTIFY.to_string());
    }
}
