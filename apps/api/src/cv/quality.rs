//! CV quality scoring over structured blocks, the heuristic behind `/cv/score`.
//!
//! Eight axes plus a weighted overall `quality`. Only enabled blocks count, and
//! only the FIRST enabled block of each type is consulted: a second experience
//! block (or summary, skills, ...) is ignored for scoring. It still counts toward
//! the block total used by formatting.
//!
//! Suggestions are returned in the order the checks run, truncated to
//! `MAX_SUGGESTIONS`; they are not ranked by severity.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cv::blocks::{
    BlockContent, CvBlock, EducationContent, ExperienceContent, HeaderContent, ProjectsContent,
    SkillsContent, SummaryContent,
};
use crate::scoring::lexicon::count_occurrences;
use crate::scoring::{clamp_score, round_score, Lexicon, Normalize};

pub const MAX_SUGGESTIONS: usize = 5;

/// Raw completeness points that map to 100. Reachable without every optional section.
const COMPLETENESS_SCALE: f64 = 40.0;

const WEIGHT_COMPLETENESS: f64 = 0.25;
const WEIGHT_IMPACT: f64 = 0.20;
const WEIGHT_KEYWORDS: f64 = 0.15;
const WEIGHT_FORMATTING: f64 = 0.10;
const WEIGHT_READABILITY: f64 = 0.10;
const WEIGHT_ATS: f64 = 0.10;
const WEIGHT_LANGUAGE: f64 = 0.10;

const BULLET_MARKERS: &[char] = &['•', '-', '*'];
const ATS_UNSAFE_CHARS: &[char] = &['|', '→'];

pub const SUGGEST_NAME: &str = "Add your full name";
pub const SUGGEST_TITLE: &str = "Add a professional title";
pub const SUGGEST_EMAIL: &str = "Add a valid email address";
pub const SUGGEST_PHONE: &str = "Add a phone number";
pub const SUGGEST_SUMMARY_MISSING: &str = "Add a professional summary of at least 50 characters";
pub const SUGGEST_SUMMARY_EXPAND: &str =
    "Expand your summary to highlight your key strengths and goals";
pub const SUGGEST_SUMMARY_SHORTEN: &str = "Consider tightening your summary to under 300 characters";
pub const SUGGEST_SKILLS_MISSING: &str = "List at least 5 relevant skills";
pub const SUGGEST_SKILLS_MORE: &str = "Add more skills to reach at least 10";
pub const SUGGEST_EXPERIENCE_MISSING: &str = "Add your work experience";
pub const SUGGEST_EXPERIENCE_MORE: &str = "Add at least one more work experience entry";
pub const SUGGEST_EXPERIENCE_DETAIL: &str =
    "Add achievements or a description to every experience entry";
pub const SUGGEST_EDUCATION: &str = "Add your education";
pub const SUGGEST_PROJECTS_MISSING: &str = "Add projects to showcase your work";
pub const SUGGEST_PROJECTS_MORE: &str = "Add a second project to show range";
pub const SUGGEST_ATS_CHARS: &str =
    "Avoid special characters such as | and → that ATS parsers may misread";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvScores {
    pub quality: u32,
    pub readability: u32,
    pub ats: u32,
    pub language: u32,
    pub completeness: u32,
    pub impact: u32,
    pub keywords: u32,
    pub formatting: u32,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl Normalize for CvScores {
    fn normalize(mut self) -> Self {
        for score in [
            &mut self.quality,
            &mut self.readability,
            &mut self.ats,
            &mut self.language,
            &mut self.completeness,
            &mut self.impact,
            &mut self.keywords,
            &mut self.formatting,
        ] {
            *score = (*score).min(100);
        }
        self.suggestions.truncate(MAX_SUGGESTIONS);
        self
    }
}

/// The blocks the scorer actually reads: the first enabled block of each type.
#[derive(Debug, Default)]
pub struct CvView<'a> {
    pub header: Option<&'a HeaderContent>,
    pub summary: Option<&'a SummaryContent>,
    pub skills: Option<&'a SkillsContent>,
    pub experience: Option<&'a ExperienceContent>,
    pub education: Option<&'a EducationContent>,
    pub projects: Option<&'a ProjectsContent>,
    pub enabled_blocks: usize,
}

impl<'a> CvView<'a> {
    pub fn from_blocks(blocks: &'a [CvBlock]) -> Self {
        let mut view = CvView::default();
        for block in blocks.iter().filter(|b| b.is_enabled) {
            view.enabled_blocks += 1;
            match &block.content {
                BlockContent::Header(c) => {
                    view.header.get_or_insert(c);
                }
                BlockContent::Summary(c) => {
                    view.summary.get_or_insert(c);
                }
                BlockContent::Skills(c) => {
                    view.skills.get_or_insert(c);
                }
                BlockContent::Experience(c) => {
                    view.experience.get_or_insert(c);
                }
                BlockContent::Education(c) => {
                    view.education.get_or_insert(c);
                }
                BlockContent::Projects(c) => {
                    view.projects.get_or_insert(c);
                }
                BlockContent::Custom(_) => {}
            }
        }
        view
    }

    fn summary_text(&self) -> &str {
        self.summary.map(|s| s.text.trim()).unwrap_or("")
    }

    fn skills_text(&self) -> &str {
        self.skills.map(|s| s.skills.trim()).unwrap_or("")
    }

    fn experience_count(&self) -> usize {
        self.experience.map(|e| e.items.len()).unwrap_or(0)
    }

    fn education_count(&self) -> usize {
        self.education.map(|e| e.items.len()).unwrap_or(0)
    }

    fn project_count(&self) -> usize {
        self.projects.map(|p| p.items.len()).unwrap_or(0)
    }

    /// Summary, every experience description and achievement, every project description.
    pub fn corpus(&self) -> String {
        let mut parts: Vec<&str> = vec![self.summary_text()];
        if let Some(experience) = self.experience {
            for entry in &experience.items {
                parts.push(&entry.description);
                parts.extend(entry.achievements.iter().map(String::as_str));
            }
        }
        if let Some(projects) = self.projects {
            parts.extend(projects.items.iter().map(|p| p.description.as_str()));
        }
        parts
            .into_iter()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn band(count: usize) -> i64 {
    match count {
        n if n >= 5 => 40,
        n if n >= 3 => 25,
        n if n >= 1 => 10,
        _ => 0,
    }
}

fn completeness(view: &CvView, suggestions: &mut Vec<String>) -> u32 {
    let mut raw = 0.0;
    let mut suggest = |s: &str| suggestions.push(s.to_string());

    let header = view.header.cloned().unwrap_or_default();
    if char_len(header.full_name.trim()) > 2 {
        raw += 4.0;
    } else {
        suggest(SUGGEST_NAME);
    }
    if !header.professional_title.trim().is_empty() {
        raw += 4.0;
    } else {
        suggest(SUGGEST_TITLE);
    }
    if header.email.contains('@') {
        raw += 3.0;
    } else {
        suggest(SUGGEST_EMAIL);
    }
    if char_len(header.phone.trim()) > 5 {
        raw += 2.0;
    } else {
        suggest(SUGGEST_PHONE);
    }

    let summary_len = char_len(view.summary_text());
    match summary_len {
        n if n > 300 => {
            raw += 11.0;
            suggest(SUGGEST_SUMMARY_SHORTEN);
        }
        n if n > 150 => raw += 8.0,
        n if n > 50 => {
            raw += 5.0;
            suggest(SUGGEST_SUMMARY_EXPAND);
        }
        _ => suggest(SUGGEST_SUMMARY_MISSING),
    }

    let skill_count = view.skills.map(|s| s.items().count()).unwrap_or(0);
    match skill_count {
        n if n >= 10 => raw += 8.0,
        n if n >= 5 => {
            raw += 5.0;
            suggest(SUGGEST_SKILLS_MORE);
        }
        _ => suggest(SUGGEST_SKILLS_MISSING),
    }

    match view.experience_count() {
        n if n >= 2 => raw += 8.0,
        1 => {
            raw += 5.0;
            suggest(SUGGEST_EXPERIENCE_MORE);
        }
        _ => suggest(SUGGEST_EXPERIENCE_MISSING),
    }
    if view
        .experience
        .is_some_and(|e| e.items.iter().any(|entry| entry.lacks_detail()))
    {
        suggest(SUGGEST_EXPERIENCE_DETAIL);
    }

    if view.education_count() >= 1 {
        raw += 4.0;
    } else {
        suggest(SUGGEST_EDUCATION);
    }

    match view.project_count() {
        n if n >= 2 => raw += 6.0,
        1 => {
            raw += 4.0;
            suggest(SUGGEST_PROJECTS_MORE);
        }
        _ => suggest(SUGGEST_PROJECTS_MISSING),
    }

    round_score(raw * 100.0 / COMPLETENESS_SCALE)
}

fn action_verb_count(corpus_lower: &str, lexicon: &Lexicon) -> usize {
    lexicon
        .quality_action_verbs
        .iter()
        .map(|verb| count_occurrences(corpus_lower, verb))
        .sum()
}

fn impact(corpus: &str, verb_count: usize, lexicon: &Lexicon) -> u32 {
    let quantified: usize = lexicon
        .quality_quantified
        .iter()
        .map(|re| re.find_iter(corpus).count())
        .sum();
    let bullets = corpus.chars().filter(|c| BULLET_MARKERS.contains(c)).count() as i64;

    clamp_score(band(verb_count) + band(quantified) + (3 * bullets).min(20))
}

fn keywords(corpus_lower: &str, skills_lower: &str, lexicon: &Lexicon) -> u32 {
    let count: usize = lexicon
        .quality_tech_keywords
        .iter()
        .map(|kw| count_occurrences(corpus_lower, kw) + count_occurrences(skills_lower, kw))
        .sum();

    match count {
        n if n >= 10 => 100,
        n if n >= 7 => 85,
        n if n >= 5 => 70,
        n if n >= 3 => 55,
        n => clamp_score((n as i64 * 15).max(30)),
    }
}

fn formatting(view: &CvView) -> u32 {
    let mut score = 60;
    if view.enabled_blocks >= 4 {
        score += 15;
    }
    if view.enabled_blocks >= 6 {
        score += 10;
    }
    if view.header.is_some()
        && view.summary.is_some()
        && view.skills.is_some()
        && view.experience_count() >= 1
    {
        score += 15;
    }
    clamp_score(score)
}

fn readability(view: &CvView) -> u32 {
    let summary = view.summary_text();
    let mut score = 70;

    let sentences: Vec<usize> = summary
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(char_len)
        .collect();
    if !sentences.is_empty() {
        let average = sentences.iter().sum::<usize>() as f64 / sentences.len() as f64;
        if average > 0.0 && average < 150.0 {
            score += 15;
        }
    }

    let summary_len = char_len(summary);
    if summary_len > 50 && summary_len < 500 {
        score += 15;
    }
    clamp_score(score)
}

fn ats(view: &CvView, corpus: &str, suggestions: &mut Vec<String>) -> u32 {
    let mut score = 50;
    if let Some(header) = view.header {
        if !header.email.trim().is_empty() {
            score += 10;
        }
        if !header.phone.trim().is_empty() {
            score += 10;
        }
    }
    if char_len(view.skills_text()) > 20 {
        score += 15;
    }
    if view.experience_count() > 0 {
        score += 15;
    }
    if corpus.contains(ATS_UNSAFE_CHARS) {
        score -= 5;
        suggestions.push(SUGGEST_ATS_CHARS.to_string());
    }
    clamp_score(score)
}

fn language(corpus: &str, verb_count: usize) -> u32 {
    let length = char_len(corpus);
    let mut score = 70;
    if length > 500 {
        score += 10;
    }
    if length > 1000 {
        score += 10;
    }
    if verb_count >= 3 {
        score += 10;
    }
    clamp_score(score)
}

/// Scores a structured CV. Never fails; an empty block list scores near zero
/// completeness with suggestions for every missing section.
pub fn calculate_cv_scores(blocks: &[CvBlock], lexicon: &Lexicon) -> CvScores {
    let view = CvView::from_blocks(blocks);
    let corpus = view.corpus();
    let corpus_lower = corpus.to_lowercase();
    let skills_lower = view.skills_text().to_lowercase();
    let verb_count = action_verb_count(&corpus_lower, lexicon);

    let mut suggestions = Vec::new();
    let completeness = completeness(&view, &mut suggestions);
    let impact = impact(&corpus, verb_count, lexicon);
    let keywords = keywords(&corpus_lower, &skills_lower, lexicon);
    let formatting = formatting(&view);
    let readability = readability(&view);
    let ats = ats(&view, &corpus, &mut suggestions);
    let language = language(&corpus, verb_count);

    let quality = round_score(
        completeness as f64 * WEIGHT_COMPLETENESS
            + impact as f64 * WEIGHT_IMPACT
            + keywords as f64 * WEIGHT_KEYWORDS
            + formatting as f64 * WEIGHT_FORMATTING
            + readability as f64 * WEIGHT_READABILITY
            + ats as f64 * WEIGHT_ATS
            + language as f64 * WEIGHT_LANGUAGE,
    );

    debug!(
        enabled_blocks = view.enabled_blocks,
        verb_count,
        suggestion_count = suggestions.len(),
        "CV quality scored"
    );
    suggestions.truncate(MAX_SUGGESTIONS);

    CvScores {
        quality,
        readability,
        ats,
        language,
        completeness,
        impact,
        keywords,
        formatting,
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cv::blocks::{CustomContent, EducationEntry, ExperienceEntry, ProjectEntry};
    use crate::scoring::lexicon::DEFAULT_LEXICON;

    fn score(blocks: &[CvBlock]) -> CvScores {
        calculate_cv_scores(blocks, &DEFAULT_LEXICON)
    }

    fn header(name: &str, title: &str, email: &str, phone: &str) -> CvBlock {
        CvBlock::new(BlockContent::Header(HeaderContent {
            full_name: name.to_string(),
            professional_title: title.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            ..HeaderContent::default()
        }))
    }

    fn summary(text: &str) -> CvBlock {
        CvBlock::new(BlockContent::Summary(SummaryContent {
            text: text.to_string(),
        }))
    }

    fn skills(text: &str) -> CvBlock {
        CvBlock::new(BlockContent::Skills(SkillsContent {
            skills: text.to_string(),
        }))
    }

    fn experience(achievements: &[&[&str]]) -> CvBlock {
        CvBlock::new(BlockContent::Experience(ExperienceContent {
            items: achievements
                .iter()
                .map(|a| ExperienceEntry {
                    company: "Acme".to_string(),
                    position: "Engineer".to_string(),
                    achievements: a.iter().map(|s| s.to_string()).collect(),
                    ..ExperienceEntry::default()
                })
                .collect(),
        }))
    }

    fn education() -> CvBlock {
        CvBlock::new(BlockContent::Education(EducationContent {
            items: vec![EducationEntry {
                institution: "MIT".to_string(),
                degree: "BSc".to_string(),
                ..EducationEntry::default()
            }],
        }))
    }

    fn projects(descriptions: &[&str]) -> CvBlock {
        CvBlock::new(BlockContent::Projects(ProjectsContent {
            items: descriptions
                .iter()
                .map(|d| ProjectEntry {
                    name: "Project".to_string(),
                    description: d.to_string(),
                    ..ProjectEntry::default()
                })
                .collect(),
        }))
    }

    const STRONG_SUMMARY: &str = "Backend engineer with eight years of experience building \
        distributed systems. Led platform teams and delivered reliable services at scale. \
        Passionate about mentoring engineers and improving developer experience.";

    fn strong_cv() -> Vec<CvBlock> {
        vec![
            header("Jane Doe", "Senior Engineer", "jane@example.com", "+1 555 0100"),
            summary(STRONG_SUMMARY),
            skills("Python, Java, React, SQL, AWS, Docker, Kubernetes, Git, Agile, Scrum"),
            experience(&[
                &[
                    "• Led migration of 12 services to Kubernetes, cutting costs by 30%",
                    "• Developed API serving 2000 users with $50000 annual savings",
                ],
                &[
                    "• Implemented CI/CD pipelines for 40+ projects",
                    "• Reduced latency by 45% and increased uptime to 99%",
                ],
            ]),
            education(),
            projects(&[
                "Built an open-source Python cloud cost dashboard",
                "Designed a React microservices demo used by 300 users",
            ]),
        ]
    }

    fn all_scores(s: &CvScores) -> [u32; 8] {
        [
            s.quality,
            s.readability,
            s.ats,
            s.language,
            s.completeness,
            s.impact,
            s.keywords,
            s.formatting,
        ]
    }

    #[test]
    fn test_empty_header_only_scores_zero_completeness() {
        let scores = score(&[header("", "", "", "")]);
        assert_eq!(scores.completeness, 0);
        assert!(scores.suggestions.contains(&SUGGEST_NAME.to_string()));
        assert!(scores.suggestions.contains(&SUGGEST_TITLE.to_string()));
    }

    #[test]
    fn test_suggestions_capped_at_five_in_check_order() {
        let scores = score(&[]);
        assert_eq!(scores.suggestions.len(), MAX_SUGGESTIONS);
        assert_eq!(
            scores.suggestions,
            vec![
                SUGGEST_NAME,
                SUGGEST_TITLE,
                SUGGEST_EMAIL,
                SUGGEST_PHONE,
                SUGGEST_SUMMARY_MISSING
            ]
        );
    }

    #[test]
    fn test_empty_cv_scores_baselines() {
        let scores = score(&[]);
        assert_eq!(scores.completeness, 0);
        assert_eq!(scores.impact, 0);
        assert_eq!(scores.keywords, 30);
        assert_eq!(scores.formatting, 60);
        assert_eq!(scores.readability, 70);
        assert_eq!(scores.ats, 50);
        assert_eq!(scores.language, 70);
        assert!((29..=30).contains(&scores.quality));
    }

    #[test]
    fn test_strong_cv_scores_high() {
        let scores = score(&strong_cv());
        assert_eq!(scores.completeness, 100);
        assert_eq!(scores.formatting, 100);
        assert_eq!(scores.ats, 100);
        assert_eq!(scores.keywords, 100);
        assert!(scores.impact >= 80, "impact was {}", scores.impact);
        assert!(scores.quality >= 85, "quality was {}", scores.quality);
        assert!(scores.suggestions.is_empty(), "{:?}", scores.suggestions);
    }

    #[test]
    fn test_all_scores_in_range() {
        for blocks in [vec![], strong_cv(), vec![header("", "", "", "")]] {
            for s in all_scores(&score(&blocks)) {
                assert!(s <= 100);
            }
        }
    }

    #[test]
    fn test_disabled_blocks_are_ignored() {
        let blocks: Vec<CvBlock> = strong_cv().into_iter().map(CvBlock::disabled).collect();
        assert_eq!(score(&blocks), score(&[]));
    }

    #[test]
    fn test_only_first_block_of_each_type_counts() {
        let mut blocks = vec![experience(&[&["Handled tickets"]])];
        blocks.push(experience(&[&["Led a team"], &["Led another team"], &["Built things"]]));
        let view = CvView::from_blocks(&blocks);
        assert_eq!(view.experience_count(), 1);
        assert_eq!(view.enabled_blocks, 2);

        assert_eq!(
            score(&blocks).completeness,
            score(&blocks[..1]).completeness
        );
    }

    #[test]
    fn test_disabled_first_block_lets_next_one_count() {
        let blocks = vec![summary("First summary").disabled(), summary(STRONG_SUMMARY)];
        let view = CvView::from_blocks(&blocks);
        assert_eq!(view.summary_text(), STRONG_SUMMARY);
    }

    #[test]
    fn test_summary_tiers() {
        let tier = |len: usize| {
            let scores = score(&[summary(&"a".repeat(len))]);
            scores.completeness
        };
        // 0 → 0, 51 → 5/40, 151 → 8/40, 301 → 11/40
        assert_eq!(tier(10), 0);
        assert_eq!(tier(51), 13);
        assert_eq!(tier(151), 20);
        assert_eq!(tier(301), 28);
    }

    #[test]
    fn test_long_summary_suggests_shortening() {
        let blocks = vec![
            header("Jane Doe", "Engineer", "jane@example.com", "555-0100"),
            summary(&"word ".repeat(80)),
        ];
        let scores = score(&blocks);
        assert_eq!(scores.suggestions[0], SUGGEST_SUMMARY_SHORTEN);
    }

    #[test]
    fn test_more_action_verbs_never_lower_impact() {
        let few = score(&[summary("Led the team.")]);
        let many = score(&[summary(
            "Led the team. Developed the API. Designed the schema. Built the CI. Launched v2.",
        )]);
        assert!(many.impact >= few.impact);
        assert!(many.language >= few.language);
    }

    #[test]
    fn test_more_quantified_results_never_lower_impact() {
        let one = score(&[experience(&[&["Grew revenue 10%"]])]);
        let five = score(&[experience(&[&[
            "Grew revenue 10%, saved $500, shipped 20+ features, served 300 users, 4 years",
        ]])]);
        assert!(five.impact > one.impact);
    }

    #[test]
    fn test_bullet_points_capped_at_twenty() {
        let scores = score(&[summary(&"• ".repeat(30))]);
        assert_eq!(scores.impact, 20);
    }

    #[test]
    fn test_ats_penalizes_pipes_and_arrows() {
        let plain = score(&[summary("Engineer at Acme")]);
        let piped = score(&[summary("Engineer | Acme → Globex")]);
        assert_eq!(plain.ats - piped.ats, 5);
    }

    #[test]
    fn test_keyword_bands() {
        let with = |skills_text: &str| score(&[skills(skills_text)]).keywords;
        assert_eq!(with(""), 30);
        assert_eq!(with("sql, docker, aws"), 55);
        assert_eq!(with("sql, docker, aws, azure, scrum"), 70);
    }

    #[test]
    fn test_formatting_counts_custom_blocks() {
        let custom = || CvBlock::new(BlockContent::Custom(CustomContent::default()));
        let scores = score(&[custom(), custom(), custom(), custom()]);
        assert_eq!(scores.formatting, 75);
    }

    #[test]
    fn test_entry_without_detail_gets_suggestion() {
        let blocks = vec![
            header("Jane Doe", "Engineer", "jane@example.com", "555-0100"),
            summary(STRONG_SUMMARY),
            skills("Rust, Go, SQL, Docker, AWS, Git, Linux, Kafka, Redis, gRPC"),
            experience(&[&["Led things"], &[]]),
        ];
        let scores = score(&blocks);
        assert_eq!(scores.suggestions[0], SUGGEST_EXPERIENCE_DETAIL);
    }

    #[test]
    fn test_quality_is_weighted_sum() {
        let s = score(&strong_cv());
        let expected = (s.completeness as f64 * 0.25
            + s.impact as f64 * 0.20
            + s.keywords as f64 * 0.15
            + s.formatting as f64 * 0.10
            + s.readability as f64 * 0.10
            + s.ats as f64 * 0.10
            + s.language as f64 * 0.10)
            .round() as u32;
        assert_eq!(s.quality, expected);
    }

    #[test]
    fn test_normalize_truncates_ai_suggestions() {
        let scores = CvScores {
            quality: 120,
            readability: 50,
            ats: 50,
            language: 50,
            completeness: 50,
            impact: 50,
            keywords: 50,
            formatting: 50,
            suggestions: (0..8).map(|i| format!("s{i}")).collect(),
        }
        .normalize();
        assert_eq!(scores.quality, 100);
        assert_eq!(scores.suggestions.len(), MAX_SUGGESTIONS);
    }
}
