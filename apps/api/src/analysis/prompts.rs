// Prompts for AI-backed CV analysis. The response schema mirrors
// `CvAnalysisResult` so the AI and heuristic paths are interchangeable.

use crate::llm_client::prompts::SCORE_RANGE_INSTRUCTION;

pub const CV_ANALYSIS_ROLE: &str = "You are a senior technical recruiter and ATS specialist \
    reviewing a CV with healthy skepticism.";

/// Replace `{cv_text}`, `{job_section}` and `{score_rules}` before sending.
pub const CV_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the following CV.

Return a JSON object with this EXACT schema:
{
  "overallScore": 0,
  "structuralScore": 0,
  "technicalScore": 0,
  "atsScore": 0,
  "realismScore": 0,
  "structuralIssues": ["string"],
  "technicalIssues": ["string"],
  "atsIssues": ["string"],
  "realismFlags": ["string"],
  "strengths": ["string"],
  "improvements": ["string"],
  "recruiterDoubts": ["string"],
  "jobMatchScore": 0,
  "missingKeywords": ["string"],
  "filterRisk": "low" | "medium" | "high"
}

Omit "jobMatchScore" and leave "missingKeywords" empty when no job description is given.
At most 5 missing keywords, lowercase, no duplicates.

{score_rules}

CV:
{cv_text}
{job_section}"#;

pub fn build_analysis_prompt(cv_text: &str, job_description: Option<&str>) -> String {
    let job_section = match job_description.filter(|jd| !jd.trim().is_empty()) {
        Some(jd) => format!("\nJOB DESCRIPTION:\n{jd}"),
        None => String::new(),
    };
    CV_ANALYSIS_PROMPT_TEMPLATE
        .replace("{score_rules}", SCORE_RANGE_INSTRUCTION)
        .replace("{job_section}", &job_section)
        .replace("{cv_text}", cv_text)
}
