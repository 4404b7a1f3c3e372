// Prompts for AI-backed CV quality scoring over structured blocks.

use crate::cv::blocks::CvBlock;
use crate::llm_client::prompts::SCORE_RANGE_INSTRUCTION;

pub const CV_QUALITY_ROLE: &str = "You are an expert CV reviewer who scores structured CVs \
    for completeness, impact and ATS compatibility.";

/// Replace `{blocks_json}` and `{score_rules}` before sending.
pub const CV_QUALITY_PROMPT_TEMPLATE: &str = r#"Score the following structured CV. Each block has a
"blockType" and a typed "content" payload; only enabled blocks are included.

Return a JSON object with this EXACT schema:
{
  "quality": 0,
  "readability": 0,
  "ats": 0,
  "language": 0,
  "completeness": 0,
  "impact": 0,
  "keywords": 0,
  "formatting": 0,
  "suggestions": ["string"]
}

"quality" is the weighted overall score. Give at most 5 concrete suggestions, most important first.

{score_rules}

CV BLOCKS:
{blocks_json}"#;

pub fn build_quality_prompt(blocks: &[CvBlock]) -> Result<String, serde_json::Error> {
    let enabled: Vec<&CvBlock> = blocks.iter().filter(|b| b.is_enabled).collect();
    let blocks_json = serde_json::to_string_pretty(&enabled)?;
    Ok(CV_QUALITY_PROMPT_TEMPLATE
        .replace("{score_rules}", SCORE_RANGE_INSTRUCTION)
        .replace("{blocks_json}", &blocks_json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cv::blocks::{BlockContent, SummaryContent};

    #[test]
    fn test_prompt_lists_only_enabled_blocks() {
        let blocks = vec![
            CvBlock::new(BlockContent::Summary(SummaryContent {
                text: "Visible summary".to_string(),
            })),
            CvBlock::new(BlockContent::Summary(SummaryContent {
                text: "Hidden summary".to_string(),
            }))
            .disabled(),
        ];
        let prompt = build_quality_prompt(&blocks).unwrap();
        assert!(prompt.contains("Visible summary"));
        assert!(!prompt.contains("Hidden summary"));
        assert!(prompt.contains(r#""blockType": "summary""#));
        assert!(!prompt.contains("{blocks_json}"));
    }
}
