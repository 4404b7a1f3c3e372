//! CV blocks: typed, independently toggleable sections of a structured CV.
//!
//! On the wire a block is `{id, blockType, isEnabled, order, content}` with a
//! `content` shape that depends on `blockType`. Here each block type owns a typed
//! payload; missing payload fields default to empty.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Header,
    Summary,
    Skills,
    Experience,
    Education,
    Projects,
    Custom,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeaderContent {
    pub full_name: String,
    pub professional_title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub website: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SummaryContent {
    pub text: String,
}

/// Skills as entered: one free-text list separated by commas or semicolons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillsContent {
    pub skills: String,
}

impl SkillsContent {
    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.skills
            .split([',', ';'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    pub company: String,
    pub position: String,
    pub dates: String,
    pub description: String,
    pub achievements: Vec<String>,
}

impl ExperienceEntry {
    /// True when neither a description nor any achievement has text.
    pub fn lacks_detail(&self) -> bool {
        self.description.trim().is_empty() && self.achievements.iter().all(|a| a.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceContent {
    pub items: Vec<ExperienceEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub dates: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationContent {
    pub items: Vec<EducationEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    pub technologies: String,
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectsContent {
    pub items: Vec<ProjectEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomContent {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BlockContent {
    Header(HeaderContent),
    Summary(SummaryContent),
    Skills(SkillsContent),
    Experience(ExperienceContent),
    Education(EducationContent),
    Projects(ProjectsContent),
    Custom(CustomContent),
}

impl BlockContent {
    pub fn block_type(&self) -> BlockType {
        match self {
            BlockContent::Header(_) => BlockType::Header,
            BlockContent::Summary(_) => BlockType::Summary,
            BlockContent::Skills(_) => BlockType::Skills,
            BlockContent::Experience(_) => BlockType::Experience,
            BlockContent::Education(_) => BlockType::Education,
            BlockContent::Projects(_) => BlockType::Projects,
            BlockContent::Custom(_) => BlockType::Custom,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBlock", into = "RawBlock")]
pub struct CvBlock {
    pub id: String,
    pub order: u32,
    pub is_enabled: bool,
    pub content: BlockContent,
}

impl CvBlock {
    #[cfg(test)]
    pub fn new(content: BlockContent) -> Self {
        Self {
            id: String::new(),
            order: 0,
            is_enabled: true,
            content,
        }
    }

    #[cfg(test)]
    pub fn disabled(mut self) -> Self {
        self.is_enabled = false;
        self
    }

    pub fn block_type(&self) -> BlockType {
        self.content.block_type()
    }
}

/// Wire form of a block, before its payload is typed.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBlock {
    #[serde(default)]
    id: String,
    block_type: BlockType,
    #[serde(default = "enabled_by_default")]
    is_enabled: bool,
    #[serde(default)]
    order: u32,
    #[serde(default)]
    content: Value,
}

fn enabled_by_default() -> bool {
    true
}

fn typed<T: DeserializeOwned + Default>(content: Value) -> Result<T, serde_json::Error> {
    if content.is_null() {
        Ok(T::default())
    } else {
        serde_json::from_value(content)
    }
}

impl TryFrom<RawBlock> for CvBlock {
    type Error = serde_json::Error;

    fn try_from(raw: RawBlock) -> Result<Self, Self::Error> {
        let content = match raw.block_type {
            BlockType::Header => BlockContent::Header(typed(raw.content)?),
            BlockType::Summary => BlockContent::Summary(typed(raw.content)?),
            BlockType::Skills => BlockContent::Skills(typed(raw.content)?),
            BlockType::Experience => BlockContent::Experience(typed(raw.content)?),
            BlockType::Education => BlockContent::Education(typed(raw.content)?),
            BlockType::Projects => BlockContent::Projects(typed(raw.content)?),
            BlockType::Custom => BlockContent::Custom(typed(raw.content)?),
        };
        Ok(Self {
            id: raw.id,
            order: raw.order,
            is_enabled: raw.is_enabled,
            content,
        })
    }
}

impl From<CvBlock> for RawBlock {
    fn from(block: CvBlock) -> Self {
        let block_type = block.block_type();
        let content = match block.content {
            BlockContent::Header(c) => serde_json::to_value(c),
            BlockContent::Summary(c) => serde_json::to_value(c),
            BlockContent::Skills(c) => serde_json::to_value(c),
            BlockContent::Experience(c) => serde_json::to_value(c),
            BlockContent::Education(c) => serde_json::to_value(c),
            BlockContent::Projects(c) => serde_json::to_value(c),
            BlockContent::Custom(c) => serde_json::to_value(c),
        }
        .unwrap_or(Value::Null);
        Self {
            id: block.id,
            block_type,
            is_enabled: block.is_enabled,
            order: block.order,
            content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_experience_block_deserializes_typed_payload() {
        let block: CvBlock = serde_json::from_value(json!({
            "id": "b-3",
            "blockType": "experience",
            "isEnabled": true,
            "order": 3,
            "content": {
                "items": [{
                    "company": "Acme",
                    "position": "Engineer",
                    "dates": "2020 - 2023",
                    "achievements": ["Reduced build time by 40%"]
                }]
            }
        }))
        .unwrap();

        assert_eq!(block.block_type(), BlockType::Experience);
        assert_eq!(block.order, 3);
        match &block.content {
            BlockContent::Experience(exp) => {
                assert_eq!(exp.items.len(), 1);
                assert_eq!(exp.items[0].company, "Acme");
                assert!(exp.items[0].description.is_empty());
                assert!(!exp.items[0].lacks_detail());
            }
            other => panic!("expected experience, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_fields_default() {
        let block: CvBlock = serde_json::from_value(json!({
            "blockType": "header",
            "content": {"fullName": "Ada"}
        }))
        .unwrap();
        assert!(block.is_enabled, "blocks are enabled unless stated otherwise");
        match block.content {
            BlockContent::Header(h) => {
                assert_eq!(h.full_name, "Ada");
                assert!(h.email.is_empty());
            }
            other => panic!("expected header, got {other:?}"),
        }
    }

    #[test]
    fn test_null_content_is_empty_payload() {
        let block: CvBlock =
            serde_json::from_value(json!({"blockType": "summary", "content": null})).unwrap();
        assert_eq!(block.content, BlockContent::Summary(SummaryContent::default()));
    }

    #[test]
    fn test_unknown_block_type_is_rejected() {
        let result = serde_json::from_value::<CvBlock>(json!({"blockType": "hobbies"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_mistyped_payload_is_rejected() {
        let result = serde_json::from_value::<CvBlock>(json!({
            "blockType": "experience",
            "content": {"items": "not a list"}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_serializes_back_to_wire_shape() {
        let block = CvBlock::new(BlockContent::Skills(SkillsContent {
            skills: "Rust, Go".to_string(),
        }));
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value["blockType"], "skills");
        assert_eq!(value["isEnabled"], true);
        assert_eq!(value["content"]["skills"], "Rust, Go");
    }

    #[test]
    fn test_skill_items_split_on_commas_and_semicolons() {
        let skills = SkillsContent {
            skills: "Rust, Go; SQL,, ;Docker".to_string(),
        };
        assert_eq!(skills.items().collect::<Vec<_>>(), vec!["Rust", "Go", "SQL", "Docker"]);
    }

    #[test]
    fn test_entry_without_text_lacks_detail() {
        let entry = ExperienceEntry {
            achievements: vec!["  ".to_string()],
            ..ExperienceEntry::default()
        };
        assert!(entry.lacks_detail());
    }
}
