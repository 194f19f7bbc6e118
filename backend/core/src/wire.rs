//! Textract JSON wire format.
//!
//! Lets a saved `AnalyzeDocument` / `DetectDocumentText` response (as written
//! by `aws textract analyze-document`) be fed to the resolver offline.

use serde::{Deserialize, Serialize};

use crate::block::{Block, BlockKind, EntityRole, Relationship, RelationshipKind, SelectionStatus};

/// Top level of a Textract response. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WireResponse {
    #[serde(default)]
    pub blocks: Vec<WireBlock>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WireBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entity_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<WireRelationship>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WireRelationship {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    #[serde(default)]
    pub ids: Vec<String>,
}

impl WireResponse {
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// Convert to the typed block model, dropping blocks without an id.
    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks.into_iter().filter_map(WireBlock::into_block).collect()
    }
}

impl WireBlock {
    pub fn into_block(self) -> Option<Block> {
        let id = self.id?;
        let kind = block_kind(
            self.block_type.as_deref().unwrap_or_default(),
            self.entity_types.as_slice(),
            self.text,
            self.selection_status.as_deref(),
        );
        let relationships = self
            .relationships
            .into_iter()
            .map(|r| Relationship {
                kind: RelationshipKind::parse(r.r#type.as_deref().unwrap_or_default()),
                ids: r.ids,
            })
            .collect();
        Some(Block {
            id,
            kind,
            relationships,
        })
    }
}

/// Map a provider block-type tag and its optional fields to a [`BlockKind`].
///
/// Shared by every source of provider blocks so the tagging rules live in
/// one place. A WORD or LINE without text gets empty text.
pub fn block_kind<S: AsRef<str>>(
    block_type: &str,
    entity_types: &[S],
    text: Option<String>,
    selection_status: Option<&str>,
) -> BlockKind {
    match block_type {
        "KEY_VALUE_SET" => BlockKind::KeyValueSet {
            role: EntityRole::from_entity_types(entity_types),
        },
        "WORD" => BlockKind::Word {
            text: text.unwrap_or_default(),
        },
        "LINE" => BlockKind::Line {
            text: text.unwrap_or_default(),
        },
        "SELECTION_ELEMENT" => BlockKind::SelectionElement {
            status: SelectionStatus::parse(selection_status),
        },
        other => BlockKind::Other {
            block_type: other.to_string(),
            text,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::resolve_key_values;

    const FORM_RESPONSE: &str = r#"{
        "DocumentMetadata": { "Pages": 1 },
        "Blocks": [
            { "BlockType": "PAGE", "Id": "p1", "Relationships": [{ "Type": "CHILD", "Ids": ["l1"] }] },
            { "BlockType": "LINE", "Id": "l1", "Text": "Aceite: X" },
            { "BlockType": "KEY_VALUE_SET", "Id": "k1", "EntityTypes": ["KEY"], "Confidence": 91.2,
              "Relationships": [{ "Type": "VALUE", "Ids": ["v1"] }, { "Type": "CHILD", "Ids": ["w1"] }] },
            { "BlockType": "KEY_VALUE_SET", "Id": "v1", "EntityTypes": ["VALUE"],
              "Relationships": [{ "Type": "CHILD", "Ids": ["s1"] }] },
            { "BlockType": "WORD", "Id": "w1", "Text": "Aceite" },
            { "BlockType": "SELECTION_ELEMENT", "Id": "s1", "SelectionStatus": "SELECTED" },
            { "BlockType": "WORD", "Text": "orphan" }
        ]
    }"#;

    #[test]
    fn test_parses_textract_json() {
        let blocks = WireResponse::from_json(FORM_RESPONSE).unwrap().into_blocks();
        assert_eq!(blocks.len(), 6);
        assert_eq!(blocks[0].block_type(), "PAGE");
        assert_eq!(blocks[2].role(), Some(EntityRole::Key));
        assert_eq!(blocks[3].role(), Some(EntityRole::Value));
        assert_eq!(
            blocks[5].kind,
            BlockKind::SelectionElement {
                status: SelectionStatus::Selected
            }
        );
    }

    #[test]
    fn test_resolves_parsed_response() {
        let blocks = WireResponse::from_json(FORM_RESPONSE).unwrap().into_blocks();
        let result = resolve_key_values(&blocks);
        assert_eq!(result["Aceite"], "X");
    }

    #[test]
    fn test_key_value_set_without_entity_types_is_value() {
        let kind = block_kind::<&str>("KEY_VALUE_SET", &[], None, None);
        assert_eq!(
            kind,
            BlockKind::KeyValueSet {
                role: EntityRole::Value
            }
        );
    }

    #[test]
    fn test_missing_blocks_field() {
        let response = WireResponse::from_json("{}").unwrap();
        assert!(response.into_blocks().is_empty());
    }
}
