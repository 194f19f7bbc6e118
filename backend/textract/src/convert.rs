//! SDK block → core block conversion.

use aws_sdk_textract::types as sdk;
use formscan_core::wire::block_kind;
use formscan_core::{Block, Relationship, RelationshipKind};

/// Convert one SDK block. Blocks without an id cannot be referenced and are dropped.
pub fn convert_block(block: &sdk::Block) -> Option<Block> {
    let id = block.id()?.to_string();

    let entity_types: Vec<&str> = block.entity_types().iter().map(|t| t.as_str()).collect();
    let kind = block_kind(
        block.block_type().map(|t| t.as_str()).unwrap_or_default(),
        entity_types.as_slice(),
        block.text().map(str::to_string),
        block.selection_status().map(|s| s.as_str()),
    );

    let relationships = block
        .relationships()
        .iter()
        .map(|r| Relationship {
            kind: RelationshipKind::parse(r.r#type().map(|t| t.as_str()).unwrap_or_default()),
            ids: r.ids().to_vec(),
        })
        .collect();

    Some(Block {
        id,
        kind,
        relationships,
    })
}

/// Convert every block of a response, keeping response order.
pub fn convert_blocks(blocks: &[sdk::Block]) -> Vec<Block> {
    blocks.iter().filter_map(convert_block).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_textract::types::{BlockType, EntityType, RelationshipType, SelectionStatus};
    use formscan_core::{resolve_key_values, BlockKind, EntityRole};

    fn relationship(kind: RelationshipType, ids: &[&str]) -> sdk::Relationship {
        ids.iter()
            .fold(sdk::Relationship::builder().r#type(kind), |b, id| b.ids(*id))
            .build()
    }

    fn word(id: &str, text: &str) -> sdk::Block {
        sdk::Block::builder()
            .id(id)
            .block_type(BlockType::Word)
            .text(text)
            .build()
    }

    #[test]
    fn converts_key_value_pair() {
        let blocks = vec![
            sdk::Block::builder()
                .id("k1")
                .block_type(BlockType::KeyValueSet)
                .entity_types(EntityType::Key)
                .relationships(relationship(RelationshipType::Value, &["v1"]))
                .relationships(relationship(RelationshipType::Child, &["w1", "w2"]))
                .build(),
            sdk::Block::builder()
                .id("v1")
                .block_type(BlockType::KeyValueSet)
                .entity_types(EntityType::Value)
                .relationships(relationship(RelationshipType::Child, &["w3"]))
                .build(),
            word("w1", "Nosso"),
            word("w2", "Número"),
            word("w3", "0001234-5"),
        ];

        let converted = convert_blocks(&blocks);
        assert_eq!(converted.len(), 5);
        assert_eq!(converted[0].role(), Some(EntityRole::Key));
        assert_eq!(converted[0].relationships[1].ids, vec!["w1", "w2"]);

        let fields = resolve_key_values(&converted);
        assert_eq!(fields["Nosso Número"], "0001234-5");
    }

    #[test]
    fn converts_selection_and_unknown_types() {
        let blocks = vec![
            sdk::Block::builder()
                .id("s1")
                .block_type(BlockType::SelectionElement)
                .selection_status(SelectionStatus::Selected)
                .build(),
            sdk::Block::builder().id("p1").block_type(BlockType::Page).build(),
            sdk::Block::builder().block_type(BlockType::Word).text("no id").build(),
        ];

        let converted = convert_blocks(&blocks);
        assert_eq!(converted.len(), 2);
        assert_eq!(
            converted[0].kind,
            BlockKind::SelectionElement {
                status: formscan_core::SelectionStatus::Selected
            }
        );
        assert_eq!(converted[1].block_type(), "PAGE");
    }
}
