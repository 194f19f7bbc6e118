//! Block graph resolver.
//!
//! Turns the flat block list of one provider response into form key/value
//! pairs, and reconstructs the text of a block by walking its CHILD links.
//! Everything here is built per response and dropped with it.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::trace;

use crate::block::{Block, BlockKind, EntityRole, RelationshipKind, SelectionStatus};

/// Final form-field mapping, in KEY block order.
pub type KeyValueResult = IndexMap<String, String>;

/// Indexed view over the blocks of a single response.
#[derive(Debug, Default)]
pub struct BlockGraph<'a> {
    index: HashMap<&'a str, &'a Block>,
    keys: IndexMap<&'a str, &'a Block>,
    values: IndexMap<&'a str, &'a Block>,
}

impl<'a> BlockGraph<'a> {
    /// Index the blocks in one pass.
    ///
    /// A later block with a duplicate id replaces the earlier one in the id
    /// index and in the role map it belongs to.
    pub fn index(blocks: &'a [Block]) -> Self {
        let mut graph = Self {
            index: HashMap::with_capacity(blocks.len()),
            ..Default::default()
        };

        for block in blocks {
            let id = block.id.as_str();
            graph.index.insert(id, block);

            match block.role() {
                Some(EntityRole::Key) => {
                    graph.keys.insert(id, block);
                }
                Some(EntityRole::Value) => {
                    graph.values.insert(id, block);
                }
                None => {}
            }
        }

        trace!(
            blocks = graph.index.len(),
            keys = graph.keys.len(),
            values = graph.values.len(),
            "Indexed block graph"
        );
        graph
    }

    pub fn get(&self, id: &str) -> Option<&'a Block> {
        self.index.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// KEY blocks in indexing order.
    pub fn key_blocks(&self) -> impl Iterator<Item = &'a Block> + '_ {
        self.keys.values().copied()
    }

    /// Value blocks in indexing order.
    pub fn value_blocks(&self) -> impl Iterator<Item = &'a Block> + '_ {
        self.values.values().copied()
    }

    /// Find the value block paired with a KEY block.
    ///
    /// Only the first VALUE relationship is consulted, and within it the
    /// first id present among the value blocks wins.
    pub fn value_block(&self, key: &Block) -> Option<&'a Block> {
        let relationship = key
            .relationships
            .iter()
            .find(|r| r.kind == RelationshipKind::Value)?;

        relationship
            .ids
            .iter()
            .find_map(|id| self.values.get(id.as_str()).copied())
    }

    /// Reconstruct the text of a block from its CHILD words and selections.
    ///
    /// Absent blocks, blocks without relationships and dangling child ids
    /// all contribute nothing.
    pub fn text_of(&self, block: Option<&Block>) -> String {
        let Some(block) = block else {
            return String::new();
        };

        let mut text = String::new();
        for relationship in &block.relationships {
            if relationship.kind != RelationshipKind::Child {
                continue;
            }
            for child_id in &relationship.ids {
                let Some(child) = self.get(child_id) else {
                    trace!(parent = %block.id, child = %child_id, "Skipping dangling child id");
                    continue;
                };
                match &child.kind {
                    BlockKind::Word { text: word } => {
                        text.push_str(word);
                        text.push(' ');
                    }
                    BlockKind::SelectionElement {
                        status: SelectionStatus::Selected,
                    } => text.push_str("X "),
                    _ => {}
                }
            }
        }

        text.trim().to_string()
    }

    /// Assemble the key-text → value-text mapping.
    ///
    /// KEY blocks whose text reconstructs to "" are left out. Keys
    /// reconstructing to the same text collapse to one entry holding the
    /// value of the last such key.
    pub fn key_values(&self) -> KeyValueResult {
        let mut result = KeyValueResult::with_capacity(self.keys.len());

        for key_block in self.key_blocks() {
            let value_block = self.value_block(key_block);
            let key = self.text_of(Some(key_block));
            if key.is_empty() {
                trace!(block = %key_block.id, "Skipping key with empty text");
                continue;
            }
            let value = self.text_of(value_block);
            if value_block.is_none() {
                trace!(key = %key, block = %key_block.id, "Key has no resolvable value block");
            }
            result.insert(key, value);
        }

        result
    }
}

/// Resolve the form key/value mapping of a response in one call.
pub fn resolve_key_values(blocks: &[Block]) -> KeyValueResult {
    BlockGraph::index(blocks).key_values()
}

/// Join the texts of LINE blocks, in response order, with newlines.
pub fn join_lines(blocks: &[Block]) -> String {
    blocks
        .iter()
        .filter_map(|block| match &block.kind {
            BlockKind::Line { text } => Some(text.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}
