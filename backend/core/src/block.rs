use std::fmt;

use serde::{Deserialize, Serialize};

/// One annotated unit of an OCR response graph.
///
/// The identifier and relationships are shared by every block type; the
/// type-specific payload lives in [`BlockKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    pub kind: BlockKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<Relationship>,
}

/// Per-type payload of a [`Block`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockKind {
    /// A form key or form value container.
    KeyValueSet { role: EntityRole },
    Word { text: String },
    Line { text: String },
    /// A checkbox or radio button.
    SelectionElement { status: SelectionStatus },
    /// Any block type the resolver does not interpret (PAGE, TABLE, CELL, ...).
    Other {
        block_type: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },
}

/// Role of a KEY_VALUE_SET block. Anything not tagged KEY is a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EntityRole {
    Key,
    #[default]
    Value,
}

impl EntityRole {
    /// Derive the role from a block's entity-type tags.
    pub fn from_entity_types<I, S>(entity_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if entity_types.into_iter().any(|t| t.as_ref() == "KEY") {
            Self::Key
        } else {
            Self::Value
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStatus {
    Selected,
    #[default]
    NotSelected,
}

impl SelectionStatus {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("SELECTED") => Self::Selected,
            _ => Self::NotSelected,
        }
    }
}

/// A typed, ordered link from one block to others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub kind: RelationshipKind,
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    /// Compositional link to constituent WORD / SELECTION_ELEMENT blocks.
    Child,
    /// Key-to-value pairing, only present on KEY blocks.
    Value,
    /// Relationship types the resolver ignores (COMPLEX_FEATURES, TITLE, ...).
    Other(String),
}

impl RelationshipKind {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "CHILD" => Self::Child,
            "VALUE" => Self::Value,
            other => Self::Other(other.to_string()),
        }
    }
}

impl Relationship {
    pub fn new<I, S>(kind: RelationshipKind, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind,
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn child<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(RelationshipKind::Child, ids)
    }

    pub fn value<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(RelationshipKind::Value, ids)
    }
}

impl Block {
    pub fn new(id: impl Into<String>, kind: BlockKind) -> Self {
        Self {
            id: id.into(),
            kind,
            relationships: Vec::new(),
        }
    }

    pub fn key(id: impl Into<String>) -> Self {
        Self::new(id, BlockKind::KeyValueSet { role: EntityRole::Key })
    }

    pub fn value(id: impl Into<String>) -> Self {
        Self::new(id, BlockKind::KeyValueSet { role: EntityRole::Value })
    }

    pub fn word(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, BlockKind::Word { text: text.into() })
    }

    pub fn line(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, BlockKind::Line { text: text.into() })
    }

    pub fn selection(id: impl Into<String>, status: SelectionStatus) -> Self {
        Self::new(id, BlockKind::SelectionElement { status })
    }

    pub fn with_relationship(mut self, relationship: Relationship) -> Self {
        self.relationships.push(relationship);
        self
    }

    /// Role of a KEY_VALUE_SET block, `None` for every other type.
    pub fn role(&self) -> Option<EntityRole> {
        match self.kind {
            BlockKind::KeyValueSet { role } => Some(role),
            _ => None,
        }
    }

    /// Literal text carried by the block itself, if any.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            BlockKind::Word { text } | BlockKind::Line { text } => Some(text),
            BlockKind::Other { text, .. } => text.as_deref(),
            _ => None,
        }
    }

    /// Provider block-type tag (`KEY_VALUE_SET`, `WORD`, ...).
    pub fn block_type(&self) -> &str {
        match &self.kind {
            BlockKind::KeyValueSet { .. } => "KEY_VALUE_SET",
            BlockKind::Word { .. } => "WORD",
            BlockKind::Line { .. } => "LINE",
            BlockKind::SelectionElement { .. } => "SELECTION_ELEMENT",
            BlockKind::Other { block_type, .. } => block_type,
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.block_type(), self.id)
    }
}
