//! Rich-text document tree, serialized in Tiptap's JSON shape.
//!
//! ```json
//! {"type":"doc","content":[{"type":"paragraph","content":[{"type":"text","text":"..."}]}]}
//! ```

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Paragraph),
    OrderedList(Vec<ListItem>),
    UnorderedList(Vec<ListItem>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub runs: Vec<TextRun>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub text: String,
}

/// A list entry; always wraps exactly one paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub paragraph: Paragraph,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl Block {
    /// Tiptap node name.
    pub fn node_type(&self) -> &'static str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::OrderedList(_) => "orderedList",
            Block::UnorderedList(_) => "bulletList",
        }
    }

    pub fn items(&self) -> &[ListItem] {
        match self {
            Block::Paragraph(_) => &[],
            Block::OrderedList(items) | Block::UnorderedList(items) => items,
        }
    }
}

impl Paragraph {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            runs: vec![TextRun { text: text.into() }],
        }
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

impl ListItem {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            paragraph: Paragraph::from_text(text),
        }
    }

    pub fn text(&self) -> String {
        self.paragraph.text()
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("type", "doc")?;
        map.serialize_entry("content", &self.blocks)?;
        map.end()
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Block::Paragraph(paragraph) => paragraph.serialize(serializer),
            Block::OrderedList(items) | Block::UnorderedList(items) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", self.node_type())?;
                map.serialize_entry("content", items)?;
                map.end()
            }
        }
    }
}

impl Serialize for Paragraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("type", "paragraph")?;
        map.serialize_entry("content", &self.runs)?;
        map.end()
    }
}

impl Serialize for TextRun {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("type", "text")?;
        map.serialize_entry("text", &self.text)?;
        map.end()
    }
}

impl Serialize for ListItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("type", "listItem")?;
        map.serialize_entry("content", std::slice::from_ref(&self.paragraph))?;
        map.end()
    }
}
