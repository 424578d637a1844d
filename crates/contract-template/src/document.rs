//! Rich document tree edited in the contract template editor
//!
//! The tree is a session-local editing surface. The persisted form is always
//! the storage text produced by [`encode`](crate::transcoder::encode).

use serde::{Deserialize, Serialize};

use crate::path::VariablePath;

/// An inline reference to a context value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderNode {
    pub path: VariablePath,
    /// Label shown when the value is not substituted; defaults to the path
    pub fallback_label: String,
}

impl PlaceholderNode {
    pub fn new(path: VariablePath) -> Self {
        let fallback_label = path.to_string();
        Self {
            path,
            fallback_label,
        }
    }

    pub fn with_label(path: VariablePath, label: impl Into<String>) -> Self {
        Self {
            path,
            fallback_label: label.into(),
        }
    }

    /// `{{label}}`, as displayed in edit mode or when unresolved
    pub fn display_tag(&self) -> String {
        format!("{{{{{}}}}}", self.fallback_label)
    }
}

/// Inline content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum Inline {
    Text(String),
    Placeholder(PlaceholderNode),
    Bold(Vec<Inline>),
    Italic(Vec<Inline>),
    Underline(Vec<Inline>),
    LineBreak,
}

impl Inline {
    pub fn text(value: impl Into<String>) -> Self {
        Inline::Text(value.into())
    }

    pub fn placeholder(path: VariablePath) -> Self {
        Inline::Placeholder(PlaceholderNode::new(path))
    }

    /// Children of a formatting mark, `None` for leaves
    pub fn children(&self) -> Option<&[Inline]> {
        match self {
            Inline::Bold(children) | Inline::Italic(children) | Inline::Underline(children) => {
                Some(children)
            }
            Inline::Text(_) | Inline::Placeholder(_) | Inline::LineBreak => None,
        }
    }

    fn children_mut(&mut self) -> Option<&mut Vec<Inline>> {
        match self {
            Inline::Bold(children) | Inline::Italic(children) | Inline::Underline(children) => {
                Some(children)
            }
            Inline::Text(_) | Inline::Placeholder(_) | Inline::LineBreak => None,
        }
    }
}

/// One entry of a bullet or ordered list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub blocks: Vec<Block>,
}

impl ListItem {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }
}

/// Block-level content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Inline content outside any block element
    Plain { content: Vec<Inline> },
    Paragraph { content: Vec<Inline> },
    Heading { level: u8, content: Vec<Inline> },
    BulletList { items: Vec<ListItem> },
    OrderedList { items: Vec<ListItem> },
}

impl Block {
    pub fn plain(content: Vec<Inline>) -> Self {
        Block::Plain { content }
    }

    pub fn paragraph(content: Vec<Inline>) -> Self {
        Block::Paragraph { content }
    }

    /// Inline content of a text block, `None` for lists
    pub fn inlines(&self) -> Option<&[Inline]> {
        match self {
            Block::Plain { content }
            | Block::Paragraph { content }
            | Block::Heading { content, .. } => Some(content),
            Block::BulletList { .. } | Block::OrderedList { .. } => None,
        }
    }

    pub fn inlines_mut(&mut self) -> Option<&mut Vec<Inline>> {
        match self {
            Block::Plain { content }
            | Block::Paragraph { content }
            | Block::Heading { content, .. } => Some(content),
            Block::BulletList { .. } | Block::OrderedList { .. } => None,
        }
    }

    fn items(&self) -> Option<&[ListItem]> {
        match self {
            Block::BulletList { items } | Block::OrderedList { items } => Some(items),
            _ => None,
        }
    }

    fn items_mut(&mut self) -> Option<&mut Vec<ListItem>> {
        match self {
            Block::BulletList { items } | Block::OrderedList { items } => Some(items),
            _ => None,
        }
    }
}

/// A contract template as an editable tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// All placeholder nodes in document order
    pub fn placeholders(&self) -> Vec<&PlaceholderNode> {
        let mut nodes = Vec::new();
        for block in &self.blocks {
            collect_block_placeholders(block, &mut nodes);
        }
        nodes
    }

    /// Concatenated literal text, placeholders and markup excluded
    pub fn literal_text(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            collect_block_text(block, &mut out);
        }
        out
    }

    /// Delete every node referencing `path`; returns how many were removed
    pub fn remove_placeholders(&mut self, path: &VariablePath) -> usize {
        self.blocks
            .iter_mut()
            .map(|block| remove_from_block(block, path))
            .sum()
    }
}

fn collect_block_placeholders<'a>(block: &'a Block, out: &mut Vec<&'a PlaceholderNode>) {
    if let Some(inlines) = block.inlines() {
        collect_inline_placeholders(inlines, out);
    }
    for item in block.items().unwrap_or_default() {
        for child in &item.blocks {
            collect_block_placeholders(child, out);
        }
    }
}

fn collect_inline_placeholders<'a>(inlines: &'a [Inline], out: &mut Vec<&'a PlaceholderNode>) {
    for inline in inlines {
        match inline {
            Inline::Placeholder(node) => out.push(node),
            other => {
                if let Some(children) = other.children() {
                    collect_inline_placeholders(children, out);
                }
            }
        }
    }
}

fn collect_block_text(block: &Block, out: &mut String) {
    if let Some(inlines) = block.inlines() {
        collect_inline_text(inlines, out);
    }
    for item in block.items().unwrap_or_default() {
        for child in &item.blocks {
            collect_block_text(child, out);
        }
    }
}

fn collect_inline_text(inlines: &[Inline], out: &mut String) {
    for inline in inlines {
        match inline {
            Inline::Text(text) => out.push_str(text),
            other => {
                if let Some(children) = other.children() {
                    collect_inline_text(children, out);
                }
            }
        }
    }
}

fn remove_from_block(block: &mut Block, path: &VariablePath) -> usize {
    let mut removed = 0;
    if let Some(inlines) = block.inlines_mut() {
        removed += remove_from_inlines(inlines, path);
    }
    if let Some(items) = block.items_mut() {
        for item in items {
            for child in &mut item.blocks {
                removed += remove_from_block(child, path);
            }
        }
    }
    removed
}

fn remove_from_inlines(inlines: &mut Vec<Inline>, path: &VariablePath) -> usize {
    let before = inlines.len();
    inlines.retain(|inline| !matches!(inline, Inline::Placeholder(node) if &node.path == path));
    let mut removed = before - inlines.len();
    for inline in inlines.iter_mut() {
        if let Some(children) = inline.children_mut() {
            removed += remove_from_inlines(children, path);
        }
    }
    removed
}
