//! Editing a text block: typing with live placeholder promotion
//!
//! When typed text completes a `{{path}}` pattern (on the second closing
//! brace) the typed span is replaced by a [`PlaceholderNode`] in one step.
//! Nothing happens on earlier keystrokes, and a promoted span is gone from
//! the text run, so each completed pattern is promoted exactly once.

use crate::document::{Block, Inline, PlaceholderNode};
use crate::transcoder::trailing_placeholder;
use crate::variables::VariableDescriptor;

/// What a backspace removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deleted {
    Char(char),
    Placeholder(PlaceholderNode),
    LineBreak,
}

/// Inline content of one text block with the cursor at its end
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBlockEditor {
    content: Vec<Inline>,
}

impl TextBlockEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume editing existing inline content
    pub fn from_inlines(content: Vec<Inline>) -> Self {
        Self { content }
    }

    pub fn content(&self) -> &[Inline] {
        &self.content
    }

    /// Type text one character at a time, applying the promotion rule after
    /// each character. Returns the nodes created, in order.
    pub fn type_text(&mut self, text: &str) -> Vec<PlaceholderNode> {
        text.chars().filter_map(|c| self.type_char(c)).collect()
    }

    /// Type a single character
    pub fn type_char(&mut self, c: char) -> Option<PlaceholderNode> {
        if let Some(Inline::Text(run)) = self.content.last_mut() {
            run.push(c);
        } else {
            self.content.push(Inline::Text(c.to_string()));
        }

        if c == '}' {
            self.promote_trailing()
        } else {
            None
        }
    }

    fn promote_trailing(&mut self) -> Option<PlaceholderNode> {
        let Some(Inline::Text(run)) = self.content.last_mut() else {
            return None;
        };
        let found = trailing_placeholder(run)?;
        run.truncate(found.start);
        if run.is_empty() {
            self.content.pop();
        }
        tracing::debug!(path = %found.node.path, "Promoted typed placeholder");
        self.content.push(Inline::Placeholder(found.node.clone()));
        Some(found.node)
    }

    /// Insert a node at the cursor
    pub fn insert_node(&mut self, node: PlaceholderNode) {
        self.content.push(Inline::Placeholder(node));
    }

    /// Insert the node for a catalog entry, labelled with its display label
    pub fn insert_variable(&mut self, descriptor: &VariableDescriptor) -> Option<PlaceholderNode> {
        let node = descriptor.to_node()?;
        self.insert_node(node.clone());
        Some(node)
    }

    pub fn line_break(&mut self) {
        self.content.push(Inline::LineBreak);
    }

    /// Delete backwards from the cursor. A placeholder is removed as a whole.
    pub fn backspace(&mut self) -> Option<Deleted> {
        match self.content.pop()? {
            Inline::Text(mut run) => {
                let removed = run.pop();
                if !run.is_empty() {
                    self.content.push(Inline::Text(run));
                }
                removed.map(Deleted::Char)
            }
            Inline::Placeholder(node) => Some(Deleted::Placeholder(node)),
            Inline::LineBreak => Some(Deleted::LineBreak),
            // Formatted runs are edited through their own block editor
            mark @ (Inline::Bold(_) | Inline::Italic(_) | Inline::Underline(_)) => {
                self.content.push(mark);
                None
            }
        }
    }

    pub fn placeholder_count(&self) -> usize {
        self.content
            .iter()
            .filter(|inline| matches!(inline, Inline::Placeholder(_)))
            .count()
    }

    /// Finish editing as a paragraph
    pub fn into_paragraph(self) -> Block {
        Block::paragraph(self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variables::find_variable;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_promotion_happens_on_final_brace_only() {
        let mut editor = TextBlockEditor::new();
        let typed = "{{tenant.name}}";
        let last = typed.chars().count() - 1;

        for (i, c) in typed.chars().enumerate() {
            let created = editor.type_char(c);
            if i < last {
                assert!(created.is_none(), "no node expected after {:?}", &typed[..=i]);
                assert_eq!(editor.placeholder_count(), 0);
            } else {
                let node = created.expect("final brace completes the placeholder");
                assert_eq!(node.path.as_str(), "tenant.name");
                assert_eq!(node.fallback_label, "tenant.name");
            }
        }

        assert_eq!(editor.placeholder_count(), 1);
        assert_eq!(editor.content().len(), 1);
    }

    #[test]
    fn test_promotion_keeps_preceding_text() {
        let mut editor = TextBlockEditor::new();
        let created = editor.type_text("Olá {{ tenant.name }}, bem-vindo");
        assert_eq!(created.len(), 1);
        assert_eq!(
            editor.content(),
            &[
                Inline::text("Olá "),
                Inline::Placeholder(created[0].clone()),
                Inline::text(", bem-vindo"),
            ]
        );
    }

    #[test]
    fn test_extra_brace_does_not_promote_twice() {
        let mut editor = TextBlockEditor::new();
        assert_eq!(editor.type_text("{{rentAmount}}").len(), 1);
        assert!(editor.type_char('}').is_none());
        assert_eq!(editor.placeholder_count(), 1);
    }

    #[test]
    fn test_malformed_pattern_is_not_promoted() {
        let mut editor = TextBlockEditor::new();
        assert!(editor.type_text("{{tenant..name}} {{ }}").is_empty());
        assert_eq!(editor.content(), &[Inline::text("{{tenant..name}} {{ }}")]);
    }

    #[test]
    fn test_multiple_placeholders() {
        let mut editor = TextBlockEditor::new();
        let created = editor.type_text("{{startDate}} a {{endDate}}");
        let paths: Vec<&str> = created.iter().map(|n| n.path.as_str()).collect();
        assert_eq!(paths, vec!["startDate", "endDate"]);
    }

    #[test]
    fn test_insert_variable_uses_display_label() {
        let mut editor = TextBlockEditor::new();
        let descriptor = find_variable("landlord.name").unwrap();
        let node = editor.insert_variable(descriptor).unwrap();
        assert_eq!(node.fallback_label, "Nome do locador");
        assert_eq!(editor.placeholder_count(), 1);
    }

    #[test]
    fn test_backspace_removes_whole_node() {
        let mut editor = TextBlockEditor::new();
        editor.type_text("a{{tenant.name}}");
        match editor.backspace() {
            Some(Deleted::Placeholder(node)) => assert_eq!(node.path.as_str(), "tenant.name"),
            other => panic!("expected a placeholder deletion, got {other:?}"),
        }
        assert_eq!(editor.backspace(), Some(Deleted::Char('a')));
        assert_eq!(editor.backspace(), None);
    }

    #[test]
    fn test_retyping_after_backspace_promotes_again() {
        let mut editor = TextBlockEditor::new();
        editor.type_text("{{rentAmount}");
        assert_eq!(editor.placeholder_count(), 0);
        editor.backspace();
        editor.type_text("}}");
        assert_eq!(editor.placeholder_count(), 1);
    }

    #[test]
    fn test_into_paragraph() {
        let mut editor = TextBlockEditor::new();
        editor.type_text("x");
        editor.line_break();
        assert_eq!(
            editor.into_paragraph(),
            Block::paragraph(vec![Inline::text("x"), Inline::LineBreak])
        );
    }
}
