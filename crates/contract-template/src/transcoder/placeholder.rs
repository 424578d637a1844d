//! `{{path}}` placeholder scanning

use lazy_static::lazy_static;
use regex::Regex;

use crate::document::{Inline, PlaceholderNode};
use crate::path::VariablePath;

lazy_static! {
    /// Two opening braces, optional whitespace, a path without braces or
    /// whitespace, optional whitespace, two closing braces
    static ref PLACEHOLDER_PATTERN: Regex =
        Regex::new(r"\{\{\s*([^{}\s]+)\s*\}\}").unwrap();

    /// Same pattern anchored at the end of the text, used by the typing input rule
    static ref TRAILING_PLACEHOLDER_PATTERN: Regex =
        Regex::new(r"\{\{\s*([^{}\s]+)\s*\}\}$").unwrap();
}

/// Split a text run into literal text and placeholder nodes.
///
/// Matches whose path is malformed (`{{tenant..name}}`) stay literal text.
pub fn split_placeholders(text: &str) -> Vec<Inline> {
    let mut inlines = Vec::new();
    let mut literal_start = 0;

    for captures in PLACEHOLDER_PATTERN.captures_iter(text) {
        let (Some(whole), Some(raw_path)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        let Some(path) = VariablePath::parse(raw_path.as_str()) else {
            tracing::debug!(placeholder = whole.as_str(), "Leaving malformed placeholder as text");
            continue;
        };

        if whole.start() > literal_start {
            inlines.push(Inline::text(&text[literal_start..whole.start()]));
        }
        inlines.push(Inline::Placeholder(PlaceholderNode::new(path)));
        literal_start = whole.end();
    }

    if literal_start < text.len() {
        inlines.push(Inline::text(&text[literal_start..]));
    }
    inlines
}

/// A placeholder that closes exactly at the end of a text run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailingPlaceholder {
    /// Byte offset where the `{{` starts
    pub start: usize,
    pub node: PlaceholderNode,
}

/// Find a complete, valid placeholder ending the text
pub fn trailing_placeholder(text: &str) -> Option<TrailingPlaceholder> {
    let captures = TRAILING_PLACEHOLDER_PATTERN.captures(text)?;
    let whole = captures.get(0)?;
    let path = VariablePath::parse(captures.get(1)?.as_str())?;
    Some(TrailingPlaceholder {
        start: whole.start(),
        node: PlaceholderNode::new(path),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn node(raw: &str) -> Inline {
        Inline::placeholder(VariablePath::parse(raw).unwrap())
    }

    #[test]
    fn test_split_mixed_text() {
        assert_eq!(
            split_placeholders("Olá {{tenant.name}}, seu aluguel é {{rentAmount}}."),
            vec![
                Inline::text("Olá "),
                node("tenant.name"),
                Inline::text(", seu aluguel é "),
                node("rentAmount"),
                Inline::text("."),
            ]
        );
    }

    #[test]
    fn test_split_trims_inner_whitespace() {
        assert_eq!(split_placeholders("{{ tenant.name }}"), vec![node("tenant.name")]);
        assert_eq!(split_placeholders("{{\ttenant.name\n}}"), vec![node("tenant.name")]);
    }

    #[test]
    fn test_split_keeps_malformed_literal() {
        for raw in ["{{tenant..name}}", "{{ }}", "{{}}", "{{a b}}", "{tenant.name}", "{{tenant.name}"] {
            assert_eq!(split_placeholders(raw), vec![Inline::text(raw)], "{raw:?}");
        }
    }

    #[test]
    fn test_split_adjacent_placeholders() {
        assert_eq!(
            split_placeholders("{{a}}{{b}}"),
            vec![node("a"), node("b")]
        );
    }

    #[test]
    fn test_split_extra_braces() {
        assert_eq!(
            split_placeholders("{{{a}}}"),
            vec![Inline::text("{"), node("a"), Inline::text("}")]
        );
    }

    #[test]
    fn test_split_empty() {
        assert!(split_placeholders("").is_empty());
    }

    #[test]
    fn test_trailing_placeholder() {
        let found = trailing_placeholder("Olá {{ tenant.name }}").unwrap();
        assert_eq!(found.start, "Olá ".len());
        assert_eq!(found.node.path.as_str(), "tenant.name");

        assert!(trailing_placeholder("Olá {{tenant.name}").is_none());
        assert!(trailing_placeholder("{{tenant.name}} ").is_none());
        assert!(trailing_placeholder("{{tenant..name}}").is_none());
    }
}
