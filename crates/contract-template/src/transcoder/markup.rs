//! Markup tokenizer and text escaping for the storage format
//!
//! The storage format is the HTML subset produced by the rich-text editor.
//! Only the tags the editor emits are recognized; anything else is dropped
//! while its text is kept.

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    /// Comments, start tags and end tags. Attributes are matched but ignored.
    static ref TAG_PATTERN: Regex =
        Regex::new(r"(?s)<!--.*?-->|<(/?)([A-Za-z][A-Za-z0-9]*)(?:\s[^<>]*)?/?>").unwrap();

    /// Named and numeric character references
    static ref ENTITY_PATTERN: Regex =
        Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[A-Za-z]+);").unwrap();
}

/// Formatting marks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Bold,
    Italic,
    Underline,
}

/// Tags the storage format understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Paragraph,
    Heading(u8),
    BulletList,
    OrderedList,
    ListItem,
    Mark(Mark),
    LineBreak,
    Unknown,
}

impl TagKind {
    fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "p" => TagKind::Paragraph,
            "h1" => TagKind::Heading(1),
            "h2" => TagKind::Heading(2),
            "h3" => TagKind::Heading(3),
            "h4" => TagKind::Heading(4),
            "h5" => TagKind::Heading(5),
            "h6" => TagKind::Heading(6),
            "ul" => TagKind::BulletList,
            "ol" => TagKind::OrderedList,
            "li" => TagKind::ListItem,
            "strong" | "b" => TagKind::Mark(Mark::Bold),
            "em" | "i" => TagKind::Mark(Mark::Italic),
            "u" => TagKind::Mark(Mark::Underline),
            "br" => TagKind::LineBreak,
            _ => TagKind::Unknown,
        }
    }
}

/// A lexical unit of the storage text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    Start(TagKind),
    End(TagKind),
    /// Raw text, character references not yet decoded
    Text(&'a str),
}

/// Split storage text into tags and text. Comments produce no token.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut text_start = 0;

    for captures in TAG_PATTERN.captures_iter(input) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        if whole.start() > text_start {
            tokens.push(Token::Text(&input[text_start..whole.start()]));
        }
        text_start = whole.end();

        // Comments have no name group
        let Some(name) = captures.get(2) else {
            continue;
        };
        let kind = TagKind::from_name(name.as_str());
        let closing = captures.get(1).is_some_and(|slash| !slash.as_str().is_empty());
        tokens.push(if closing {
            Token::End(kind)
        } else {
            Token::Start(kind)
        });
    }

    if text_start < input.len() {
        tokens.push(Token::Text(&input[text_start..]));
    }
    tokens
}

/// Decode character references. Unknown or invalid references stay as written.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    ENTITY_PATTERN.replace_all(text, |caps: &Captures| {
        let reference = &caps[1];
        let decoded = if let Some(hex) = reference
            .strip_prefix("#x")
            .or_else(|| reference.strip_prefix("#X"))
        {
            u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
        } else if let Some(decimal) = reference.strip_prefix('#') {
            decimal.parse::<u32>().ok().and_then(char::from_u32)
        } else {
            named_entity(reference)
        };
        match decoded {
            Some(c) => c.to_string(),
            None => caps[0].to_string(),
        }
    })
}

fn named_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => None,
    }
}

/// Escape text for inclusion in markup
pub fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}

/// Escape a value for a double-quoted attribute
pub fn escape_attribute(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
}
