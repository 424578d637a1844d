//! Document tree → storage text

use super::markup::escape_text;
use crate::document::{Block, Document, Inline, PlaceholderNode};

/// Writes markup for a document, delegating placeholder output to a callback.
///
/// Storage encoding and preview rendering share this walker and differ only
/// in how placeholder nodes are written.
pub(crate) struct MarkupWriter<F>
where
    F: FnMut(&PlaceholderNode, &mut String),
{
    out: String,
    write_placeholder: F,
}

impl<F> MarkupWriter<F>
where
    F: FnMut(&PlaceholderNode, &mut String),
{
    pub(crate) fn new(write_placeholder: F) -> Self {
        Self {
            out: String::new(),
            write_placeholder,
        }
    }

    pub(crate) fn document(mut self, document: &Document) -> String {
        self.blocks(&document.blocks);
        self.out
    }

    fn blocks(&mut self, blocks: &[Block]) {
        for block in blocks {
            self.block(block);
        }
    }

    fn block(&mut self, block: &Block) {
        match block {
            Block::Plain { content } => self.inlines(content),
            Block::Paragraph { content } => {
                self.out.push_str("<p>");
                self.inlines(content);
                self.out.push_str("</p>");
            }
            Block::Heading { level, content } => {
                let level = (*level).clamp(1, 6);
                self.out.push_str(&format!("<h{level}>"));
                self.inlines(content);
                self.out.push_str(&format!("</h{level}>"));
            }
            Block::BulletList { items } | Block::OrderedList { items } => {
                let tag = if matches!(block, Block::OrderedList { .. }) {
                    "ol"
                } else {
                    "ul"
                };
                self.out.push_str(&format!("<{tag}>"));
                for item in items {
                    self.out.push_str("<li>");
                    self.blocks(&item.blocks);
                    self.out.push_str("</li>");
                }
                self.out.push_str(&format!("</{tag}>"));
            }
        }
    }

    fn inlines(&mut self, inlines: &[Inline]) {
        for inline in inlines {
            match inline {
                Inline::Text(text) => escape_text(text, &mut self.out),
                Inline::Placeholder(node) => (self.write_placeholder)(node, &mut self.out),
                Inline::Bold(children) => self.wrap("strong", children),
                Inline::Italic(children) => self.wrap("em", children),
                Inline::Underline(children) => self.wrap("u", children),
                Inline::LineBreak => self.out.push_str("<br>"),
            }
        }
    }

    fn wrap(&mut self, tag: &str, children: &[Inline]) {
        self.out.push('<');
        self.out.push_str(tag);
        self.out.push('>');
        self.inlines(children);
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push('>');
    }
}

/// Encode a document as storage text.
///
/// Placeholders are written in canonical form `{{path}}` regardless of the
/// spacing they were decoded from.
pub fn encode(document: &Document) -> String {
    let text = MarkupWriter::new(|node: &PlaceholderNode, out: &mut String| {
        out.push_str("{{");
        out.push_str(node.path.as_str());
        out.push_str("}}");
    })
    .document(document);
    tracing::trace!(
        blocks = document.blocks.len(),
        bytes = text.len(),
        "Encoded template"
    );
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ListItem;
    use crate::path::VariablePath;
    use pretty_assertions::assert_eq;

    fn node(raw: &str) -> Inline {
        Inline::placeholder(VariablePath::parse(raw).unwrap())
    }

    #[test]
    fn test_encode_bare_text_without_markup() {
        let doc = Document::new(vec![Block::plain(vec![
            Inline::text("Olá "),
            node("tenant.name"),
        ])]);
        assert_eq!(encode(&doc), "Olá {{tenant.name}}");
    }

    #[test]
    fn test_encode_uses_path_not_label() {
        let labelled = PlaceholderNode::with_label(
            VariablePath::parse("tenant.name").unwrap(),
            "Nome do locatário",
        );
        let doc = Document::new(vec![Block::plain(vec![Inline::Placeholder(labelled)])]);
        assert_eq!(encode(&doc), "{{tenant.name}}");
    }

    #[test]
    fn test_encode_marks_and_lists() {
        let doc = Document::new(vec![
            Block::Heading {
                level: 1,
                content: vec![Inline::text("Contrato")],
            },
            Block::paragraph(vec![
                Inline::Bold(vec![Inline::text("Locador:")]),
                Inline::text(" "),
                Inline::Italic(vec![Inline::Underline(vec![node("landlord.name")])]),
                Inline::LineBreak,
            ]),
            Block::OrderedList {
                items: vec![ListItem::new(vec![Block::paragraph(vec![node("rentAmount")])])],
            },
            Block::BulletList {
                items: vec![ListItem::new(vec![Block::plain(vec![Inline::text("a")])])],
            },
        ]);
        assert_eq!(
            encode(&doc),
            "<h1>Contrato</h1>\
             <p><strong>Locador:</strong> <em><u>{{landlord.name}}</u></em><br></p>\
             <ol><li><p>{{rentAmount}}</p></li></ol>\
             <ul><li>a</li></ul>"
        );
    }

    #[test]
    fn test_encode_escapes_text() {
        let doc = Document::new(vec![Block::paragraph(vec![Inline::text("a & b < c")])]);
        assert_eq!(encode(&doc), "<p>a &amp; b &lt; c</p>");
    }

    #[test]
    fn test_encode_clamps_heading_level() {
        let doc = Document::new(vec![Block::Heading {
            level: 9,
            content: vec![],
        }]);
        assert_eq!(encode(&doc), "<h6></h6>");
    }

    #[test]
    fn test_encode_empty_document() {
        assert_eq!(encode(&Document::default()), "");
    }

    #[test]
    fn test_encode_logs_summary() {
        let doc = Document::new(vec![Block::paragraph(vec![node("rentAmount")])]);
        let logs = crate::log_capture::capture_logs(tracing::Level::TRACE, || {
            encode(&doc);
        });
        assert!(logs.contains("Encoded template"), "{logs}");
        assert!(logs.contains("bytes=21"), "{logs}");
    }
}
