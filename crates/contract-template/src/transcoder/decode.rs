//! Storage text → document tree

use super::markup::{decode_entities, tokenize, Mark, TagKind, Token};
use super::placeholder::split_placeholders;
use crate::document::{Block, Document, Inline, ListItem};

/// An element under construction
enum Frame {
    /// Holds blocks: the document root or a list item
    Container { root: bool, blocks: Vec<Block> },
    /// Paragraph (`level == None`) or heading
    TextBlock { level: Option<u8>, inlines: Vec<Inline> },
    List { ordered: bool, items: Vec<ListItem> },
    Mark { mark: Mark, inlines: Vec<Inline> },
}

impl Frame {
    fn matches(&self, kind: TagKind) -> bool {
        match (self, kind) {
            (Frame::Container { root: false, .. }, TagKind::ListItem) => true,
            (Frame::TextBlock { level: None, .. }, TagKind::Paragraph) => true,
            (Frame::TextBlock { level: Some(l), .. }, TagKind::Heading(k)) => *l == k,
            (Frame::List { ordered, .. }, TagKind::BulletList) => !ordered,
            (Frame::List { ordered, .. }, TagKind::OrderedList) => *ordered,
            (Frame::Mark { mark, .. }, TagKind::Mark(m)) => *mark == m,
            _ => false,
        }
    }

    fn is_inline_context(&self) -> bool {
        matches!(self, Frame::TextBlock { .. } | Frame::Mark { .. })
    }
}

/// Stack-based tree builder. The root container is always at index 0.
struct TreeBuilder {
    stack: Vec<Frame>,
    /// Text collected since the last structural tag; unknown tags do not
    /// interrupt it
    pending: String,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            stack: vec![Frame::Container {
                root: true,
                blocks: Vec::new(),
            }],
            pending: String::new(),
        }
    }

    fn top(&mut self) -> &mut Frame {
        // The root frame is never popped
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn start(&mut self, kind: TagKind) {
        match kind {
            TagKind::Unknown => {}
            TagKind::LineBreak => {
                self.flush_text();
                self.push_inline(Inline::LineBreak);
            }
            TagKind::Mark(mark) => {
                self.flush_text();
                self.ensure_list_item();
                self.stack.push(Frame::Mark {
                    mark,
                    inlines: Vec::new(),
                });
            }
            TagKind::Paragraph | TagKind::Heading(_) => {
                self.flush_text();
                self.close_inline_context();
                self.ensure_list_item();
                let level = match kind {
                    TagKind::Heading(level) => Some(level),
                    _ => None,
                };
                self.stack.push(Frame::TextBlock {
                    level,
                    inlines: Vec::new(),
                });
            }
            TagKind::BulletList | TagKind::OrderedList => {
                self.flush_text();
                self.close_inline_context();
                self.ensure_list_item();
                self.stack.push(Frame::List {
                    ordered: kind == TagKind::OrderedList,
                    items: Vec::new(),
                });
            }
            TagKind::ListItem => {
                // A list item outside any list is ignored like an unknown tag
                let Some(list) = self
                    .stack
                    .iter()
                    .rposition(|frame| matches!(frame, Frame::List { .. }))
                else {
                    return;
                };
                self.flush_text();
                self.pop_to(list + 1);
                self.stack.push(Frame::Container {
                    root: false,
                    blocks: Vec::new(),
                });
            }
        }
    }

    fn end(&mut self, kind: TagKind) {
        if matches!(kind, TagKind::Unknown | TagKind::LineBreak) {
            return;
        }
        let Some(index) = self
            .stack
            .iter()
            .skip(1)
            .rposition(|frame| frame.matches(kind))
        else {
            // Unbalanced end tag
            return;
        };
        self.flush_text();
        // `index` counts from 1 because the root was skipped
        self.pop_to(index + 1);
    }

    fn text(&mut self, raw: &str) {
        self.pending.push_str(&decode_entities(raw));
    }

    fn flush_text(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.pending);
        // Inter-element whitespace directly inside a list has nowhere to go
        if matches!(self.top(), Frame::List { .. }) && text.trim().is_empty() {
            return;
        }
        for inline in split_placeholders(&text) {
            self.push_inline(inline);
        }
    }

    fn push_inline(&mut self, inline: Inline) {
        self.ensure_list_item();
        match self.top() {
            Frame::TextBlock { inlines, .. } | Frame::Mark { inlines, .. } => {
                append_inline(inlines, inline)
            }
            Frame::Container { blocks, .. } => {
                if let Some(Block::Plain { content }) = blocks.last_mut() {
                    append_inline(content, inline);
                } else {
                    blocks.push(Block::plain(vec![inline]));
                }
            }
            Frame::List { items, .. } => {
                items.push(ListItem::new(vec![Block::plain(vec![inline])]))
            }
        }
    }

    fn push_block(&mut self, block: Block) {
        self.ensure_list_item();
        match self.top() {
            Frame::Container { blocks, .. } => blocks.push(block),
            Frame::TextBlock { inlines, .. } | Frame::Mark { inlines, .. } => {
                if let Some(content) = block.inlines() {
                    for inline in content {
                        append_inline(inlines, inline.clone());
                    }
                }
            }
            Frame::List { items, .. } => items.push(ListItem::new(vec![block])),
        }
    }

    /// Content placed directly inside a list gets an implicit list item
    fn ensure_list_item(&mut self) {
        if matches!(self.top(), Frame::List { .. }) {
            self.stack.push(Frame::Container {
                root: false,
                blocks: Vec::new(),
            });
        }
    }

    /// Block elements cannot live inside paragraphs or marks
    fn close_inline_context(&mut self) {
        while self.stack.len() > 1 && self.stack[self.stack.len() - 1].is_inline_context() {
            self.pop();
        }
    }

    /// Pop frames until the stack has `len` entries
    fn pop_to(&mut self, len: usize) {
        while self.stack.len() > len.max(1) {
            self.pop();
        }
    }

    fn pop(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        match frame {
            Frame::Container { root: true, blocks } => {
                // Never popped by callers; restore to keep the invariant
                self.stack.push(Frame::Container { root: true, blocks });
            }
            Frame::Container { root: false, blocks } => {
                if let Frame::List { items, .. } = self.top() {
                    items.push(ListItem::new(blocks));
                } else {
                    for block in blocks {
                        self.push_block(block);
                    }
                }
            }
            Frame::TextBlock { level, inlines } => {
                let block = match level {
                    Some(level) => Block::Heading {
                        level,
                        content: inlines,
                    },
                    None => Block::paragraph(inlines),
                };
                self.push_block(block);
            }
            Frame::List { ordered, items } => {
                let block = if ordered {
                    Block::OrderedList { items }
                } else {
                    Block::BulletList { items }
                };
                self.push_block(block);
            }
            Frame::Mark { mark, inlines } => {
                let inline = match mark {
                    Mark::Bold => Inline::Bold(inlines),
                    Mark::Italic => Inline::Italic(inlines),
                    Mark::Underline => Inline::Underline(inlines),
                };
                self.push_inline(inline);
            }
        }
    }

    fn finish(mut self) -> Document {
        self.flush_text();
        self.pop_to(1);
        match self.stack.pop() {
            Some(Frame::Container { blocks, .. }) => Document::new(blocks),
            _ => Document::default(),
        }
    }
}

fn append_inline(inlines: &mut Vec<Inline>, inline: Inline) {
    if let (Some(Inline::Text(previous)), Inline::Text(text)) = (inlines.last_mut(), &inline) {
        previous.push_str(text);
        return;
    }
    inlines.push(inline);
}

/// Decode storage text into a document tree.
///
/// Never fails: unknown tags are dropped (their text kept), unbalanced end
/// tags are ignored, unclosed elements close at the end of input, and
/// malformed placeholders stay literal text.
pub fn decode(storage_text: &str) -> Document {
    let mut builder = TreeBuilder::new();
    for token in tokenize(storage_text) {
        match token {
            Token::Start(kind) => builder.start(kind),
            Token::End(kind) => builder.end(kind),
            Token::Text(raw) => builder.text(raw),
        }
    }
    let document = builder.finish();
    tracing::trace!(
        blocks = document.blocks.len(),
        placeholders = document.placeholders().len(),
        "Decoded template"
    );
    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::VariablePath;
    use pretty_assertions::assert_eq;

    fn node(raw: &str) -> Inline {
        Inline::placeholder(VariablePath::parse(raw).unwrap())
    }

    #[test]
    fn test_decode_bare_text() {
        assert_eq!(
            decode("Olá {{tenant.name}}, seu aluguel é {{rentAmount}}."),
            Document::new(vec![Block::plain(vec![
                Inline::text("Olá "),
                node("tenant.name"),
                Inline::text(", seu aluguel é "),
                node("rentAmount"),
                Inline::text("."),
            ])])
        );
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(decode(""), Document::default());
    }

    #[test]
    fn test_decode_paragraph_with_marks() {
        assert_eq!(
            decode("<p>Locador: <b><i>{{landlord.name}}</i></b><br>CPF <u>{{landlord.cpfCnpj}}</u></p>"),
            Document::new(vec![Block::paragraph(vec![
                Inline::text("Locador: "),
                Inline::Bold(vec![Inline::Italic(vec![node("landlord.name")])]),
                Inline::LineBreak,
                Inline::text("CPF "),
                Inline::Underline(vec![node("landlord.cpfCnpj")]),
            ])])
        );
    }

    #[test]
    fn test_decode_nested_lists() {
        assert_eq!(
            decode("<ol><li><p>Aluguel</p><ul><li>{{rentAmount}}</li></ul></li><li>Fim</li></ol>"),
            Document::new(vec![Block::OrderedList {
                items: vec![
                    ListItem::new(vec![
                        Block::paragraph(vec![Inline::text("Aluguel")]),
                        Block::BulletList {
                            items: vec![ListItem::new(vec![Block::plain(vec![node("rentAmount")])])],
                        },
                    ]),
                    ListItem::new(vec![Block::plain(vec![Inline::text("Fim")])]),
                ],
            }])
        );
    }

    #[test]
    fn test_decode_heading() {
        assert_eq!(
            decode("<h2>Contrato de Locação</h2>"),
            Document::new(vec![Block::Heading {
                level: 2,
                content: vec![Inline::text("Contrato de Locação")],
            }])
        );
    }

    #[test]
    fn test_whitespace_between_blocks_is_kept_at_root() {
        let doc = decode("<p>a</p>\n<p>b</p>");
        assert_eq!(doc.blocks.len(), 3);
        assert_eq!(doc.blocks[1], Block::plain(vec![Inline::text("\n")]));
    }

    #[test]
    fn test_whitespace_inside_list_is_dropped() {
        let doc = decode("<ul>\n  <li>a</li>\n</ul>");
        assert_eq!(
            doc,
            Document::new(vec![Block::BulletList {
                items: vec![ListItem::new(vec![Block::plain(vec![Inline::text("a")])])],
            }])
        );
    }

    #[test]
    fn test_unknown_tags_keep_text_and_do_not_split_placeholders() {
        assert_eq!(
            decode("<div><span style=\"color:red\">{{tenant.</span>name}}</div>"),
            Document::new(vec![Block::plain(vec![node("tenant.name")])])
        );
    }

    #[test]
    fn test_unbalanced_end_tags_are_ignored() {
        assert_eq!(
            decode("a</strong></p>b"),
            Document::new(vec![Block::plain(vec![Inline::text("ab")])])
        );
    }

    #[test]
    fn test_unclosed_elements_close_at_end() {
        assert_eq!(
            decode("<p><strong>a"),
            Document::new(vec![Block::paragraph(vec![Inline::Bold(vec![Inline::text("a")])])])
        );
    }

    #[test]
    fn test_paragraph_inside_paragraph_closes_the_first() {
        assert_eq!(
            decode("<p>a<p>b"),
            Document::new(vec![
                Block::paragraph(vec![Inline::text("a")]),
                Block::paragraph(vec![Inline::text("b")]),
            ])
        );
    }

    #[test]
    fn test_list_item_closes_previous_item() {
        assert_eq!(
            decode("<ul><li>a<li>b</ul>"),
            Document::new(vec![Block::BulletList {
                items: vec![
                    ListItem::new(vec![Block::plain(vec![Inline::text("a")])]),
                    ListItem::new(vec![Block::plain(vec![Inline::text("b")])]),
                ],
            }])
        );
    }

    #[test]
    fn test_text_directly_in_list_gets_implicit_item() {
        assert_eq!(
            decode("<ul>a<li>b</li></ul>"),
            Document::new(vec![Block::BulletList {
                items: vec![
                    ListItem::new(vec![Block::plain(vec![Inline::text("a")])]),
                    ListItem::new(vec![Block::plain(vec![Inline::text("b")])]),
                ],
            }])
        );
    }

    #[test]
    fn test_stray_list_item_is_ignored() {
        assert_eq!(
            decode("<li>a</li>"),
            Document::new(vec![Block::plain(vec![Inline::text("a")])])
        );
    }

    #[test]
    fn test_entities_are_decoded() {
        assert_eq!(
            decode("<p>R$ 1.500 &amp; {{ rentAmount }} &lt;mensal&gt;</p>"),
            Document::new(vec![Block::paragraph(vec![
                Inline::text("R$ 1.500 & "),
                node("rentAmount"),
                Inline::text(" <mensal>"),
            ])])
        );
    }

    #[test]
    fn test_malformed_placeholders_stay_literal() {
        for raw in ["{{tenant..name}}", "{{ }}"] {
            let doc = decode(raw);
            assert!(doc.placeholders().is_empty());
            assert_eq!(doc.literal_text(), raw);
        }
    }
}
