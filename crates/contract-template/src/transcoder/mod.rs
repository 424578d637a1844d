//! Template transcoder
//!
//! Converts between the storage text (editor markup carrying `{{path}}`
//! placeholders) and the [`Document`](crate::Document) tree in which each
//! placeholder is its own inline node.
//!
//! Round-trip law: `encode(decode(encode(decode(x)))) == encode(decode(x))`.
//! The first pass canonicalizes placeholder spacing, tag aliases (`<b>` →
//! `<strong>`), attributes and character references; later passes are stable.

pub mod decode;
pub mod encode;
pub mod markup;
pub mod placeholder;

pub use decode::decode;
pub use encode::encode;
pub use placeholder::{split_placeholders, trailing_placeholder, TrailingPlaceholder};

/// Decode then encode: the canonical storage form of a template
pub fn normalize(storage_text: &str) -> String {
    encode(&decode(storage_text))
}
