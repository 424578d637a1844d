//! Dot-separated variable paths such as `tenant.cpfCnpj`

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::InvalidPathError;

/// Separator between path segments
pub const SEGMENT_SEPARATOR: char = '.';

/// A validated path into a [`TemplateDataContext`](crate::TemplateDataContext).
///
/// Every segment is non-empty and free of braces, whitespace and the markup
/// characters `<`, `>` and `&`. Anything else is accepted (`tenant.cpf/cnpj`);
/// empty segments (`tenant..name`) are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VariablePath(String);

impl VariablePath {
    /// Parse a raw path, returning `None` when any segment is malformed
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.split(SEGMENT_SEPARATOR).all(is_valid_segment) {
            Some(Self(raw.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the path segments in order
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEGMENT_SEPARATOR)
    }

    /// Canonical placeholder tag for this path: `{{path}}`
    pub fn to_tag(&self) -> String {
        format!("{{{{{}}}}}", self.0)
    }
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && !segment
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '{' | '}' | '<' | '>' | '&'))
}

/// Strip surrounding braces and whitespace from a path as it may appear in
/// authoring text (`{{ landlord.name }}` → `landlord.name`)
pub fn strip_tag(raw: &str) -> &str {
    raw.trim()
        .trim_start_matches('{')
        .trim_end_matches('}')
        .trim()
}

impl fmt::Display for VariablePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for VariablePath {
    type Error = InvalidPathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or(InvalidPathError(value))
    }
}

impl From<VariablePath> for String {
    fn from(path: VariablePath) -> Self {
        path.0
    }
}
