//! Path resolution against a [`TemplateDataContext`]

use serde::Serialize;

use crate::context::{ContextValue, TemplateDataContext};
use crate::path::VariablePath;

/// Outcome of resolving a placeholder path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Resolution {
    /// The path reached a text leaf
    Resolved(String),
    /// The path is missing, or reached a number or a nested mapping
    Unresolved,
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }

    pub fn as_deref(&self) -> Option<&str> {
        match self {
            Resolution::Resolved(value) => Some(value),
            Resolution::Unresolved => None,
        }
    }
}

/// What a walk down the context tree ends on
enum Lookup<'a> {
    Scalar(&'a str),
    Nested,
    Absent,
}

/// Resolve `path` against `context`.
///
/// Only text leaves are substitutable. Numbers must be formatted into text by
/// whoever builds the context (see [`ContractContextBuilder`](crate::ContractContextBuilder)).
pub fn resolve(context: &TemplateDataContext, path: &VariablePath) -> Resolution {
    let mut segments = path.segments();
    let lookup = match segments.next().and_then(|first| context.get(first)) {
        Some(value) => walk(value, segments),
        None => Lookup::Absent,
    };

    match lookup {
        Lookup::Scalar(value) => Resolution::Resolved(value.to_string()),
        Lookup::Nested | Lookup::Absent => {
            tracing::debug!(path = %path, "Placeholder unresolved");
            Resolution::Unresolved
        }
    }
}

/// Resolve a raw path string; malformed paths are unresolved
pub fn resolve_str(context: &TemplateDataContext, raw: &str) -> Resolution {
    match VariablePath::parse(raw) {
        Some(path) => resolve(context, &path),
        None => Resolution::Unresolved,
    }
}

fn walk<'a, 'p>(value: &'a ContextValue, mut rest: impl Iterator<Item = &'p str>) -> Lookup<'a> {
    match (value, rest.next()) {
        (ContextValue::Text(text), None) => Lookup::Scalar(text),
        (ContextValue::Number(_), None) => Lookup::Absent,
        (ContextValue::Nested(_), None) => Lookup::Nested,
        (ContextValue::Nested(map), Some(segment)) => match map.get(segment) {
            Some(child) => walk(child, rest),
            None => Lookup::Absent,
        },
        // Scalars have no children
        (ContextValue::Text(_) | ContextValue::Number(_), Some(_)) => Lookup::Absent,
    }
}
