//! Live substitution data for a rendering session
//!
//! A [`TemplateDataContext`] is a nested mapping of landlord, tenant, property
//! and contract fields. Missing branches are normal: contracts are often only
//! partially filled in. [`ContextState`] makes the "still loading" case explicit
//! instead of overloading an absent value.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::errors::TemplateError;

/// A single value in the context tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContextValue {
    /// Text leaf, the only kind of value a placeholder can display
    Text(String),
    /// Numeric leaf; must be pre-formatted into text before it can be substituted
    Number(f64),
    /// Nested mapping (e.g. everything under `tenant`)
    Nested(BTreeMap<String, ContextValue>),
}

impl ContextValue {
    pub fn text(value: impl Into<String>) -> Self {
        ContextValue::Text(value.into())
    }

    /// Build a nested value from `(key, value)` pairs
    pub fn nested<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, ContextValue)>,
    {
        ContextValue::Nested(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Convert a JSON value, returning `None` for kinds the context cannot hold
    /// (null, booleans, arrays). Those keys are treated as absent.
    fn from_json(value: serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Some(ContextValue::Text(s)),
            serde_json::Value::Number(n) => n.as_f64().map(ContextValue::Number),
            serde_json::Value::Object(map) => Some(ContextValue::Nested(convert_object(map))),
            other => {
                tracing::trace!(kind = json_kind(&other), "Dropping unsupported context value");
                None
            }
        }
    }
}

fn convert_object(map: serde_json::Map<String, serde_json::Value>) -> BTreeMap<String, ContextValue> {
    map.into_iter()
        .filter_map(|(key, value)| ContextValue::from_json(value).map(|v| (key, v)))
        .collect()
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Nested substitution data, read-only from the engine's point of view
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TemplateDataContext {
    entries: BTreeMap<String, ContextValue>,
}

impl TemplateDataContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a top-level entry
    pub fn with(mut self, key: impl Into<String>, value: ContextValue) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: ContextValue) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.entries.get(key)
    }

    /// Top-level entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContextValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a context from JSON text
    pub fn from_json(json: &str) -> Result<Self, TemplateError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::try_from(value)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, TemplateError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl TryFrom<serde_json::Value> for TemplateDataContext {
    type Error = TemplateError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Object(map) => Ok(Self {
                entries: convert_object(map),
            }),
            other => Err(TemplateError::ContextNotAnObject(json_kind(&other))),
        }
    }
}

/// Availability of the context for the current rendering pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum ContextState {
    /// The data fetch has not completed (or failed; the state never leaves loading)
    #[default]
    Loading,
    /// Data is available
    Ready(TemplateDataContext),
}

impl ContextState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ContextState::Loading)
    }

    pub fn context(&self) -> Option<&TemplateDataContext> {
        match self {
            ContextState::Loading => None,
            ContextState::Ready(context) => Some(context),
        }
    }
}

impl From<Option<TemplateDataContext>> for ContextState {
    fn from(value: Option<TemplateDataContext>) -> Self {
        match value {
            Some(context) => ContextState::Ready(context),
            None => ContextState::Loading,
        }
    }
}

impl From<TemplateDataContext> for ContextState {
    fn from(context: TemplateDataContext) -> Self {
        ContextState::Ready(context)
    }
}
