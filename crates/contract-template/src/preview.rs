//! Placeholder display states and document preview
//!
//! Display state is recomputed from the current [`ContextState`] on every
//! render and never cached on the node, so re-rendering against the same
//! context always produces the same output.

use serde::{Deserialize, Serialize};

use crate::context::ContextState;
use crate::document::{Document, PlaceholderNode};
use crate::path::VariablePath;
use crate::resolver::{resolve, Resolution};
use crate::transcoder::encode::MarkupWriter;
use crate::transcoder::markup::{escape_attribute, escape_text};

/// CSS class carried by every rendered placeholder
pub const VARIABLE_CLASS: &str = "variable";
/// Added while the context is still loading
pub const LOADING_CLASS: &str = "variable-loading";
/// Added when the context does not provide the value
pub const ERROR_CLASS: &str = "variable-error";

/// How a single placeholder node should be displayed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum NodeDisplay {
    /// Edit mode: `{{label}}`, independent of the data
    Tag { label: String },
    /// Waiting for the context
    Loading,
    /// The resolved value, without braces
    Resolved { value: String },
    /// `{{label}}` in the error style
    Unresolved { label: String },
}

impl NodeDisplay {
    /// Text shown to the user; empty while loading
    pub fn text(&self) -> String {
        match self {
            NodeDisplay::Tag { label } | NodeDisplay::Unresolved { label } => {
                format!("{{{{{label}}}}}")
            }
            NodeDisplay::Loading => String::new(),
            NodeDisplay::Resolved { value } => value.clone(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, NodeDisplay::Unresolved { .. })
    }
}

/// Compute the display state of one node.
///
/// With `parse_variables` off every node shows its tag. With it on, nodes
/// show a loading state until the context is ready, then either the resolved
/// value or the unresolved tag.
pub fn render_node(node: &PlaceholderNode, parse_variables: bool, state: &ContextState) -> NodeDisplay {
    if !parse_variables {
        return NodeDisplay::Tag {
            label: node.fallback_label.clone(),
        };
    }
    match state {
        ContextState::Loading => NodeDisplay::Loading,
        ContextState::Ready(context) => match resolve(context, &node.path) {
            Resolution::Resolved(value) => NodeDisplay::Resolved { value },
            Resolution::Unresolved => NodeDisplay::Unresolved {
                label: node.fallback_label.clone(),
            },
        },
    }
}

/// Preview rendering options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PreviewOptions {
    /// Substitute values from the context instead of showing tags
    pub parse_variables: bool,
    /// Text placed inside loading placeholders
    pub loading_marker: String,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            parse_variables: true,
            loading_marker: "…".to_string(),
        }
    }
}

impl PreviewOptions {
    /// Edit mode: tags only
    pub fn edit() -> Self {
        Self {
            parse_variables: false,
            ..Self::default()
        }
    }
}

/// A rendered preview
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    /// Display markup
    pub html: String,
    /// Paths that could not be resolved, in document order (repeats included)
    pub unresolved: Vec<VariablePath>,
    /// Number of nodes still waiting for the context
    pub loading: usize,
}

impl Preview {
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty() && self.loading == 0
    }
}

/// Render a document for display, each placeholder wrapped in a `span` whose
/// classes reflect its state
pub fn render_preview(document: &Document, options: &PreviewOptions, state: &ContextState) -> Preview {
    let mut unresolved = Vec::new();
    let mut loading = 0;

    let html = MarkupWriter::new(|node: &PlaceholderNode, out: &mut String| {
        let display = render_node(node, options.parse_variables, state);
        let (classes, body) = match &display {
            NodeDisplay::Tag { .. } => (VARIABLE_CLASS.to_string(), display.text()),
            NodeDisplay::Loading => {
                loading += 1;
                (
                    format!("{VARIABLE_CLASS} {LOADING_CLASS}"),
                    options.loading_marker.clone(),
                )
            }
            NodeDisplay::Resolved { value } => (VARIABLE_CLASS.to_string(), value.clone()),
            NodeDisplay::Unresolved { .. } => {
                unresolved.push(node.path.clone());
                (format!("{VARIABLE_CLASS} {ERROR_CLASS}"), display.text())
            }
        };
        out.push_str("<span class=\"");
        out.push_str(&classes);
        out.push_str("\" data-variable=\"");
        escape_attribute(node.path.as_str(), out);
        out.push_str("\">");
        escape_text(&body, out);
        out.push_str("</span>");
    })
    .document(document);

    if !unresolved.is_empty() {
        tracing::debug!(count = unresolved.len(), "Preview has unresolved placeholders");
    }

    Preview {
        html,
        unresolved,
        loading,
    }
}
