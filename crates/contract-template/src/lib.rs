//! Rental contract template engine
//!
//! Templates are rich text documents containing `{{path}}` placeholders that
//! are resolved against live contract data. This crate provides:
//! - The variable catalog offered to template authors, grouped by category
//! - Dot-path resolution against a nested [`TemplateDataContext`]
//! - Lossless transcoding between stored template text and a [`Document`] tree
//! - Preview rendering with loading, resolved and unresolved states
//! - Live promotion of typed `{{path}}` patterns while authoring
//! - Export of the stored form as a downloadable file
//!
//! Contract records are turned into a context (with money and dates already
//! formatted) by [`ContractContextBuilder`].

pub mod authoring;
pub mod collaborators;
pub mod context;
pub mod contract;
pub mod document;
pub mod errors;
pub mod export;
#[cfg(test)]
mod log_capture;
pub mod notifications;
pub mod path;
pub mod preview;
pub mod resolver;
pub mod session;
pub mod transcoder;
pub mod variables;

pub use authoring::{Deleted, TextBlockEditor};
pub use collaborators::{copy_variable_tag, Clipboard, ContextSource, FileSink, Notifier, Toast, ToastKind};
pub use context::{ContextState, ContextValue, TemplateDataContext};
pub use contract::{ContractContextBuilder, ContractRecord, ContractTerms, PartyInfo, PropertyInfo};
pub use document::{Block, Document, Inline, ListItem, PlaceholderNode};
pub use errors::{CollaboratorError, FeedError, InvalidPathError, TemplateError};
pub use export::{export_document, save_export, ExportArtifact};
pub use notifications::{FeedTransport, Notification, NotificationFeed};
pub use path::VariablePath;
pub use preview::{render_node, render_preview, NodeDisplay, Preview, PreviewOptions};
pub use resolver::{resolve, resolve_str, Resolution};
pub use session::TemplateSession;
pub use transcoder::{decode, encode, normalize};
pub use variables::{
    available_paths, filter_available, find_variable, group_by_category, list_variables,
    variable_panel, Category, PanelSection, VariableDescriptor, VariablePanel,
};
