//! Error types for context loading and export
//!
//! Decoding, encoding and resolution never fail; these errors only cover the
//! boundaries where data enters or leaves the engine.

use thiserror::Error;

/// Library-level errors
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Invalid template context: {0}")]
    InvalidContext(#[from] serde_json::Error),

    #[error("Context root must be a JSON object, found {0}")]
    ContextNotAnObject(&'static str),

    #[error("Invalid export name: {0}")]
    InvalidExportName(String),

    #[error("Export failed: {0}")]
    Export(#[from] CollaboratorError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors reported by external collaborators (clipboard, file sink)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    #[error("Clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),
}

/// Errors from the notification feed connection
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    #[error("Feed is already connected for user {0}")]
    AlreadyConnected(String),

    #[error("Feed is not connected")]
    NotConnected,

    #[error("Transport error: {0}")]
    Transport(String),
}

/// A string that is not a valid dot-separated variable path
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid variable path: {0:?}")]
pub struct InvalidPathError(pub String);
