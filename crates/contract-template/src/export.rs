//! Export of the storage text as a downloadable file

use serde::Serialize;

use crate::collaborators::FileSink;
use crate::document::Document;
use crate::errors::{CollaboratorError, TemplateError};
use crate::transcoder::encode;

/// MIME type of exported templates
pub const EXPORT_MIME_TYPE: &str = "text/html";

/// File extension of exported templates
pub const EXPORT_EXTENSION: &str = "html";

/// An exported template ready to be saved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime_type: &'static str,
    pub contents: String,
}

/// Encode a document into a downloadable artifact named after `name`
pub fn export_document(document: &Document, name: &str) -> Result<ExportArtifact, TemplateError> {
    let stem = sanitize_file_stem(name);
    if stem.is_empty() {
        return Err(TemplateError::InvalidExportName(name.to_string()));
    }
    Ok(ExportArtifact {
        file_name: format!("{stem}.{EXPORT_EXTENSION}"),
        mime_type: EXPORT_MIME_TYPE,
        contents: encode(document),
    })
}

/// Hand an artifact to the download collaborator
pub fn save_export(artifact: &ExportArtifact, sink: &mut dyn FileSink) -> Result<(), CollaboratorError> {
    tracing::info!(
        file = %artifact.file_name,
        bytes = artifact.contents.len(),
        "Exporting template"
    );
    sink.save(artifact)
}

/// Keep letters, digits, `-` and `_`; spaces become `-`, anything else is dropped
fn sanitize_file_stem(name: &str) -> String {
    let stem = name.trim();
    let stem = stem
        .strip_suffix(&format!(".{EXPORT_EXTENSION}"))
        .unwrap_or(stem);
    stem.chars()
        .filter_map(|c| match c {
            c if c.is_alphanumeric() || c == '-' || c == '_' => Some(c),
            c if c.is_whitespace() => Some('-'),
            _ => None,
        })
        .collect()
}
