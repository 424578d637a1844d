//! An editing session over one template
//!
//! Ties a decoded document to the current context state so the panel and the
//! preview are always computed against the same data.

use crate::collaborators::{ContextSource, FileSink, Notifier, Toast};
use crate::context::{ContextState, TemplateDataContext};
use crate::document::Document;
use crate::errors::TemplateError;
use crate::export::{export_document, save_export, ExportArtifact};
use crate::preview::{render_preview, Preview, PreviewOptions};
use crate::transcoder::{decode, encode};
use crate::variables::{variable_panel, VariablePanel};

pub struct TemplateSession {
    document: Document,
    state: ContextState,
    options: PreviewOptions,
}

impl TemplateSession {
    /// Open a session from stored template text. The context starts loading.
    pub fn new(storage_text: &str) -> Self {
        Self {
            document: decode(storage_text),
            state: ContextState::Loading,
            options: PreviewOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PreviewOptions) -> Self {
        self.options = options;
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn state(&self) -> &ContextState {
        &self.state
    }

    pub fn options_mut(&mut self) -> &mut PreviewOptions {
        &mut self.options
    }

    /// Fetch the context for `contract_id`
    pub fn load_context(&mut self, source: &dyn ContextSource, contract_id: &str) {
        self.state = source.fetch(contract_id);
        tracing::debug!(contract_id, loading = self.state.is_loading(), "Context loaded");
    }

    pub fn set_context(&mut self, context: TemplateDataContext) {
        self.state = ContextState::Ready(context);
    }

    pub fn panel(&self) -> VariablePanel {
        variable_panel(&self.state)
    }

    pub fn preview(&self) -> Preview {
        render_preview(&self.document, &self.options, &self.state)
    }

    /// Current document in storage form
    pub fn storage_text(&self) -> String {
        encode(&self.document)
    }

    /// Export the document and confirm with a toast. Collaborator failures are
    /// reported through the notifier and returned.
    pub fn export(
        &self,
        name: &str,
        sink: &mut dyn FileSink,
        notifier: &mut dyn Notifier,
    ) -> Result<ExportArtifact, TemplateError> {
        let artifact = export_document(&self.document, name)?;
        match save_export(&artifact, sink) {
            Ok(()) => {
                notifier.notify(Toast::success(format!("{} exportado", artifact.file_name)));
                Ok(artifact)
            }
            Err(e) => {
                notifier.notify(Toast::error("Não foi possível exportar o modelo"));
                Err(TemplateError::Export(e))
            }
        }
    }
}
