//! Interfaces to the collaborators around the engine
//!
//! The engine never reaches for ambient services. Data fetching, toasts,
//! the clipboard and file downloads are passed in explicitly.

use serde::{Deserialize, Serialize};

use crate::context::ContextState;
use crate::errors::CollaboratorError;
use crate::export::ExportArtifact;
use crate::variables::VariableDescriptor;

/// Supplies the substitution data for a contract
pub trait ContextSource {
    /// Current state of the context for `contract_id`. A failed fetch stays
    /// [`ContextState::Loading`]; reporting the failure is the source's job.
    fn fetch(&self, contract_id: &str) -> ContextState;
}

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Success,
    Info,
    Error,
}

/// A user-facing confirmation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }
}

/// Fire-and-forget notifications
pub trait Notifier {
    fn notify(&mut self, toast: Toast);
}

/// Clipboard write primitive
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), CollaboratorError>;
}

/// File download primitive
pub trait FileSink {
    fn save(&mut self, artifact: &ExportArtifact) -> Result<(), CollaboratorError>;
}

/// Copy a descriptor's `{{path}}` tag to the clipboard and confirm with a toast
pub fn copy_variable_tag(
    descriptor: &VariableDescriptor,
    clipboard: &mut dyn Clipboard,
    notifier: &mut dyn Notifier,
) -> Result<(), CollaboratorError> {
    let tag = descriptor.tag();
    match clipboard.write_text(&tag) {
        Ok(()) => {
            notifier.notify(Toast::success(format!("{tag} copiado para a área de transferência")));
            Ok(())
        }
        Err(e) => {
            tracing::warn!(error = %e, "Clipboard write failed");
            notifier.notify(Toast::error("Não foi possível copiar a variável"));
            Err(e)
        }
    }
}

/// Collaborator doubles shared by the unit tests
#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    #[derive(Default)]
    pub struct RecordingNotifier {
        pub toasts: Vec<Toast>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&mut self, toast: Toast) {
            self.toasts.push(toast);
        }
    }

    #[derive(Default)]
    pub struct MemoryClipboard {
        pub contents: Option<String>,
        pub fail: bool,
    }

    impl Clipboard for MemoryClipboard {
        fn write_text(&mut self, text: &str) -> Result<(), CollaboratorError> {
            if self.fail {
                return Err(CollaboratorError::ClipboardUnavailable("denied".to_string()));
            }
            self.contents = Some(text.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    pub struct MemorySink {
        pub saved: Vec<ExportArtifact>,
    }

    impl FileSink for MemorySink {
        fn save(&mut self, artifact: &ExportArtifact) -> Result<(), CollaboratorError> {
            self.saved.push(artifact.clone());
            Ok(())
        }
    }
}
