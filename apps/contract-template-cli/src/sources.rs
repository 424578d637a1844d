//! File-system backed collaborators

use std::path::{Path, PathBuf};

use contract_template::{
    CollaboratorError, ContextSource, ContextState, ContractContextBuilder, ContractRecord,
    ExportArtifact, FileSink, Notifier, TemplateDataContext, Toast, ToastKind,
};

/// Shape of the JSON stored per contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextFormat {
    /// Already a template context
    Context,
    /// A contract record, formatted through [`ContractContextBuilder`]
    Record,
}

/// Reads `<dir>/<contract-id>.json`
pub struct JsonFileSource {
    dir: PathBuf,
    format: ContextFormat,
}

impl JsonFileSource {
    pub fn new(dir: impl Into<PathBuf>, format: ContextFormat) -> Self {
        Self {
            dir: dir.into(),
            format,
        }
    }

    fn load(&self, path: &Path) -> anyhow::Result<TemplateDataContext> {
        let json = std::fs::read_to_string(path)?;
        let context = match self.format {
            ContextFormat::Context => TemplateDataContext::from_json(&json)?,
            ContextFormat::Record => {
                let record: ContractRecord = serde_json::from_str(&json)?;
                ContractContextBuilder::new(record).build()
            }
        };
        Ok(context)
    }
}

impl ContextSource for JsonFileSource {
    fn fetch(&self, contract_id: &str) -> ContextState {
        let path = self.dir.join(format!("{contract_id}.json"));
        match self.load(&path) {
            Ok(context) => ContextState::Ready(context),
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Failed to load contract context");
                ContextState::Loading
            }
        }
    }
}

/// Writes artifacts into a directory
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl FileSink for DirectorySink {
    fn save(&mut self, artifact: &ExportArtifact) -> Result<(), CollaboratorError> {
        let path = self.dir.join(&artifact.file_name);
        std::fs::create_dir_all(&self.dir)
            .and_then(|()| std::fs::write(&path, &artifact.contents))
            .map_err(|e| CollaboratorError::DownloadFailed(format!("{}: {e}", path.display())))
    }
}

/// Toasts become log lines
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, toast: Toast) {
        match toast.kind {
            ToastKind::Success | ToastKind::Info => tracing::info!("{}", toast.message),
            ToastKind::Error => tracing::error!("{}", toast.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contract_template::{export_document, resolve_str, Document, Resolution};
    use pretty_assertions::assert_eq;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "contract-template-cli-{name}-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_reads_context_file() {
        let dir = scratch_dir("context");
        std::fs::write(dir.join("c-1.json"), r#"{"tenant": {"name": "Ana"}}"#).unwrap();

        let state = JsonFileSource::new(&dir, ContextFormat::Context).fetch("c-1");
        let context = state.context().unwrap();
        assert_eq!(resolve_str(context, "tenant.name"), Resolution::Resolved("Ana".to_string()));
    }

    #[test]
    fn test_reads_record_file() {
        let dir = scratch_dir("record");
        std::fs::write(dir.join("c-2.json"), r#"{"rentAmount": 2500}"#).unwrap();

        let state = JsonFileSource::new(&dir, ContextFormat::Record).fetch("c-2");
        let context = state.context().unwrap();
        assert_eq!(
            resolve_str(context, "rentAmount"),
            Resolution::Resolved("R$ 2.500,00".to_string())
        );
    }

    #[test]
    fn test_missing_file_stays_loading() {
        let dir = scratch_dir("missing");
        let state = JsonFileSource::new(&dir, ContextFormat::Context).fetch("nope");
        assert!(state.is_loading());
    }

    #[test]
    fn test_directory_sink_writes_file() {
        let dir = scratch_dir("sink");
        let artifact = export_document(&Document::default(), "modelo").unwrap();

        DirectorySink::new(&dir).save(&artifact).unwrap();

        assert!(dir.join("modelo.html").exists());
    }
}
