//! Environment configuration for the CLI

use std::path::PathBuf;

/// Directory exported templates are written to
pub const EXPORT_DIR_VAR: &str = "CONTRACT_TEMPLATE_EXPORT_DIR";
/// Directory holding `<contract-id>.json` context files
pub const CONTEXT_DIR_VAR: &str = "CONTRACT_TEMPLATE_CONTEXT_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub export_dir: PathBuf,
    pub context_dir: PathBuf,
}

impl Config {
    /// Read from the process environment (after `.env` has been loaded)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let dir = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(default))
        };
        Self {
            export_dir: dir(EXPORT_DIR_VAR, "."),
            context_dir: dir(CONTEXT_DIR_VAR, "contracts"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.export_dir, PathBuf::from("."));
        assert_eq!(config.context_dir, PathBuf::from("contracts"));
    }

    #[test]
    fn test_overrides_and_blank_values() {
        let config = Config::from_lookup(|key| match key {
            EXPORT_DIR_VAR => Some("/tmp/out".to_string()),
            CONTEXT_DIR_VAR => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(config.export_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.context_dir, PathBuf::from("contracts"));
    }
}
