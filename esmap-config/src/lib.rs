//! Shared configuration loader for the esmap toolchain.
//!
//! `defaults/esmap.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files
//! on top of those defaults via [`Loader`] before deserializing into
//! [`EsmapConfig`]. The selected UI language is the only state esmap writes
//! back: [`persist_language`] saves it under the fixed `ui.language` key so
//! the state file can itself be layered as a configuration source.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/esmap.default.toml");

/// Top-level configuration consumed by esmap applications.
#[derive(Debug, Clone, Deserialize)]
pub struct EsmapConfig {
    pub ui: UiConfig,
    pub editor: EditorConfig,
    pub viewer: ViewerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    pub language: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EditorConfig {
    pub indent: usize,
}

/// Initial visibility of the visualization panels.
#[derive(Debug, Clone, Deserialize)]
pub struct ViewerConfig {
    pub show_shards: bool,
    pub show_fields: bool,
    pub show_analyzers: bool,
    pub show_tokenizers: bool,
    pub show_filters: bool,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<EsmapConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<EsmapConfig, ConfigError> {
    Loader::new().build()
}

#[derive(Serialize)]
struct PersistedState<'a> {
    ui: PersistedUi<'a>,
}

#[derive(Serialize)]
struct PersistedUi<'a> {
    language: &'a str,
}

/// Write the selected UI language to the state file.
///
/// The file contains only the `ui.language` key, so it layers cleanly as an
/// optional source on the next start.
pub fn persist_language(path: impl AsRef<Path>, language: &str) -> io::Result<()> {
    let state = PersistedState {
        ui: PersistedUi { language },
    };
    let rendered = toml::to_string(&state).map_err(io::Error::other)?;
    std::fs::write(path, rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.ui.language, "ko");
        assert_eq!(config.editor.indent, 2);
        assert!(!config.viewer.show_shards);
        assert!(config.viewer.show_fields);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("ui.language", "en")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.ui.language, "en");
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/definitely/not/a/real/path.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.ui.language, "ko");
    }

    #[test]
    fn persisted_language_layers_back_in() {
        let dir = tempfile::tempdir().expect("temp dir");
        let state_path = dir.path().join("state.toml");

        persist_language(&state_path, "en").expect("state to write");

        let config = Loader::new()
            .with_optional_file(&state_path)
            .build()
            .expect("config to build");
        assert_eq!(config.ui.language, "en");
        // Unrelated keys keep their defaults.
        assert_eq!(config.editor.indent, 2);
    }
}
