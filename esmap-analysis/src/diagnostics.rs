//! Structured display diagnostics.
//!
//! Derived views never reject a document; anything suspicious becomes a
//! [`Diagnostic`] the UI can render distinctly. Diagnostics address fields
//! by full path, the stable name a JSON mapping document gives every field.

use std::fmt;

/// Diagnostic severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticSeverity {
    Error,
    Warning,
    Information,
    Hint,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Error => write!(f, "error"),
            DiagnosticSeverity::Warning => write!(f, "warning"),
            DiagnosticSeverity::Information => write!(f, "info"),
            DiagnosticSeverity::Hint => write!(f, "hint"),
        }
    }
}

/// A single structured diagnostic, anchored to a field path.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub path: String,
    pub severity: DiagnosticSeverity,
    pub message: String,
    pub code: Option<String>,
    pub source: String,
}

impl Diagnostic {
    pub fn new(path: impl Into<String>, severity: DiagnosticSeverity, message: String) -> Self {
        Self {
            path: path.into(),
            severity,
            message,
            code: None,
            source: "esmap-analysis".to_string(),
        }
    }

    pub fn warning(path: impl Into<String>, message: String) -> Self {
        Self::new(path, DiagnosticSeverity::Warning, message)
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}]: {} at '{}'",
            self.severity, self.source, self.message, self.path
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_code_and_source() {
        let diag = Diagnostic::warning("user.code", "alias target not found".to_string())
            .with_code("broken-alias-target")
            .with_source("test");

        assert_eq!(diag.severity, DiagnosticSeverity::Warning);
        assert_eq!(diag.code.as_deref(), Some("broken-alias-target"));
        assert_eq!(diag.source, "test");
    }

    #[test]
    fn display_includes_path_and_severity() {
        let diag = Diagnostic::warning("code", "alias target not found".to_string());
        let rendered = diag.to_string();
        assert!(rendered.starts_with("warning"));
        assert!(rendered.ends_with("at 'code'"));
    }
}
