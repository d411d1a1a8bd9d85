//! Configuration diagnostics.
//!
//! This module only checks that the file can be found and parsed. Channel
//! crates contribute their own diagnostics for their sections through
//! [`ValidationResult::extend`].

use std::path::{Path, PathBuf};

use crate::{
    env_subst::substitute_env,
    loader::{find_config_file, parse_config},
    schema::LarkwireConfig,
};

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// A single validation diagnostic.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Category: "syntax", "io", "type-error", "credentials", "accounts",
    /// "ignored-field"
    pub category: &'static str,
    /// Dotted path, e.g. "channels.feishu.accounts.ops"
    pub path: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(
        severity: Severity,
        category: &'static str,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category,
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result of validating a configuration file.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub diagnostics: Vec<Diagnostic>,
    pub config_path: Option<PathBuf>,
    /// The parsed config, when parsing succeeded (or no file was found).
    pub config: Option<LarkwireConfig>,
}

impl ValidationResult {
    /// Returns `true` if any diagnostic is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Count diagnostics by severity.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Append diagnostics produced elsewhere (e.g. by a channel crate).
    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }
}

/// Validate the config file found in `config_dir` (or the standard
/// locations when `None`).
pub fn validate(config_dir: Option<&Path>) -> ValidationResult {
    match find_config_file(config_dir) {
        Some(path) => validate_file(&path),
        None => ValidationResult {
            config: Some(LarkwireConfig::default()),
            ..Default::default()
        },
    }
}

/// Validate a specific config file.
pub fn validate_file(path: &Path) -> ValidationResult {
    let mut result = ValidationResult {
        config_path: Some(path.to_path_buf()),
        ..Default::default()
    };

    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            result.diagnostics.push(Diagnostic::new(
                Severity::Error,
                "io",
                "",
                format!("failed to read {}: {e}", path.display()),
            ));
            return result;
        },
    };

    match parse_config(&substitute_env(&raw), path) {
        Ok(cfg) => result.config = Some(cfg),
        Err(e) => result
            .diagnostics
            .push(Diagnostic::new(Severity::Error, "syntax", "", e.to_string())),
    }
    result
}
