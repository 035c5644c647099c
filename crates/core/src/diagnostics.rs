//! Advisory diagnostics raised while walking the accessor tree.
//!
//! Reporting never changes what an accessor returns. Call sites pass a
//! reporter only when they want to hear about deprecated access.

use crate::model::Namespace;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

pub const PLUGINS_BLOCK_MESSAGE: &str =
    "Accessing libraries or bundles from version catalogs in the plugins block.";
pub const PLUGINS_BLOCK_ADVICE: &str =
    "Only use versions or plugins from catalogs in the plugins block.";

/// Where the catalog accessors are being used from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccessContext {
    #[default]
    Project,
    /// Inside a build script's `plugins {}` block, where only versions and plugins belong.
    PluginsBlock,
}

impl AccessContext {
    /// Whether touching `namespace` from this context is deprecated.
    pub fn is_deprecated(&self, namespace: Namespace) -> bool {
        matches!(self, AccessContext::PluginsBlock)
            && matches!(namespace, Namespace::Library | Namespace::Bundle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    Deprecation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub advice: Option<String>,
    /// Accessor path that triggered the diagnostic, e.g. `libs.androidx.test`.
    pub path: String,
}

impl Diagnostic {
    pub fn plugins_block_access(path: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::Deprecation,
            message: PLUGINS_BLOCK_MESSAGE.to_string(),
            advice: Some(PLUGINS_BLOCK_ADVICE.to_string()),
            path: path.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.path)?;
        if let Some(advice) = &self.advice {
            write!(f, " {advice}")?;
        }
        Ok(())
    }
}

pub trait DiagnosticReporter: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to the `tracing` subscriber as warnings.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl DiagnosticReporter for TracingReporter {
    fn report(&self, diagnostic: Diagnostic) {
        tracing::warn!(
            path = %diagnostic.path,
            kind = ?diagnostic.kind,
            "{}",
            diagnostic
        );
    }
}

/// Buffers diagnostics in memory.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.buffer().clone()
    }

    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.buffer())
    }

    pub fn len(&self) -> usize {
        self.buffer().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A panic elsewhere while holding the lock leaves the Vec intact.
    fn buffer(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl DiagnosticReporter for CollectingReporter {
    fn report(&self, diagnostic: Diagnostic) {
        self.buffer().push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_libraries_and_bundles_are_deprecated_in_plugins_block() {
        let ctx = AccessContext::PluginsBlock;
        assert!(ctx.is_deprecated(Namespace::Library));
        assert!(ctx.is_deprecated(Namespace::Bundle));
        assert!(!ctx.is_deprecated(Namespace::Version));
        assert!(!ctx.is_deprecated(Namespace::Plugin));
        assert!(!AccessContext::Project.is_deprecated(Namespace::Library));
    }

    #[test]
    fn test_collecting_reporter() {
        let reporter = CollectingReporter::new();
        reporter.report(Diagnostic::plugins_block_access("libs.truth"));
        assert_eq!(reporter.len(), 1);

        let taken = reporter.take();
        assert_eq!(taken[0].path, "libs.truth");
        assert_eq!(taken[0].kind, DiagnosticKind::Deprecation);
        assert!(reporter.is_empty());
    }

    #[test]
    fn test_collecting_reporter_survives_poisoned_lock() {
        let reporter = std::sync::Arc::new(CollectingReporter::new());
        reporter.report(Diagnostic::plugins_block_access("libs.androidx"));

        let poisoner = reporter.clone();
        let _ = std::thread::spawn(move || {
            let _held = poisoner.diagnostics.lock().unwrap();
            panic!("poison the buffer");
        })
        .join();
        assert!(reporter.diagnostics.is_poisoned());

        reporter.report(Diagnostic::plugins_block_access("libs.androidx.test"));
        let paths: Vec<String> = reporter.take().into_iter().map(|d| d.path).collect();
        assert_eq!(paths, vec!["libs.androidx", "libs.androidx.test"]);
    }
}
