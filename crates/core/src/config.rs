use crate::diagnostics::AccessContext;
use std::path::{Path, PathBuf};

pub const DEFAULT_LOG_DIR: &str = ".catscope/logs";

/// Settings shared by the generator and the command line front end.
#[derive(Debug, Clone)]
pub struct CatscopeConfig {
    /// Overrides the name derived from the catalog file.
    pub catalog_name: Option<String>,
    pub access: AccessContext,
    pub log_dir: PathBuf,
}

impl Default for CatscopeConfig {
    fn default() -> Self {
        Self {
            catalog_name: None,
            access: AccessContext::Project,
            log_dir: Self::default_log_dir(),
        }
    }
}

impl CatscopeConfig {
    /// Log directory, supporting the CATSCOPE_LOG_DIR env var.
    pub fn default_log_dir() -> PathBuf {
        if let Ok(env_dir) = std::env::var("CATSCOPE_LOG_DIR") {
            return PathBuf::from(env_dir);
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_LOG_DIR)
    }

    pub fn with_catalog_name(mut self, name: impl Into<String>) -> Self {
        self.catalog_name = Some(name.into());
        self
    }

    pub fn with_access(mut self, access: AccessContext) -> Self {
        self.access = access;
        self
    }

    /// The configured catalog name, or the one derived from `path`.
    pub fn catalog_name_for(&self, path: &Path) -> String {
        match &self.catalog_name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => crate::parser::catalog_name_from_path(path),
        }
    }
}
