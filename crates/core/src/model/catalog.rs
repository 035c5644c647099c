use super::alias::{Alias, Namespace};
use super::entry::{BundleEntry, LibraryEntry, PluginEntry, VersionConstraint, VersionRef};
use crate::error::{CatalogError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_CATALOG_NAME: &str = "libs";

/// A parsed version catalog. Tables keep declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VersionCatalog {
    pub name: String,
    pub versions: IndexMap<Alias, VersionConstraint>,
    pub libraries: IndexMap<Alias, LibraryEntry>,
    pub bundles: IndexMap<Alias, BundleEntry>,
    pub plugins: IndexMap<Alias, PluginEntry>,
}

/// A library with its version reference resolved against `[versions]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLibrary {
    pub group: String,
    pub name: String,
    /// Empty when the library has no version or a rich one.
    pub version: String,
}

impl fmt::Display for ResolvedLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.version.is_empty() {
            write!(f, "{}:{}", self.group, self.name)
        } else {
            write!(f, "{}:{}:{}", self.group, self.name, self.version)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPlugin {
    pub id: String,
    pub version: String,
}

impl fmt::Display for ResolvedPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.version.is_empty() {
            f.write_str(&self.id)
        } else {
            write!(f, "{}:{}", self.id, self.version)
        }
    }
}

impl VersionCatalog {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// All aliases of a namespace in declaration order.
    pub fn aliases(&self, namespace: Namespace) -> Vec<&Alias> {
        match namespace {
            Namespace::Library => self.libraries.keys().collect(),
            Namespace::Version => self.versions.keys().collect(),
            Namespace::Bundle => self.bundles.keys().collect(),
            Namespace::Plugin => self.plugins.keys().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.versions.len() + self.libraries.len() + self.bundles.len() + self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn version(&self, alias: &Alias) -> Result<&VersionConstraint> {
        self.versions
            .get(alias)
            .ok_or_else(|| unknown(Namespace::Version, alias))
    }

    pub fn library(&self, alias: &Alias) -> Result<&LibraryEntry> {
        self.libraries
            .get(alias)
            .ok_or_else(|| unknown(Namespace::Library, alias))
    }

    pub fn bundle(&self, alias: &Alias) -> Result<&BundleEntry> {
        self.bundles
            .get(alias)
            .ok_or_else(|| unknown(Namespace::Bundle, alias))
    }

    pub fn plugin(&self, alias: &Alias) -> Result<&PluginEntry> {
        self.plugins
            .get(alias)
            .ok_or_else(|| unknown(Namespace::Plugin, alias))
    }

    /// Single-string version of a `VersionRef`, following references into `[versions]`.
    pub fn version_string(&self, version: &VersionRef) -> Result<String> {
        match version {
            VersionRef::Reference(alias) => Ok(self.version(alias)?.display_string()),
            VersionRef::Inline(constraint) => Ok(constraint.display_string()),
            VersionRef::None => Ok(String::new()),
        }
    }

    pub fn resolve_library(&self, alias: &Alias) -> Result<ResolvedLibrary> {
        let entry = self.library(alias)?;
        Ok(ResolvedLibrary {
            group: entry.group.clone(),
            name: entry.name.clone(),
            version: self.version_string(&entry.version)?,
        })
    }

    pub fn resolve_bundle(&self, alias: &Alias) -> Result<Vec<ResolvedLibrary>> {
        self.bundle(alias)?
            .libraries
            .iter()
            .map(|member| self.resolve_library(member))
            .collect()
    }

    pub fn resolve_plugin(&self, alias: &Alias) -> Result<ResolvedPlugin> {
        let entry = self.plugin(alias)?;
        Ok(ResolvedPlugin {
            id: entry.id.clone(),
            version: self.version_string(&entry.version)?,
        })
    }
}

fn unknown(namespace: Namespace, alias: &Alias) -> CatalogError {
    CatalogError::UnknownAlias {
        namespace,
        alias: alias.to_string(),
    }
}
