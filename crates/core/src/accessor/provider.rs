//! Deferred handles returned by leaf lookups.
//!
//! A provider only remembers which alias it stands for. The catalog entry is
//! read when `get()` is called, never while the tree is generated.

use crate::error::Result;
use crate::model::{
    Alias, Namespace, ResolvedLibrary, ResolvedPlugin, VersionCatalog, VersionConstraint,
};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct LibraryProvider {
    catalog: Arc<VersionCatalog>,
    alias: Alias,
}

impl LibraryProvider {
    pub fn new(catalog: Arc<VersionCatalog>, alias: Alias) -> Self {
        Self { catalog, alias }
    }

    pub fn alias(&self) -> &Alias {
        &self.alias
    }

    pub fn get(&self) -> Result<ResolvedLibrary> {
        self.catalog.resolve_library(&self.alias)
    }
}

#[derive(Debug, Clone)]
pub struct VersionProvider {
    catalog: Arc<VersionCatalog>,
    alias: Alias,
}

impl VersionProvider {
    pub fn new(catalog: Arc<VersionCatalog>, alias: Alias) -> Self {
        Self { catalog, alias }
    }

    pub fn alias(&self) -> &Alias {
        &self.alias
    }

    /// The version as one string. Rich versions that cannot be written as a
    /// single string yield an empty string.
    pub fn get(&self) -> Result<String> {
        Ok(self.catalog.version(&self.alias)?.display_string())
    }

    /// The declared constraint, including rich versions.
    pub fn constraint(&self) -> Result<&VersionConstraint> {
        self.catalog.version(&self.alias)
    }
}

#[derive(Debug, Clone)]
pub struct BundleProvider {
    catalog: Arc<VersionCatalog>,
    alias: Alias,
}

impl BundleProvider {
    pub fn new(catalog: Arc<VersionCatalog>, alias: Alias) -> Self {
        Self { catalog, alias }
    }

    pub fn alias(&self) -> &Alias {
        &self.alias
    }

    /// Member aliases in declaration order.
    pub fn members(&self) -> Result<&[Alias]> {
        Ok(&self.catalog.bundle(&self.alias)?.libraries)
    }

    pub fn get(&self) -> Result<Vec<ResolvedLibrary>> {
        self.catalog.resolve_bundle(&self.alias)
    }
}

#[derive(Debug, Clone)]
pub struct PluginProvider {
    catalog: Arc<VersionCatalog>,
    alias: Alias,
}

impl PluginProvider {
    pub fn new(catalog: Arc<VersionCatalog>, alias: Alias) -> Self {
        Self { catalog, alias }
    }

    pub fn alias(&self) -> &Alias {
        &self.alias
    }

    pub fn get(&self) -> Result<ResolvedPlugin> {
        self.catalog.resolve_plugin(&self.alias)
    }
}

#[derive(Debug, Clone)]
pub enum Provider {
    Library(LibraryProvider),
    Version(VersionProvider),
    Bundle(BundleProvider),
    Plugin(PluginProvider),
}

impl Provider {
    pub fn new(catalog: Arc<VersionCatalog>, namespace: Namespace, alias: Alias) -> Self {
        match namespace {
            Namespace::Library => Provider::Library(LibraryProvider::new(catalog, alias)),
            Namespace::Version => Provider::Version(VersionProvider::new(catalog, alias)),
            Namespace::Bundle => Provider::Bundle(BundleProvider::new(catalog, alias)),
            Namespace::Plugin => Provider::Plugin(PluginProvider::new(catalog, alias)),
        }
    }

    pub fn namespace(&self) -> Namespace {
        match self {
            Provider::Library(_) => Namespace::Library,
            Provider::Version(_) => Namespace::Version,
            Provider::Bundle(_) => Namespace::Bundle,
            Provider::Plugin(_) => Namespace::Plugin,
        }
    }

    pub fn alias(&self) -> &Alias {
        match self {
            Provider::Library(p) => p.alias(),
            Provider::Version(p) => p.alias(),
            Provider::Bundle(p) => p.alias(),
            Provider::Plugin(p) => p.alias(),
        }
    }

    /// Resolves the provider and formats the value for display.
    pub fn resolve_display(&self) -> Result<String> {
        Ok(match self {
            Provider::Library(p) => p.get()?.to_string(),
            Provider::Version(p) => p.get()?,
            Provider::Bundle(p) => p
                .get()?
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            Provider::Plugin(p) => p.get()?.to_string(),
        })
    }

    pub fn as_library(&self) -> Option<&LibraryProvider> {
        match self {
            Provider::Library(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_version(&self) -> Option<&VersionProvider> {
        match self {
            Provider::Version(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_bundle(&self) -> Option<&BundleProvider> {
        match self {
            Provider::Bundle(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_plugin(&self) -> Option<&PluginProvider> {
        match self {
            Provider::Plugin(p) => Some(p),
            _ => None,
        }
    }
}
