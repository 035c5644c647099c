use super::cursor::Accessor;
use super::node::{AccessorNode, Leaf};
use super::provider::Provider;
use crate::diagnostics::{AccessContext, DiagnosticReporter};
use crate::model::{Alias, Namespace, VersionCatalog};
use std::sync::Arc;

/// The generated accessors of one catalog: a root node per namespace.
///
/// Read-only once built; share it behind an `Arc` between threads.
#[derive(Debug, Clone)]
pub struct AccessorTree {
    catalog: Arc<VersionCatalog>,
    context: AccessContext,
    libraries: AccessorNode,
    versions: AccessorNode,
    bundles: AccessorNode,
    plugins: AccessorNode,
}

impl AccessorTree {
    pub(crate) fn new(
        catalog: Arc<VersionCatalog>,
        context: AccessContext,
        libraries: AccessorNode,
        versions: AccessorNode,
        bundles: AccessorNode,
        plugins: AccessorNode,
    ) -> Self {
        Self {
            catalog,
            context,
            libraries,
            versions,
            bundles,
            plugins,
        }
    }

    pub fn catalog(&self) -> &Arc<VersionCatalog> {
        &self.catalog
    }

    /// Accessor name of the catalog in build scripts, usually `libs`.
    pub fn name(&self) -> &str {
        &self.catalog.name
    }

    pub fn context(&self) -> AccessContext {
        self.context
    }

    pub fn root(&self, namespace: Namespace) -> &AccessorNode {
        match namespace {
            Namespace::Library => &self.libraries,
            Namespace::Version => &self.versions,
            Namespace::Bundle => &self.bundles,
            Namespace::Plugin => &self.plugins,
        }
    }

    /// Walks `alias` from its namespace root to the leaf that resolves it.
    pub fn traverse(&self, namespace: Namespace, alias: &Alias) -> Option<&Leaf> {
        self.root(namespace).find_leaf(alias)
    }

    /// Direct lookup by alias, accepting any separator style.
    pub fn lookup(&self, namespace: Namespace, alias: &str) -> Option<Provider> {
        let alias = Alias::parse(namespace, alias).ok()?;
        let leaf = self.traverse(namespace, &alias)?;
        Some(self.provider(namespace, leaf))
    }

    /// Deferred provider for a leaf of this tree.
    pub fn provider(&self, namespace: Namespace, leaf: &Leaf) -> Provider {
        Provider::new(self.catalog.clone(), namespace, leaf.alias().clone())
    }

    /// Cursor over a namespace without diagnostics.
    pub fn accessor(&self, namespace: Namespace) -> Accessor<'_> {
        Accessor::enter(self, namespace, None)
    }

    /// Cursor over a namespace that reports deprecated access to `reporter`.
    pub fn accessor_with<'t>(
        &'t self,
        namespace: Namespace,
        reporter: &'t dyn DiagnosticReporter,
    ) -> Accessor<'t> {
        Accessor::enter(self, namespace, Some(reporter))
    }

    /// Resolves a build-script style expression such as
    /// `libs.androidx.test.espresso.core` or `libs.versions.truth`.
    ///
    /// The leading catalog name is optional. Returns `None` when the path does
    /// not end on a leaf.
    pub fn resolve_path(
        &self,
        expression: &str,
        reporter: Option<&dyn DiagnosticReporter>,
    ) -> Option<Provider> {
        let mut segments: Vec<&str> = expression.split('.').collect();
        if segments.first() == Some(&self.name()) {
            segments.remove(0);
        }

        let namespace = match segments.first().copied() {
            Some(prefix) => Namespace::ALL
                .into_iter()
                .find(|ns| ns.accessor_prefix() == Some(prefix)),
            None => return None,
        };
        let namespace = match namespace {
            Some(ns) => {
                segments.remove(0);
                ns
            }
            None => Namespace::Library,
        };

        let (leaf, path) = segments.split_last()?;
        let mut cursor = Accessor::enter(self, namespace, reporter);
        for segment in path {
            cursor = cursor.group(segment)?;
        }
        cursor.lookup(leaf)
    }
}
