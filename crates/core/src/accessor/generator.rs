use super::node::{AccessorNode, Leaf};
use super::tree::AccessorTree;
use crate::diagnostics::AccessContext;
use crate::model::{Alias, Namespace, VersionCatalog};
use std::sync::Arc;
use tracing::debug;

/// Turns a parsed catalog into an [`AccessorTree`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogAccessorGenerator {
    context: AccessContext,
}

impl CatalogAccessorGenerator {
    pub fn new(context: AccessContext) -> Self {
        Self { context }
    }

    pub fn generate(&self, catalog: Arc<VersionCatalog>) -> AccessorTree {
        let [libraries, versions, bundles, plugins] =
            Namespace::ALL.map(|ns| build_root(catalog.aliases(ns)));

        debug!(
            "Generated accessors for '{}' ({:?}): {} library groups, {} version groups",
            catalog.name,
            self.context,
            libraries.group_count(),
            versions.group_count()
        );

        AccessorTree::new(catalog, self.context, libraries, versions, bundles, plugins)
    }
}

/// Generates accessors for use outside the plugins block.
pub fn generate(catalog: Arc<VersionCatalog>) -> AccessorTree {
    CatalogAccessorGenerator::default().generate(catalog)
}

/// Builds one namespace root. Every alias contributes its group path and a
/// leaf on the last group; shared prefixes land on the same node.
pub fn build_root<'a>(aliases: impl IntoIterator<Item = &'a Alias>) -> AccessorNode {
    let mut root = AccessorNode::root();
    for alias in aliases {
        let (path, leaf) = alias.split_leaf();
        let parent = path
            .into_iter()
            .fold(&mut root, |node, segment| node.ensure_child(segment));
        parent.insert_leaf(Leaf::new(leaf, alias.clone()));
    }
    root
}
