//! Human and machine readable views of an [`AccessorTree`].

use crate::accessor::{AccessorNode, AccessorTree, Leaf};
use crate::accessor::naming::getter_name;
use crate::diagnostics::AccessContext;
use crate::error::Result;
use crate::model::Namespace;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeSnapshot {
    pub catalog: String,
    pub context: AccessContext,
    pub namespaces: Vec<NamespaceSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceSnapshot {
    pub namespace: Namespace,
    pub root: NodeSnapshot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub segment: String,
    pub getter: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub leaves: Vec<LeafSnapshot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<NodeSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafSnapshot {
    pub segment: String,
    pub getter: String,
    pub alias: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
}

impl AccessorTree {
    /// Structural copy of the tree with every leaf resolved.
    pub fn snapshot(&self) -> Result<TreeSnapshot> {
        let namespaces = Namespace::ALL
            .into_iter()
            .map(|namespace| -> Result<NamespaceSnapshot> {
                Ok(NamespaceSnapshot {
                    namespace,
                    root: snapshot_node(self, namespace, self.root(namespace))?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(TreeSnapshot {
            catalog: self.name().to_string(),
            context: self.context(),
            namespaces,
        })
    }
}

fn snapshot_node(tree: &AccessorTree, namespace: Namespace, node: &AccessorNode) -> Result<NodeSnapshot> {
    let leaves = node
        .leaves()
        .map(|leaf| snapshot_leaf(tree, namespace, leaf))
        .collect::<Result<Vec<_>>>()?;
    let groups = node
        .children()
        .map(|child| snapshot_node(tree, namespace, child))
        .collect::<Result<Vec<_>>>()?;

    Ok(NodeSnapshot {
        segment: node.segment().to_string(),
        getter: if node.is_root() {
            String::new()
        } else {
            getter_name(node.segment())
        },
        leaves,
        groups,
    })
}

fn snapshot_leaf(tree: &AccessorTree, namespace: Namespace, leaf: &Leaf) -> Result<LeafSnapshot> {
    Ok(LeafSnapshot {
        segment: leaf.segment().to_string(),
        getter: leaf.getter(),
        alias: leaf.alias().to_string(),
        value: tree.provider(namespace, leaf).resolve_display()?,
        deprecated: tree.context().is_deprecated(namespace),
    })
}

/// Indented outline of the getters a build script would see.
///
/// Groups and leaves are merged in name order. A leaf that shares its name
/// with a group is shown inside the group as `asProvider()`.
pub fn render_outline(tree: &AccessorTree) -> Result<String> {
    let mut out = String::new();
    let context = match tree.context() {
        AccessContext::Project => "project",
        AccessContext::PluginsBlock => "plugins block",
    };
    out.push_str(&format!("{} ({context})\n", tree.name()));

    for namespace in Namespace::ALL {
        let root = tree.root(namespace);
        let depth = match namespace.accessor_prefix() {
            None => 1,
            Some(prefix) => {
                let mark = deprecated_mark(tree, namespace);
                out.push_str(&format!("  {}(){mark}\n", getter_name(prefix)));
                2
            }
        };
        render_node(tree, namespace, root, depth, &mut out)?;
    }

    Ok(out)
}

fn render_node(
    tree: &AccessorTree,
    namespace: Namespace,
    node: &AccessorNode,
    depth: usize,
    out: &mut String,
) -> Result<()> {
    let indent = "  ".repeat(depth);
    let mark = deprecated_mark(tree, namespace);

    let names: BTreeSet<&str> = node
        .leaves()
        .map(Leaf::segment)
        .chain(node.children().map(AccessorNode::segment))
        .collect();

    for name in names {
        match (node.child(name), node.leaf(name)) {
            (Some(child), leaf) => {
                out.push_str(&format!("{indent}{}(){mark}\n", getter_name(name)));
                if let Some(leaf) = leaf {
                    let value = tree.provider(namespace, leaf).resolve_display()?;
                    out.push_str(&format!("{indent}  asProvider(){mark} -> {value}\n"));
                }
                render_node(tree, namespace, child, depth + 1, out)?;
            }
            (None, Some(leaf)) => {
                let value = tree.provider(namespace, leaf).resolve_display()?;
                out.push_str(&format!("{indent}{}(){mark} -> {value}\n", leaf.getter()));
            }
            (None, None) => {}
        }
    }

    Ok(())
}

fn deprecated_mark(tree: &AccessorTree, namespace: Namespace) -> &'static str {
    if tree.context().is_deprecated(namespace) {
        " [deprecated]"
    } else {
        ""
    }
}
