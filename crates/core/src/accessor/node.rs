use super::naming::getter_name;
use crate::model::Alias;
use std::collections::BTreeMap;

/// A lookup method installed on a grouping node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    segment: String,
    alias: Alias,
}

impl Leaf {
    pub(crate) fn new(segment: impl Into<String>, alias: Alias) -> Self {
        Self {
            segment: segment.into(),
            alias,
        }
    }

    pub fn segment(&self) -> &str {
        &self.segment
    }

    /// The catalog alias this lookup resolves.
    pub fn alias(&self) -> &Alias {
        &self.alias
    }

    pub fn getter(&self) -> String {
        getter_name(&self.segment)
    }
}

/// One segment of the accessor tree.
///
/// Children and leaves are kept in `BTreeMap`s so the shape of a node only
/// depends on the set of aliases, never on the order they were declared in.
/// A segment can name a child group and a leaf at the same time, as with
/// `retrofit` next to `retrofit.converter.gson`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessorNode {
    segment: String,
    path: String,
    children: BTreeMap<String, AccessorNode>,
    leaves: BTreeMap<String, Leaf>,
}

impl AccessorNode {
    pub(crate) fn root() -> Self {
        Self::default()
    }

    fn group(parent: &str, segment: &str) -> Self {
        let path = if parent.is_empty() {
            segment.to_string()
        } else {
            format!("{parent}.{segment}")
        };
        Self {
            segment: segment.to_string(),
            path,
            ..Default::default()
        }
    }

    /// Segment name; empty for a namespace root.
    pub fn segment(&self) -> &str {
        &self.segment
    }

    /// Dotted group path from the namespace root, e.g. `androidx.test`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_root(&self) -> bool {
        self.segment.is_empty()
    }

    pub fn child(&self, segment: &str) -> Option<&AccessorNode> {
        self.children.get(segment)
    }

    pub fn leaf(&self, segment: &str) -> Option<&Leaf> {
        self.leaves.get(segment)
    }

    pub fn children(&self) -> impl Iterator<Item = &AccessorNode> {
        self.children.values()
    }

    pub fn leaves(&self) -> impl Iterator<Item = &Leaf> {
        self.leaves.values()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.leaves.is_empty()
    }

    /// Number of grouping nodes below this one.
    pub fn group_count(&self) -> usize {
        self.children
            .values()
            .map(|child| 1 + child.group_count())
            .sum()
    }

    /// Number of leaf lookups in this subtree.
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
            + self
                .children
                .values()
                .map(AccessorNode::leaf_count)
                .sum::<usize>()
    }

    /// Walks `path` through child groups.
    pub fn descend<'a>(&self, path: impl IntoIterator<Item = &'a str>) -> Option<&AccessorNode> {
        path.into_iter()
            .try_fold(self, |node, segment| node.child(segment))
    }

    /// Group path of the alias, then its leaf.
    pub fn find_leaf(&self, alias: &Alias) -> Option<&Leaf> {
        let (path, leaf) = alias.split_leaf();
        self.descend(path)?.leaf(leaf)
    }

    pub(crate) fn ensure_child(&mut self, segment: &str) -> &mut AccessorNode {
        let parent = &self.path;
        self.children
            .entry(segment.to_string())
            .or_insert_with(|| AccessorNode::group(parent, segment))
    }

    pub(crate) fn insert_leaf(&mut self, leaf: Leaf) {
        self.leaves.insert(leaf.segment.clone(), leaf);
    }
}
