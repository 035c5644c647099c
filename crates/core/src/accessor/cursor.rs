use super::naming::accessor_path;
use super::node::AccessorNode;
use super::provider::Provider;
use super::tree::AccessorTree;
use crate::diagnostics::{Diagnostic, DiagnosticReporter};
use crate::model::{Alias, Namespace};

/// A position in the accessor tree, stepped like a getter chain:
/// `libs.androidx().test().espresso().core()` becomes
/// `tree.accessor(Library).group("androidx")?.group("test")?.group("espresso")?.lookup("core")`.
///
/// When the tree was generated for the plugins block, stepping into library
/// or bundle accessors reports a deprecation to the reporter, if one is set.
#[derive(Clone, Copy)]
pub struct Accessor<'t> {
    tree: &'t AccessorTree,
    namespace: Namespace,
    node: &'t AccessorNode,
    reporter: Option<&'t dyn DiagnosticReporter>,
}

impl<'t> Accessor<'t> {
    pub(crate) fn enter(
        tree: &'t AccessorTree,
        namespace: Namespace,
        reporter: Option<&'t dyn DiagnosticReporter>,
    ) -> Self {
        let cursor = Self {
            tree,
            namespace,
            node: tree.root(namespace),
            reporter,
        };
        // The library root is the catalog itself; `bundles` is a getter on it.
        if namespace == Namespace::Bundle {
            cursor.report(cursor.display_path(None));
        }
        cursor
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    /// Build-script path of this position, e.g. `libs.versions.androidx`.
    pub fn path(&self) -> String {
        self.display_path(None)
    }

    /// Steps into a child group.
    pub fn group(self, segment: &str) -> Option<Accessor<'t>> {
        let next = Accessor {
            node: self.node.child(segment)?,
            ..self
        };
        next.report(next.display_path(None));
        Some(next)
    }

    /// Invokes the leaf lookup named `segment` on this group.
    pub fn lookup(&self, segment: &str) -> Option<Provider> {
        let leaf = self.node.leaf(segment)?;
        self.report(self.display_path(Some(segment)));
        Some(self.tree.provider(self.namespace, leaf))
    }

    /// The lookup that shares this group's name (`libs.retrofit` next to
    /// `libs.retrofit.converter`), if the catalog declares one.
    pub fn as_provider(&self) -> Option<Provider> {
        if self.node.is_root() {
            return None;
        }
        let alias = Alias::parse(self.namespace, self.node.path()).ok()?;
        let leaf = self.tree.traverse(self.namespace, &alias)?;
        self.report(self.display_path(None));
        Some(self.tree.provider(self.namespace, leaf))
    }

    fn display_path(&self, leaf: Option<&str>) -> String {
        accessor_path(
            [self.tree.name()]
                .into_iter()
                .chain(self.namespace.accessor_prefix())
                .chain(self.node.path().split('.'))
                .chain(leaf),
        )
    }

    fn report(&self, path: String) {
        let Some(reporter) = self.reporter else {
            return;
        };
        if self.tree.context().is_deprecated(self.namespace) {
            reporter.report(Diagnostic::plugins_block_access(path));
        }
    }
}
