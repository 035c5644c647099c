//! The accessor tree generated from a catalog.
//!
//! Each namespace gets one generic tree keyed by alias segment. Groups own
//! their children; leaves hand out deferred [`Provider`]s.

pub mod cursor;
pub mod generator;
pub mod naming;
pub mod node;
pub mod provider;
pub mod tree;

pub use cursor::Accessor;
pub use generator::{CatalogAccessorGenerator, build_root, generate};
pub use node::{AccessorNode, Leaf};
pub use provider::{BundleProvider, LibraryProvider, PluginProvider, Provider, VersionProvider};
pub use tree::AccessorTree;
