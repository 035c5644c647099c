pub mod alias;
pub mod catalog;
pub mod entry;

pub use alias::{Alias, Namespace};
pub use catalog::{DEFAULT_CATALOG_NAME, ResolvedLibrary, ResolvedPlugin, VersionCatalog};
pub use entry::{BundleEntry, LibraryEntry, PluginEntry, VersionConstraint, VersionRef};
