pub mod accessor;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod logging;
pub mod model;
pub mod parser;
pub mod render;

pub use accessor::{
    Accessor, AccessorNode, AccessorTree, CatalogAccessorGenerator, Leaf, Provider, generate,
};
pub use config::CatscopeConfig;
pub use diagnostics::{AccessContext, CollectingReporter, DiagnosticReporter, TracingReporter};
pub use error::{CatalogError, Result};
pub use model::{Alias, Namespace, VersionCatalog};
pub use parser::{load_catalog, parse_catalog};

use std::path::Path;
use std::sync::Arc;

/// Loads a catalog file and generates its accessors with the given settings.
pub fn load_accessors(path: &Path, config: &CatscopeConfig) -> Result<AccessorTree> {
    let source = std::fs::read_to_string(path)?;
    let catalog = parse_catalog(&config.catalog_name_for(path), &source)?;
    Ok(CatalogAccessorGenerator::new(config.access).generate(Arc::new(catalog)))
}
