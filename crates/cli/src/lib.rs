mod check;
mod get;
mod tree;

use catscope_core::{AccessContext, CatscopeConfig};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "catscope",
    version,
    about = "Inspect version catalogs through their generated accessors",
    long_about = "Catscope reads a libs.versions.toml catalog and builds the accessor tree a build \
                  script would see: every dotted alias becomes a chain of group getters ending in a \
                  lookup for a library, version, bundle or plugin."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CatalogArgs {
    /// Path to the catalog file, e.g. gradle/libs.versions.toml
    #[arg(value_name = "CATALOG")]
    pub catalog: PathBuf,
    /// Accessor name of the catalog. Defaults to the file name without `.versions.toml`.
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,
    /// Generate accessors as seen from a build script's plugins block
    #[arg(long)]
    pub plugins_block: bool,
}

impl CatalogArgs {
    pub fn config(&self) -> CatscopeConfig {
        let mut config = CatscopeConfig::default();
        if let Some(name) = &self.name {
            config = config.with_catalog_name(name.clone());
        }
        if self.plugins_block {
            config = config.with_access(AccessContext::PluginsBlock);
        }
        config
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the accessor tree of a catalog
    #[command(
        long_about = "Prints every group getter and lookup of the catalog with its resolved value. \
                            Use --json for a structured snapshot."
    )]
    Tree {
        #[command(flatten)]
        catalog: CatalogArgs,
        /// Emit the tree as JSON
        #[arg(long)]
        json: bool,
    },
    /// Resolve one accessor expression
    #[command(
        long_about = "Resolves an expression such as libs.androidx.test.espresso.core, \
                            libs.versions.truth, libs.bundles.testing or libs.plugins.kotlin.android \
                            and prints its value."
    )]
    Get {
        #[command(flatten)]
        catalog: CatalogArgs,
        /// Accessor expression to resolve
        #[arg(value_name = "ACCESSOR")]
        accessor: String,
    },
    /// Parse and validate a catalog
    Check {
        #[command(flatten)]
        catalog: CatalogArgs,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = CatscopeConfig::default();
    let _guard = catscope_core::logging::init_logging("cli", &config.log_dir, false);

    match cli.command {
        Commands::Tree { catalog, json } => tree::run(&catalog, json),
        Commands::Get { catalog, accessor } => get::run(&catalog, &accessor),
        Commands::Check { catalog } => check::run(&catalog),
    }
}
