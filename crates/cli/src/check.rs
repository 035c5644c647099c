use crate::CatalogArgs;
use catscope_core::load_accessors;
use catscope_core::model::Namespace;
use tracing::info;

pub fn run(args: &CatalogArgs) -> Result<(), Box<dyn std::error::Error>> {
    let tree = load_accessors(&args.catalog, &args.config())?;
    info!("Catalog {} is valid", args.catalog.display());

    println!(
        "catalog '{}': OK ({} entries)",
        tree.name(),
        tree.catalog().len()
    );
    for namespace in Namespace::ALL {
        let root = tree.root(namespace);
        println!(
            "  {:<10} {:>4} aliases, {:>4} groups",
            namespace.table(),
            root.leaf_count(),
            root.group_count()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{catalog_args, fixture_args};

    #[test]
    fn test_accepts_valid_catalog() {
        let (_temp, args) = fixture_args(false);
        assert!(run(&args).is_ok());
    }

    #[test]
    fn test_rejects_invalid_catalogs() {
        let (_temp, args) = catalog_args("[bundles]\ntesting = [\"missing\"]\n", false);
        let err = run(&args).unwrap_err();
        assert!(err.to_string().contains("missing"));

        let (_temp, args) = catalog_args("[libraries]\nbroken = \"no-colon\"\n", false);
        assert!(run(&args).is_err());

        let (_temp, args) = catalog_args("[dependencies]\n", false);
        assert!(run(&args).is_err());
    }
}
