use crate::CatalogArgs;
use catscope_core::{CollectingReporter, DiagnosticReporter, TracingReporter, load_accessors};

pub fn run(args: &CatalogArgs, accessor: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", resolve(args, accessor)?);
    Ok(())
}

fn resolve(args: &CatalogArgs, accessor: &str) -> Result<String, Box<dyn std::error::Error>> {
    let tree = load_accessors(&args.catalog, &args.config())?;
    let reporter = CollectingReporter::new();

    let provider = tree
        .resolve_path(accessor, Some(&reporter))
        .ok_or_else(|| format!("no accessor '{accessor}' in catalog '{}'", tree.name()))?;

    for diagnostic in reporter.take() {
        eprintln!("warning: {diagnostic}");
        TracingReporter.report(diagnostic);
    }

    Ok(provider.resolve_display()?)
}
