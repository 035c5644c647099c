use crate::CatalogArgs;
use catscope_core::load_accessors;
use catscope_core::render::render_outline;
use tracing::info;

pub fn run(args: &CatalogArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    print!("{}", render(args, json)?);
    Ok(())
}

fn render(args: &CatalogArgs, json: bool) -> Result<String, Box<dyn std::error::Error>> {
    let tree = load_accessors(&args.catalog, &args.config())?;
    info!(
        "Rendering accessors for '{}' from {}",
        tree.name(),
        args.catalog.display()
    );

    if json {
        let snapshot = tree.snapshot()?;
        Ok(format!("{}\n", serde_json::to_string_pretty(&snapshot)?))
    } else {
        Ok(render_outline(&tree)?)
    }
}
