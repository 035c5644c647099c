//! Deprecation reporting for catalog access from a `plugins {}` block.

use catscope_core::diagnostics::{DiagnosticKind, PLUGINS_BLOCK_MESSAGE};
use catscope_core::model::Namespace;
use catscope_core::{AccessContext, AccessorTree, CatalogAccessorGenerator, CollectingReporter, parse_catalog};
use std::sync::Arc;

const CATALOG: &str = include_str!("fixtures/libs.versions.toml");

fn tree(context: AccessContext) -> AccessorTree {
    let catalog = parse_catalog("libs", CATALOG).unwrap();
    CatalogAccessorGenerator::new(context).generate(Arc::new(catalog))
}

#[test]
fn test_library_access_reports_each_step() {
    let tree = tree(AccessContext::PluginsBlock);
    let reporter = CollectingReporter::new();

    let provider = tree
        .accessor_with(Namespace::Library, &reporter)
        .group("androidx")
        .and_then(|a| a.group("test"))
        .and_then(|a| a.lookup("core"))
        .unwrap();

    // Reporting is advisory: the lookup still resolves.
    assert_eq!(
        provider.resolve_display().unwrap(),
        "androidx.test:core:1.6.1"
    );

    let paths: Vec<String> = reporter.take().into_iter().map(|d| d.path).collect();
    assert_eq!(
        paths,
        vec!["libs.androidx", "libs.androidx.test", "libs.androidx.test.core"]
    );
}

#[test]
fn test_bundle_access_is_deprecated() {
    let tree = tree(AccessContext::PluginsBlock);
    let reporter = CollectingReporter::new();

    let bundle = tree.resolve_path("libs.bundles.android.testing", Some(&reporter));
    assert!(bundle.is_some());

    let diagnostics = reporter.diagnostics();
    assert_eq!(diagnostics.len(), 3);
    assert_eq!(diagnostics[0].path, "libs.bundles");
    assert_eq!(diagnostics[2].path, "libs.bundles.android.testing");
    assert!(diagnostics.iter().all(|d| d.kind == DiagnosticKind::Deprecation));
    assert!(diagnostics.iter().all(|d| d.message == PLUGINS_BLOCK_MESSAGE));
}

#[test]
fn test_versions_and_plugins_are_not_reported() {
    let tree = tree(AccessContext::PluginsBlock);
    let reporter = CollectingReporter::new();

    assert!(tree.resolve_path("libs.versions.kotlin", Some(&reporter)).is_some());
    assert!(
        tree.resolve_path("libs.plugins.android.application", Some(&reporter))
            .is_some()
    );
    assert!(reporter.is_empty());
}

#[test]
fn test_project_context_is_silent() {
    let tree = tree(AccessContext::Project);
    let reporter = CollectingReporter::new();

    assert!(tree.resolve_path("libs.truth", Some(&reporter)).is_some());
    assert!(
        tree.resolve_path("libs.bundles.android.testing", Some(&reporter))
            .is_some()
    );
    assert!(reporter.is_empty());
}

#[test]
fn test_lookup_without_reporter_is_silent_and_equivalent() {
    let tree = tree(AccessContext::PluginsBlock);
    let reporter = CollectingReporter::new();

    let reported = tree.resolve_path("libs.truth", Some(&reporter)).unwrap();
    let plain = tree.resolve_path("libs.truth", None).unwrap();
    assert_eq!(
        reported.resolve_display().unwrap(),
        plain.resolve_display().unwrap()
    );
    assert_eq!(reporter.len(), 1);
}
