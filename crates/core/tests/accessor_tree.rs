//! Behaviour of the generated accessor tree against a realistic catalog.

use catscope_core::model::{Alias, Namespace};
use catscope_core::{AccessorTree, Provider, generate, parse_catalog};
use std::sync::Arc;

const CATALOG: &str = include_str!("fixtures/libs.versions.toml");

fn tree() -> AccessorTree {
    let catalog = parse_catalog("libs", CATALOG).unwrap();
    generate(Arc::new(catalog))
}

#[test]
fn test_every_alias_reaches_exactly_one_leaf() {
    let tree = tree();
    let catalog = tree.catalog().clone();

    for namespace in Namespace::ALL {
        let aliases = catalog.aliases(namespace);
        assert_eq!(
            tree.root(namespace).leaf_count(),
            aliases.len(),
            "leaf count for {namespace}"
        );
        for alias in aliases {
            let leaf = tree
                .traverse(namespace, alias)
                .unwrap_or_else(|| panic!("no leaf for {namespace} {alias}"));
            assert_eq!(leaf.alias(), alias);
            let provider = tree.provider(namespace, leaf);
            assert_eq!(provider.alias(), alias);
            assert_eq!(provider.namespace(), namespace);
        }
    }
}

#[test]
fn test_shared_prefix_resolves_through_same_node() {
    let tree = tree();
    let root = tree.root(Namespace::Library);

    let core = Alias::parse(Namespace::Library, "androidx.test.core").unwrap();
    let runner = Alias::parse(Namespace::Library, "androidx.test.runner").unwrap();

    let via_core = root.descend(core.split_leaf().0).unwrap();
    let via_runner = root.descend(runner.split_leaf().0).unwrap();
    assert!(std::ptr::eq(via_core, via_runner));
    assert_eq!(via_core.path(), "androidx.test");
}

#[test]
fn test_top_level_library() {
    let tree = tree();
    let provider = tree.accessor(Namespace::Library).lookup("truth").unwrap();
    let truth = provider.as_library().unwrap().get().unwrap();

    assert_eq!(truth.group, "com.google.truth");
    assert_eq!(truth.name, "truth");
    assert_eq!(truth.version, "1.4.2");
    assert_eq!(truth.to_string(), "com.google.truth:truth:1.4.2");
}

#[test]
fn test_nested_library_getter_chain() {
    let tree = tree();
    let provider = tree
        .accessor(Namespace::Library)
        .group("androidx")
        .and_then(|a| a.group("test"))
        .and_then(|a| a.group("espresso"))
        .and_then(|a| a.lookup("core"))
        .unwrap();

    let Provider::Library(library) = provider else {
        panic!("expected a library provider");
    };
    assert_eq!(library.alias().as_str(), "androidx.test.espresso.core");
    let resolved = library.get().unwrap();
    assert_eq!(resolved.group, "androidx.test.espresso");
    assert_eq!(resolved.name, "espresso-core");
    assert_eq!(resolved.version, "3.6.1");
}

#[test]
fn test_bundle_keeps_declared_order() {
    let tree = tree();
    let bundle = tree
        .resolve_path("libs.bundles.android.testing", None)
        .unwrap();
    let bundle = bundle.as_bundle().unwrap();
    let members: Vec<&str> = bundle.members().unwrap().iter().map(Alias::as_str).collect();
    assert_eq!(
        members,
        vec![
            "androidx.test.runner",
            "androidx.test.core",
            "androidx.test.espresso.core",
            "truth"
        ]
    );

    let resolved = bundle.get().unwrap();
    let coordinates: Vec<String> = resolved.iter().map(ToString::to_string).collect();

    assert_eq!(
        coordinates,
        vec![
            "androidx.test:runner:1.6.1",
            "androidx.test:core:1.6.1",
            "androidx.test.espresso:espresso-core:3.6.1",
            "com.google.truth:truth:1.4.2",
        ]
    );
}

#[test]
fn test_versions_and_plugins() {
    let tree = tree();

    let version = tree.lookup(Namespace::Version, "androidx-test-ext-junit").unwrap();
    assert_eq!(version.as_version().unwrap().get().unwrap(), "1.2.1");

    let plugin = tree
        .resolve_path("libs.plugins.kotlin.android", None)
        .unwrap();
    let plugin = plugin.as_plugin().unwrap().get().unwrap();
    assert_eq!(plugin.id, "org.jetbrains.kotlin.android");
    assert_eq!(plugin.version, "1.9.22");
}

#[test]
fn test_rich_version_resolves_to_empty_string() {
    let tree = tree();

    let version = tree.lookup(Namespace::Version, "guava").unwrap();
    let version = version.as_version().unwrap();
    assert_eq!(version.get().unwrap(), "");
    assert_eq!(
        version.constraint().unwrap().prefer.as_deref(),
        Some("32.1.3-jre")
    );

    let library = tree.lookup(Namespace::Library, "guava").unwrap();
    assert_eq!(
        library.resolve_display().unwrap(),
        "com.google.guava:guava"
    );
}

#[test]
fn test_group_and_leaf_share_a_name() {
    let tree = tree();
    let retrofit = tree.accessor(Namespace::Library).group("retrofit").unwrap();

    let own = retrofit.as_provider().unwrap();
    assert_eq!(
        own.resolve_display().unwrap(),
        "com.squareup.retrofit2:retrofit:2.9.0"
    );

    let gson = tree.resolve_path("libs.retrofit.converter.gson", None).unwrap();
    assert_eq!(
        gson.resolve_display().unwrap(),
        "com.squareup.retrofit2:converter-gson:2.9.0"
    );
    assert_eq!(
        tree.resolve_path("retrofit", None)
            .unwrap()
            .resolve_display()
            .unwrap(),
        "com.squareup.retrofit2:retrofit:2.9.0"
    );
}

#[test]
fn test_unknown_paths_resolve_to_none() {
    let tree = tree();
    assert!(tree.resolve_path("libs.androidx.test", None).is_none());
    assert!(tree.resolve_path("libs.nope", None).is_none());
    assert!(tree.resolve_path("libs.versions", None).is_none());
    assert!(tree.lookup(Namespace::Plugin, "truth").is_none());
    assert!(tree.accessor(Namespace::Version).group("androidx").unwrap().lookup("espresso").is_none());
}

#[test]
fn test_generation_is_idempotent() {
    let first = tree();
    let second = tree();

    for namespace in Namespace::ALL {
        assert_eq!(first.root(namespace), second.root(namespace));
    }
    assert_eq!(first.snapshot().unwrap(), second.snapshot().unwrap());
}

#[test]
fn test_tree_is_shareable_across_threads() {
    let tree = Arc::new(tree());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let tree = tree.clone();
            std::thread::spawn(move || {
                tree.lookup(Namespace::Library, "truth")
                    .unwrap()
                    .resolve_display()
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), "com.google.truth:truth:1.4.2");
    }
}

#[test]
fn test_declaration_order_does_not_change_tree() {
    let forward = r#"
[versions]
aa-bb = "1.0"
cc = "2.0"

[libraries]
aa-bb-cc = { module = "org.aa:cc", version.ref = "aa-bb" }
aa-dd = "org.aa:dd:1.1"
ee = { module = "org.ee:ee", version.ref = "cc" }

[bundles]
all = ["ee", "aa-dd"]
"#;
    let backward = r#"
[bundles]
all = ["ee", "aa-dd"]

[libraries]
ee = { module = "org.ee:ee", version.ref = "cc" }
aa-dd = "org.aa:dd:1.1"
aa-bb-cc = { module = "org.aa:cc", version.ref = "aa-bb" }

[versions]
cc = "2.0"
aa-bb = "1.0"
"#;
    let first = generate(Arc::new(parse_catalog("libs", forward).unwrap()));
    let second = generate(Arc::new(parse_catalog("libs", backward).unwrap()));

    for namespace in Namespace::ALL {
        assert_eq!(first.root(namespace), second.root(namespace), "{namespace}");
    }
    assert_eq!(first.snapshot().unwrap(), second.snapshot().unwrap());
}
