//! Reads `libs.versions.toml` style catalogs into a [`VersionCatalog`].
//!
//! Every structural check happens here so that accessor generation can treat
//! the catalog as well-formed.

use crate::error::{CatalogError, Result};
use crate::model::{
    Alias, BundleEntry, DEFAULT_CATALOG_NAME, LibraryEntry, Namespace, PluginEntry,
    VersionCatalog, VersionConstraint, VersionRef,
};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::path::Path;
use toml::{Table, Value};
use tracing::debug;

const SUPPORTED_FORMAT_VERSION: &str = "1.1";
const CATALOG_SUFFIX: &str = ".versions.toml";

/// Reads and parses a catalog file. The catalog name comes from the file name.
pub fn load_catalog(path: &Path) -> Result<VersionCatalog> {
    let source = std::fs::read_to_string(path)?;
    let name = catalog_name_from_path(path);
    debug!("Loading catalog '{}' from {}", name, path.display());
    parse_catalog(&name, &source)
}

/// `gradle/libs.versions.toml` -> `libs`. Falls back to the default name.
pub fn catalog_name_from_path(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.strip_suffix(CATALOG_SUFFIX))
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_CATALOG_NAME)
        .to_string()
}

pub fn parse_catalog(name: &str, source: &str) -> Result<VersionCatalog> {
    let document: Table = toml::from_str(source)?;

    for (key, value) in &document {
        match key.as_str() {
            "metadata" => check_metadata(value)?,
            "versions" | "libraries" | "bundles" | "plugins" => {
                if !value.is_table() {
                    return Err(CatalogError::UnsupportedFormat(format!(
                        "[{key}] must be a table"
                    )));
                }
            }
            other => {
                return Err(CatalogError::UnsupportedFormat(format!(
                    "unknown top-level entry '{other}'"
                )));
            }
        }
    }

    let section = |ns: Namespace| document.get(ns.table()).and_then(Value::as_table);

    let mut catalog = VersionCatalog::new(name);

    if let Some(table) = section(Namespace::Version) {
        catalog.versions = collect(Namespace::Version, table, parse_version_entry)?;
    }
    if let Some(table) = section(Namespace::Library) {
        catalog.libraries = collect(Namespace::Library, table, parse_library)?;
    }
    if let Some(table) = section(Namespace::Plugin) {
        catalog.plugins = collect(Namespace::Plugin, table, parse_plugin)?;
    }
    if let Some(table) = section(Namespace::Bundle) {
        catalog.bundles = collect(Namespace::Bundle, table, parse_bundle)?;
    }

    check_references(&catalog)?;

    debug!(
        "Parsed catalog '{}': {} versions, {} libraries, {} bundles, {} plugins",
        catalog.name,
        catalog.versions.len(),
        catalog.libraries.len(),
        catalog.bundles.len(),
        catalog.plugins.len()
    );

    Ok(catalog)
}

fn check_metadata(value: &Value) -> Result<()> {
    let table = value
        .as_table()
        .ok_or_else(|| CatalogError::UnsupportedFormat("[metadata] must be a table".into()))?;

    match table.get("format").and_then(|f| f.get("version")) {
        None => Ok(()),
        Some(Value::String(v)) if v == SUPPORTED_FORMAT_VERSION => Ok(()),
        Some(other) => Err(CatalogError::UnsupportedFormat(format!(
            "format version {other} (expected \"{SUPPORTED_FORMAT_VERSION}\")"
        ))),
    }
}

/// Parses every entry of one table, rejecting aliases that collide after normalization.
fn collect<T>(
    namespace: Namespace,
    table: &Table,
    parse: impl Fn(&str, &Value) -> Result<T>,
) -> Result<IndexMap<Alias, T>> {
    let mut entries = IndexMap::with_capacity(table.len());
    let mut declared: HashMap<Alias, &str> = HashMap::new();

    for (raw, value) in table {
        let alias = Alias::parse(namespace, raw)?;
        if let Some(existing) = declared.get(&alias) {
            return Err(CatalogError::DuplicateAlias {
                namespace,
                alias: raw.clone(),
                existing: existing.to_string(),
            });
        }
        let entry = parse(raw, value)?;
        declared.insert(alias.clone(), raw);
        entries.insert(alias, entry);
    }

    Ok(entries)
}

fn notation_error(namespace: Namespace, alias: &str, reason: impl Into<String>) -> CatalogError {
    CatalogError::InvalidNotation {
        namespace,
        alias: alias.to_string(),
        reason: reason.into(),
    }
}

fn parse_version_entry(alias: &str, value: &Value) -> Result<VersionConstraint> {
    match value {
        Value::String(s) => Ok(VersionConstraint::required(s.as_str())),
        Value::Table(table) => parse_rich_version(Namespace::Version, alias, table),
        other => Err(notation_error(
            Namespace::Version,
            alias,
            format!("expected a string or a table, found {}", other.type_str()),
        )),
    }
}

fn parse_rich_version(namespace: Namespace, alias: &str, table: &Table) -> Result<VersionConstraint> {
    let mut constraint = VersionConstraint::default();

    for (key, value) in table {
        match key.as_str() {
            "require" | "strictly" | "prefer" => {
                let version = value.as_str().ok_or_else(|| {
                    notation_error(namespace, alias, format!("'{key}' must be a string"))
                })?;
                let slot = match key.as_str() {
                    "require" => &mut constraint.require,
                    "strictly" => &mut constraint.strictly,
                    _ => &mut constraint.prefer,
                };
                *slot = Some(version.to_string());
            }
            "reject" => {
                let items = value.as_array().ok_or_else(|| {
                    notation_error(namespace, alias, "'reject' must be an array of strings")
                })?;
                for item in items {
                    let version = item.as_str().ok_or_else(|| {
                        notation_error(namespace, alias, "'reject' must be an array of strings")
                    })?;
                    constraint.reject.push(version.to_string());
                }
            }
            "rejectAll" => {
                constraint.reject_all = value.as_bool().ok_or_else(|| {
                    notation_error(namespace, alias, "'rejectAll' must be a boolean")
                })?;
            }
            other => {
                return Err(notation_error(
                    namespace,
                    alias,
                    format!("unknown version key '{other}'"),
                ));
            }
        }
    }

    if constraint.is_empty() {
        return Err(notation_error(namespace, alias, "empty version declaration"));
    }
    if constraint.reject_all && !constraint.reject.is_empty() {
        return Err(notation_error(
            namespace,
            alias,
            "'rejectAll' cannot be combined with 'reject'",
        ));
    }

    Ok(constraint)
}

/// `version = "1.0"`, `version.ref = "alias"` or a rich version table.
fn parse_version_ref(namespace: Namespace, alias: &str, value: Option<&Value>) -> Result<VersionRef> {
    match value {
        None => Ok(VersionRef::None),
        Some(Value::String(s)) => Ok(VersionRef::Inline(VersionConstraint::required(s.as_str()))),
        Some(Value::Table(table)) if table.contains_key("ref") => {
            if table.len() > 1 {
                return Err(notation_error(
                    namespace,
                    alias,
                    "'version.ref' cannot be combined with other version keys",
                ));
            }
            let reference = table
                .get("ref")
                .and_then(Value::as_str)
                .ok_or_else(|| notation_error(namespace, alias, "'version.ref' must be a string"))?;
            Ok(VersionRef::Reference(Alias::parse(Namespace::Version, reference)?))
        }
        Some(Value::Table(table)) => Ok(VersionRef::Inline(parse_rich_version(
            namespace, alias, table,
        )?)),
        Some(other) => Err(notation_error(
            namespace,
            alias,
            format!("'version' cannot be a {}", other.type_str()),
        )),
    }
}

fn split_module<'a>(alias: &str, module: &'a str) -> Result<(&'a str, &'a str)> {
    match module.split_once(':') {
        Some((group, name)) if !group.is_empty() && !name.is_empty() && !name.contains(':') => {
            Ok((group, name))
        }
        _ => Err(notation_error(
            Namespace::Library,
            alias,
            format!("'{module}' is not a 'group:name' module"),
        )),
    }
}

fn string_field<'a>(table: &'a Table, alias: &str, key: &str) -> Result<Option<&'a str>> {
    match table.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(notation_error(
            Namespace::Library,
            alias,
            format!("'{key}' must be a string"),
        )),
    }
}

fn parse_library(alias: &str, value: &Value) -> Result<LibraryEntry> {
    match value {
        Value::String(notation) => {
            let parts: Vec<&str> = notation.split(':').collect();
            if parts.iter().any(|p| p.is_empty()) {
                return Err(notation_error(
                    Namespace::Library,
                    alias,
                    format!("'{notation}' has an empty coordinate"),
                ));
            }
            match parts.as_slice() {
                [group, name] => Ok(LibraryEntry {
                    group: group.to_string(),
                    name: name.to_string(),
                    version: VersionRef::None,
                }),
                [group, name, version] => Ok(LibraryEntry {
                    group: group.to_string(),
                    name: name.to_string(),
                    version: VersionRef::Inline(VersionConstraint::required(*version)),
                }),
                _ => Err(notation_error(
                    Namespace::Library,
                    alias,
                    format!("'{notation}' is not 'group:name' or 'group:name:version'"),
                )),
            }
        }
        Value::Table(table) => {
            if let Some(key) = table
                .keys()
                .find(|k| !matches!(k.as_str(), "module" | "group" | "name" | "version"))
            {
                return Err(notation_error(
                    Namespace::Library,
                    alias,
                    format!("unknown key '{key}'"),
                ));
            }

            let (group, name) = match (
                string_field(table, alias, "module")?,
                string_field(table, alias, "group")?,
                string_field(table, alias, "name")?,
            ) {
                (Some(module), None, None) => split_module(alias, module)?,
                (None, Some(group), Some(name)) if !group.is_empty() && !name.is_empty() => {
                    (group, name)
                }
                (Some(_), _, _) => {
                    return Err(notation_error(
                        Namespace::Library,
                        alias,
                        "'module' cannot be combined with 'group' or 'name'",
                    ));
                }
                _ => {
                    return Err(notation_error(
                        Namespace::Library,
                        alias,
                        "expected 'module' or both 'group' and 'name'",
                    ));
                }
            };

            Ok(LibraryEntry {
                group: group.to_string(),
                name: name.to_string(),
                version: parse_version_ref(Namespace::Library, alias, table.get("version"))?,
            })
        }
        other => Err(notation_error(
            Namespace::Library,
            alias,
            format!("expected a string or a table, found {}", other.type_str()),
        )),
    }
}

fn parse_plugin(alias: &str, value: &Value) -> Result<PluginEntry> {
    match value {
        Value::String(notation) => {
            let (id, version) = match notation.split_once(':') {
                Some((id, version)) => (
                    id,
                    VersionRef::Inline(VersionConstraint::required(version)),
                ),
                None => (notation.as_str(), VersionRef::None),
            };
            if id.is_empty() || notation.ends_with(':') {
                return Err(notation_error(
                    Namespace::Plugin,
                    alias,
                    format!("'{notation}' is not 'id' or 'id:version'"),
                ));
            }
            Ok(PluginEntry {
                id: id.to_string(),
                version,
            })
        }
        Value::Table(table) => {
            if let Some(key) = table.keys().find(|k| !matches!(k.as_str(), "id" | "version")) {
                return Err(notation_error(
                    Namespace::Plugin,
                    alias,
                    format!("unknown key '{key}'"),
                ));
            }
            let id = table
                .get("id")
                .and_then(Value::as_str)
                .filter(|id| !id.is_empty())
                .ok_or_else(|| notation_error(Namespace::Plugin, alias, "missing plugin 'id'"))?;
            Ok(PluginEntry {
                id: id.to_string(),
                version: parse_version_ref(Namespace::Plugin, alias, table.get("version"))?,
            })
        }
        other => Err(notation_error(
            Namespace::Plugin,
            alias,
            format!("expected a string or a table, found {}", other.type_str()),
        )),
    }
}

fn parse_bundle(alias: &str, value: &Value) -> Result<BundleEntry> {
    let items = value.as_array().ok_or_else(|| {
        notation_error(Namespace::Bundle, alias, "expected an array of library aliases")
    })?;

    let libraries = items
        .iter()
        .map(|item| {
            let member = item.as_str().ok_or_else(|| {
                notation_error(Namespace::Bundle, alias, "bundle members must be strings")
            })?;
            Alias::parse(Namespace::Library, member)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(BundleEntry { libraries })
}

/// Version references and bundle members must point at declared entries.
fn check_references(catalog: &VersionCatalog) -> Result<()> {
    let check_version = |namespace: Namespace, alias: &Alias, version: &VersionRef| {
        if let VersionRef::Reference(reference) = version {
            if !catalog.versions.contains_key(reference) {
                return Err(CatalogError::UnknownVersionRef {
                    namespace,
                    alias: alias.to_string(),
                    reference: reference.to_string(),
                });
            }
        }
        Ok(())
    };

    for (alias, library) in &catalog.libraries {
        check_version(Namespace::Library, alias, &library.version)?;
    }
    for (alias, plugin) in &catalog.plugins {
        check_version(Namespace::Plugin, alias, &plugin.version)?;
    }
    for (alias, bundle) in &catalog.bundles {
        if let Some(missing) = bundle
            .libraries
            .iter()
            .find(|member| !catalog.libraries.contains_key(*member))
        {
            return Err(CatalogError::UnknownBundleMember {
                bundle: alias.to_string(),
                member: missing.to_string(),
            });
        }
    }

    Ok(())
}
