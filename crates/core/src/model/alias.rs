use crate::error::{CatalogError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shape every declared alias must have before normalization.
static ALIAS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]([a-zA-Z0-9_.\-])+$").expect("alias pattern is valid"));

/// Segments that would collide with members of the generated accessors.
const RESERVED_SEGMENTS: &[&str] = &["extensions", "class", "convention"];

/// First segments that are taken by the namespace accessors on the root.
const RESERVED_PREFIXES: &[&str] = &["bundles", "versions", "plugins"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    Library,
    Version,
    Bundle,
    Plugin,
}

impl Namespace {
    pub const ALL: [Namespace; 4] = [
        Namespace::Library,
        Namespace::Version,
        Namespace::Bundle,
        Namespace::Plugin,
    ];

    /// Name of the catalog table holding this namespace.
    pub fn table(&self) -> &'static str {
        match self {
            Namespace::Library => "libraries",
            Namespace::Version => "versions",
            Namespace::Bundle => "bundles",
            Namespace::Plugin => "plugins",
        }
    }

    /// Accessor segment under the catalog root, `None` for libraries which sit on the root itself.
    pub fn accessor_prefix(&self) -> Option<&'static str> {
        match self {
            Namespace::Library => None,
            other => Some(other.table()),
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Namespace::Library => "library",
            Namespace::Version => "version",
            Namespace::Bundle => "bundle",
            Namespace::Plugin => "plugin",
        };
        f.write_str(s)
    }
}

/// A normalized, dot separated catalog alias.
///
/// Declared aliases may use `-`, `_` or `.` between segments; they all map to
/// the same alias, so `androidx-test-core` and `androidx.test.core` are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Alias(String);

impl Alias {
    /// Validates a declared alias and normalizes its separators.
    pub fn parse(namespace: Namespace, raw: &str) -> Result<Self> {
        let invalid = |reason: &str| CatalogError::InvalidAlias {
            namespace,
            alias: raw.to_string(),
            reason: reason.to_string(),
        };

        if !ALIAS_PATTERN.is_match(raw) {
            return Err(invalid(
                "must start with a lowercase letter and contain only letters, digits, '.', '-' or '_'",
            ));
        }

        let normalized = Self::normalize(raw);
        if normalized.split('.').any(str::is_empty) {
            return Err(invalid("contains an empty segment"));
        }

        if let Some(reserved) = normalized
            .split('.')
            .find(|segment| RESERVED_SEGMENTS.contains(segment))
        {
            return Err(invalid(&format!("'{reserved}' is a reserved name")));
        }

        if matches!(namespace, Namespace::Library | Namespace::Bundle) {
            let first = normalized.split('.').next().unwrap_or_default();
            if RESERVED_PREFIXES.contains(&first) {
                return Err(invalid(&format!("cannot start with '{first}'")));
            }
        }

        Ok(Self(normalized))
    }

    /// Maps every separator to `.` without validating.
    pub fn normalize(raw: &str) -> String {
        raw.replace(['-', '_'], ".")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Grouping path and leaf segment.
    pub fn split_leaf(&self) -> (Vec<&str>, &str) {
        match self.0.rsplit_once('.') {
            Some((path, leaf)) => (path.split('.').collect(), leaf),
            None => (Vec::new(), self.0.as_str()),
        }
    }
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Alias {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separators_are_normalized() {
        let dashed = Alias::parse(Namespace::Library, "androidx-test-espresso-core").unwrap();
        let mixed = Alias::parse(Namespace::Library, "androidx_test.espresso-core").unwrap();
        assert_eq!(dashed.as_str(), "androidx.test.espresso.core");
        assert_eq!(dashed, mixed);
    }

    #[test]
    fn test_split_leaf() {
        let alias = Alias::parse(Namespace::Library, "kotlinx.coroutines.test").unwrap();
        let (path, leaf) = alias.split_leaf();
        assert_eq!(path, vec!["kotlinx", "coroutines"]);
        assert_eq!(leaf, "test");

        let top = Alias::parse(Namespace::Library, "truth").unwrap();
        let (path, leaf) = top.split_leaf();
        assert!(path.is_empty());
        assert_eq!(leaf, "truth");
    }

    #[test]
    fn test_rejects_malformed_aliases() {
        for raw in ["Truth", "1abc", "a", "a..b", "a.b-", "has space"] {
            assert!(
                matches!(
                    Alias::parse(Namespace::Version, raw),
                    Err(CatalogError::InvalidAlias { .. })
                ),
                "expected '{raw}' to be rejected"
            );
        }
    }

    #[test]
    fn test_reserved_names() {
        assert!(Alias::parse(Namespace::Library, "foo.class").is_err());
        assert!(Alias::parse(Namespace::Library, "extensions-core").is_err());
        assert!(Alias::parse(Namespace::Library, "versions.truth").is_err());
        assert!(Alias::parse(Namespace::Bundle, "plugins-all").is_err());
        // Only libraries and bundles share the root with the namespace accessors.
        assert!(Alias::parse(Namespace::Version, "plugins.kotlin").is_ok());
    }
}
