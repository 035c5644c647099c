use super::alias::Alias;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A version constraint as declared in the catalog.
///
/// Plain strings land in `require`. Anything else is a rich version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionConstraint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strictly: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefer: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reject: Vec<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub reject_all: bool,
}

impl VersionConstraint {
    pub fn required(version: impl Into<String>) -> Self {
        Self {
            require: Some(version.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.require.is_none()
            && self.strictly.is_none()
            && self.prefer.is_none()
            && self.reject.is_empty()
            && !self.reject_all
    }

    /// The constraint as one version string, if it is a plain required version.
    pub fn single(&self) -> Option<&str> {
        match self {
            Self {
                require: Some(require),
                strictly: None,
                prefer: None,
                reject,
                reject_all: false,
            } if reject.is_empty() => Some(require.as_str()),
            _ => None,
        }
    }

    /// Single-string form; rich versions collapse to the empty string.
    pub fn display_string(&self) -> String {
        self.single().unwrap_or_default().to_string()
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(single) = self.single() {
            return f.write_str(single);
        }
        let mut parts = Vec::new();
        if let Some(v) = &self.strictly {
            parts.push(format!("strictly {v}"));
        }
        if let Some(v) = &self.require {
            parts.push(format!("require {v}"));
        }
        if let Some(v) = &self.prefer {
            parts.push(format!("prefer {v}"));
        }
        if self.reject_all {
            parts.push("reject all".to_string());
        } else if !self.reject.is_empty() {
            parts.push(format!("reject {}", self.reject.join(" | ")));
        }
        write!(f, "{{{}}}", parts.join("; "))
    }
}

/// How a library or plugin declares its version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum VersionRef {
    /// Points at an alias in `[versions]`.
    Reference(Alias),
    Inline(VersionConstraint),
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryEntry {
    pub group: String,
    pub name: String,
    pub version: VersionRef,
}

impl LibraryEntry {
    pub fn module(&self) -> String {
        format!("{}:{}", self.group, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginEntry {
    pub id: String,
    pub version: VersionRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleEntry {
    pub libraries: Vec<Alias>,
}
