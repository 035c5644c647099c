use crate::model::alias::Namespace;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid {namespace} alias '{alias}': {reason}")]
    InvalidAlias {
        namespace: Namespace,
        alias: String,
        reason: String,
    },
    #[error("Duplicate {namespace} alias '{alias}' (conflicts with '{existing}')")]
    DuplicateAlias {
        namespace: Namespace,
        alias: String,
        existing: String,
    },
    #[error("{namespace} alias '{alias}' references unknown version '{reference}'")]
    UnknownVersionRef {
        namespace: Namespace,
        alias: String,
        reference: String,
    },
    #[error("Bundle '{bundle}' references unknown library '{member}'")]
    UnknownBundleMember { bundle: String, member: String },
    #[error("Invalid notation for {namespace} alias '{alias}': {reason}")]
    InvalidNotation {
        namespace: Namespace,
        alias: String,
        reason: String,
    },
    #[error("Unsupported catalog: {0}")]
    UnsupportedFormat(String),
    #[error("Unknown {namespace} alias '{alias}'")]
    UnknownAlias { namespace: Namespace, alias: String },
}

pub type Result<T> = std::result::Result<T, CatalogError>;
