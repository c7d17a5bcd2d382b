use std::path::PathBuf;

use regstat_model::ModelError;

#[derive(Debug, thiserror::Error)]
pub enum StandardsError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid column schema {path}: {source}")]
    InvalidSchema {
        path: PathBuf,
        #[source]
        source: ModelError,
    },

    #[error("unexpected document tag in {path}: expected {expected:?}, found {found:?}")]
    DocumentTag {
        path: PathBuf,
        expected: String,
        found: String,
    },

    #[error("unsupported document version {found} in {path} (supported: {supported})")]
    DocumentVersion {
        path: PathBuf,
        supported: u32,
        found: u32,
    },

    #[error("region {key:?} has a blank {field}")]
    BlankField { key: String, field: &'static str },

    #[error("name {name:?} is claimed by both {first:?} and {second:?}")]
    DuplicateName {
        name: String,
        first: String,
        second: String,
    },
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// A region name that matched neither the alias table nor the registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no region identity for {name:?}")]
pub struct UnresolvedRegion {
    pub name: String,
}
