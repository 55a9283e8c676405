#![deny(unsafe_code)]

//! Failures while loading and verifying series definitions.

use std::path::PathBuf;

use sku_model::ModelError;

#[derive(Debug, thiserror::Error)]
pub enum StandardsError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid manifest: {message}")]
    InvalidManifest { message: String },

    #[error("duplicate series code in manifest: {code}")]
    DuplicateSeries { code: String },

    #[error("series {code} reuses catalog file stem '{catalog}'")]
    DuplicateCatalog { catalog: String, code: String },

    #[error("invalid sha256 for {path}: {message}")]
    InvalidSha256 { path: PathBuf, message: String },

    #[error("invalid manifest path {path}: {message}")]
    InvalidPath { path: PathBuf, message: String },

    #[error("manifest lists {path}, which does not exist")]
    MissingFile { path: PathBuf },

    #[error("{path} is not listed in the manifest")]
    UnexpectedFile { path: PathBuf },

    #[error("{path} has sha256 {actual}, manifest pins {expected}")]
    Sha256Mismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("invalid series definition {path}: {message}")]
    InvalidDefinition { path: PathBuf, message: String },

    #[error("invalid series {code}: {source}")]
    Model {
        code: String,
        #[source]
        source: ModelError,
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
