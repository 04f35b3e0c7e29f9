//! Errors raised while loading a schema document.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Document syntax accepted by the loader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaFormat {
    #[default]
    Json,
    Yaml,
}

impl SchemaFormat {
    /// Detect format from file extension, falling back to JSON
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "yaml" | "yml" => SchemaFormat::Yaml,
            _ => SchemaFormat::Json,
        }
    }
}

impl fmt::Display for SchemaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaFormat::Json => write!(f, "JSON"),
            SchemaFormat::Yaml => write!(f, "YAML"),
        }
    }
}

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("missing required field `{path}`")]
    MissingField { path: String },

    #[error("failed to parse {format} schema document: {message}")]
    ParseFailure {
        format: SchemaFormat,
        message: String,
    },

    #[error("invalid relationship type '{value}' at `{path}` (expected one_to_many or many_to_one)")]
    InvalidRelationshipType { path: String, value: String },

    #[error("field `{path}` must be {expected}")]
    InvalidField { path: String, expected: &'static str },

    #[error("duplicate name '{name}' at `{path}`")]
    DuplicateName { path: String, name: String },

    #[error("failed to read schema file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SchemaError {
    pub(crate) fn missing(path: impl Into<String>) -> Self {
        SchemaError::MissingField { path: path.into() }
    }

    pub(crate) fn invalid(path: impl Into<String>, expected: &'static str) -> Self {
        SchemaError::InvalidField {
            path: path.into(),
            expected,
        }
    }

    /// Offending field path, when the error points at one
    pub fn path(&self) -> Option<&str> {
        match self {
            SchemaError::MissingField { path }
            | SchemaError::InvalidRelationshipType { path, .. }
            | SchemaError::InvalidField { path, .. }
            | SchemaError::DuplicateName { path, .. } => Some(path),
            SchemaError::ParseFailure { .. } | SchemaError::Io { .. } => None,
        }
    }
}

pub type SchemaResult<T> = std::result::Result<T, SchemaError>;
