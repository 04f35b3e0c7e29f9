//! JSON Schema for the input schema document.
//!
//! Generated with schemars from the model types, so the published schema can't
//! drift from what the loader accepts. Exported via the `schema` subcommand.

use schemars::schema_for;

/// JSON Schema describing a schema document
pub fn document_schema() -> schemars::Schema {
    schema_for!(crate::schema::Schema)
}

/// Pretty-printed JSON Schema for a schema document
pub fn document_schema_json() -> String {
    serde_json::to_string_pretty(&document_schema()).unwrap_or_else(|_| "{}".to_string())
}
