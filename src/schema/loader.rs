//! Schema document loading.
//!
//! Documents are parsed into a generic tree first and then walked by hand, so
//! that every error can name the exact field path (e.g. `tables[1].columns[0].type`).

use super::{
    Column, Relationship, RelationshipType, Schema, SchemaError, SchemaFormat, SchemaResult, Table,
};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

const ROOT_PATH: &str = "document";

/// Parse schema document content in the given format
pub fn load(source: &str, format: SchemaFormat) -> SchemaResult<Schema> {
    let document = parse_document(source, format)?;
    let schema = build_schema(&document)?;
    debug!(
        tables = schema.tables.len(),
        format = %format,
        "loaded schema document"
    );
    Ok(schema)
}

/// Parse a JSON schema document
pub fn load_json(source: &str) -> SchemaResult<Schema> {
    load(source, SchemaFormat::Json)
}

/// Read and parse a schema file, picking the format from its extension
pub fn load_file(path: &Path) -> SchemaResult<Schema> {
    let format = path
        .extension()
        .and_then(|e| e.to_str())
        .map(SchemaFormat::from_extension)
        .unwrap_or_default();

    let source = fs::read_to_string(path).map_err(|source| SchemaError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    load(&source, format)
}

fn parse_document(source: &str, format: SchemaFormat) -> SchemaResult<Value> {
    let parsed = match format {
        SchemaFormat::Json => serde_json::from_str(source).map_err(|e| e.to_string()),
        SchemaFormat::Yaml => serde_yaml_ng::from_str(source).map_err(|e| e.to_string()),
    };
    parsed.map_err(|message| SchemaError::ParseFailure { format, message })
}

fn build_schema(document: &Value) -> SchemaResult<Schema> {
    let root = as_object(document, ROOT_PATH)?;

    let mut tables = Vec::new();
    let mut seen = HashSet::new();

    for (i, value) in optional_array(root, "tables", "tables")?.iter().enumerate() {
        let path = format!("tables[{}]", i);
        let table = build_table(value, &path)?;
        if !seen.insert(table.name.clone()) {
            return Err(SchemaError::DuplicateName {
                path: format!("{}.name", path),
                name: table.name,
            });
        }
        tables.push(table);
    }

    Ok(Schema { tables })
}

fn build_table(value: &Value, path: &str) -> SchemaResult<Table> {
    let obj = as_object(value, path)?;
    let name = required_str(obj, "name", path)?;

    let mut columns = Vec::new();
    let mut seen = HashSet::new();
    let columns_path = field_path(path, "columns");
    for (i, value) in optional_array(obj, "columns", &columns_path)?
        .iter()
        .enumerate()
    {
        let col_path = format!("{}[{}]", columns_path, i);
        let column = build_column(value, &col_path)?;
        if !seen.insert(column.name.clone()) {
            return Err(SchemaError::DuplicateName {
                path: format!("{}.name", col_path),
                name: column.name,
            });
        }
        columns.push(column);
    }

    let rels_path = field_path(path, "relationships");
    let relationships = optional_array(obj, "relationships", &rels_path)?
        .iter()
        .enumerate()
        .map(|(i, value)| build_relationship(value, &format!("{}[{}]", rels_path, i)))
        .collect::<SchemaResult<Vec<_>>>()?;

    Ok(Table {
        name,
        columns,
        relationships,
    })
}

fn build_column(value: &Value, path: &str) -> SchemaResult<Column> {
    let obj = as_object(value, path)?;
    Ok(Column {
        name: required_str(obj, "name", path)?,
        col_type: required_str(obj, "type", path)?,
        primary_key: optional_bool(obj, "primary_key", path, false)?,
        nullable: optional_bool(obj, "nullable", path, true)?,
    })
}

fn build_relationship(value: &Value, path: &str) -> SchemaResult<Relationship> {
    let obj = as_object(value, path)?;

    let raw_type = required_str(obj, "type", path)?;
    let kind = raw_type
        .parse::<RelationshipType>()
        .map_err(|_| SchemaError::InvalidRelationshipType {
            path: field_path(path, "type"),
            value: raw_type.clone(),
        })?;

    Ok(Relationship {
        kind,
        target_table: required_str(obj, "target_table", path)?,
        foreign_key: required_str(obj, "foreign_key", path)?,
    })
}

fn field_path(parent: &str, key: &str) -> String {
    format!("{}.{}", parent, key)
}

/// Look up a key, treating an explicit `null` the same as an absent key
fn get<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

fn as_object<'a>(value: &'a Value, path: &str) -> SchemaResult<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| SchemaError::invalid(path, "an object"))
}

fn required_str(obj: &Map<String, Value>, key: &str, parent: &str) -> SchemaResult<String> {
    match get(obj, key) {
        None => Err(SchemaError::missing(field_path(parent, key))),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(SchemaError::invalid(field_path(parent, key), "a string")),
    }
}

fn optional_bool(
    obj: &Map<String, Value>,
    key: &str,
    parent: &str,
    default: bool,
) -> SchemaResult<bool> {
    match get(obj, key) {
        None => Ok(default),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(SchemaError::invalid(field_path(parent, key), "a boolean")),
    }
}

fn optional_array<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> SchemaResult<&'a [Value]> {
    match get(obj, key) {
        None => Ok(&[]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(_) => Err(SchemaError::invalid(path, "an array")),
    }
}
