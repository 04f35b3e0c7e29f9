//! Schema document model.
//!
//! This module provides:
//! - Value types for tables, columns and relationships
//! - A loader for JSON and YAML schema documents with path-qualified errors
//! - The column annotation rule shared by every diagram format

mod error;
mod loader;

pub use error::*;
pub use loader::*;

use schemars::JsonSchema;
use std::fmt;
use std::str::FromStr;

fn default_true() -> bool {
    true
}

/// Root of a schema document. Table order is diagram emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, JsonSchema)]
pub struct Schema {
    #[serde(default)]
    #[schemars(with = "Option<Vec<Table>>")]
    pub tables: Vec<Table>,
}

impl Schema {
    /// Find a table by name
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Iterate every relationship along with the table that owns it
    pub fn relationships(&self) -> impl Iterator<Item = (&Table, &Relationship)> {
        self.tables
            .iter()
            .flat_map(|t| t.relationships.iter().map(move |r| (t, r)))
    }
}

/// A table definition
#[derive(Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct Table {
    /// Table name, unique within the schema
    pub name: String,
    #[serde(default)]
    #[schemars(with = "Option<Vec<Column>>")]
    pub columns: Vec<Column>,
    /// Outgoing edges from this table
    #[serde(default)]
    #[schemars(with = "Option<Vec<Relationship>>")]
    pub relationships: Vec<Relationship>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            relationships: Vec::new(),
        }
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn with_relationship(mut self, relationship: Relationship) -> Self {
        self.relationships.push(relationship);
        self
    }

    /// Find a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// A column definition
#[derive(Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct Column {
    pub name: String,
    /// Free-form type label, rendered verbatim
    #[serde(rename = "type")]
    pub col_type: String,
    #[serde(default)]
    #[schemars(with = "Option<bool>")]
    pub primary_key: bool,
    #[serde(default = "default_true")]
    #[schemars(with = "Option<bool>")]
    pub nullable: bool,
}

impl Column {
    /// Nullable, non-key column
    pub fn new(name: impl Into<String>, col_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            col_type: col_type.into(),
            primary_key: false,
            nullable: true,
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Annotation shown next to the column. Primary key wins over nullability.
    pub fn marker(&self) -> ColumnMarker {
        if self.primary_key {
            ColumnMarker::PrimaryKey
        } else if !self.nullable {
            ColumnMarker::NotNull
        } else {
            ColumnMarker::None
        }
    }
}

/// The three mutually exclusive column annotations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnMarker {
    PrimaryKey,
    NotNull,
    None,
}

impl ColumnMarker {
    /// Mermaid attribute suffix, if any
    pub fn as_mermaid(self) -> Option<&'static str> {
        match self {
            ColumnMarker::PrimaryKey => Some("PK"),
            ColumnMarker::NotNull => Some("\"NOT NULL\""),
            ColumnMarker::None => None,
        }
    }
}

/// An outgoing edge from the owning table to `target_table`
#[derive(Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct Relationship {
    #[serde(rename = "type")]
    pub kind: RelationshipType,
    /// Rendered as given, not checked against the schema's tables
    pub target_table: String,
    /// Edge label
    pub foreign_key: String,
}

impl Relationship {
    pub fn new(
        kind: RelationshipType,
        target_table: impl Into<String>,
        foreign_key: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            target_table: target_table.into(),
            foreign_key: foreign_key.into(),
        }
    }

    pub fn one_to_many(target_table: impl Into<String>, foreign_key: impl Into<String>) -> Self {
        Self::new(RelationshipType::OneToMany, target_table, foreign_key)
    }

    pub fn many_to_one(target_table: impl Into<String>, foreign_key: impl Into<String>) -> Self {
        Self::new(RelationshipType::ManyToOne, target_table, foreign_key)
    }
}

/// Relationship cardinality, seen from the owning table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    /// Owning table is the "one" side
    OneToMany,
    /// Owning table is the "many" side
    ManyToOne,
}

impl RelationshipType {
    pub fn as_str(self) -> &'static str {
        match self {
            RelationshipType::OneToMany => "one_to_many",
            RelationshipType::ManyToOne => "many_to_one",
        }
    }

    /// Mermaid ERD notation, owning table on the left
    pub fn as_mermaid(self) -> &'static str {
        match self {
            RelationshipType::OneToMany => "||--o{",
            RelationshipType::ManyToOne => "}o--||",
        }
    }

    /// Human readable form used in dashboard prose
    pub fn describe(self) -> &'static str {
        match self {
            RelationshipType::OneToMany => "one to many",
            RelationshipType::ManyToOne => "many to one",
        }
    }
}

impl FromStr for RelationshipType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "one_to_many" => Ok(RelationshipType::OneToMany),
            "many_to_one" => Ok(RelationshipType::ManyToOne),
            _ => Err(format!(
                "Unknown relationship type: {}. Valid options: one_to_many, many_to_one",
                s
            )),
        }
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
