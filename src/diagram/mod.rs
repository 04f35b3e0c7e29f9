//! ERD (Entity-Relationship Diagram) compilation.
//!
//! This module provides:
//! - Mermaid erDiagram generation from a loaded schema
//! - An optional HTML data section rendered from a live snapshot
//! - Summary statistics for CLI reporting

pub mod data;
pub mod mermaid;
pub mod snapshot;

pub use data::to_data_html;
pub use mermaid::to_mermaid;
pub use snapshot::{DataSnapshot, TableData};

use crate::schema::Schema;
use std::fmt;

/// Output of a compile: the diagram body plus an optional data section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramText {
    /// Mermaid erDiagram source
    pub mermaid: String,
    /// Rendered snapshot section, empty when no snapshot was supplied
    pub data: String,
}

impl DiagramText {
    pub fn has_data(&self) -> bool {
        !self.data.is_empty()
    }

    /// Diagram body followed by the data section
    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity(self.mermaid.len() + self.data.len());
        text.push_str(&self.mermaid);
        text.push_str(&self.data);
        text
    }
}

impl fmt::Display for DiagramText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.mermaid)?;
        f.write_str(&self.data)
    }
}

/// Compile a schema and optional snapshot into diagram text.
///
/// Total over every loaded schema: the loader has already rejected anything
/// that could not be rendered.
pub fn compile(schema: &Schema, snapshot: Option<&DataSnapshot>) -> DiagramText {
    DiagramText {
        mermaid: to_mermaid(schema),
        data: snapshot
            .map(|s| to_data_html(schema, s))
            .unwrap_or_default(),
    }
}

/// Counts reported after generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiagramStats {
    pub tables: usize,
    pub columns: usize,
    pub relationships: usize,
}

impl fmt::Display for DiagramStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} tables, {} columns, {} relationships",
            self.tables, self.columns, self.relationships
        )
    }
}

pub fn summarize(schema: &Schema) -> DiagramStats {
    DiagramStats {
        tables: schema.tables.len(),
        columns: schema.tables.iter().map(|t| t.columns.len()).sum(),
        relationships: schema.tables.iter().map(|t| t.relationships.len()).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Column, Relationship, Table};

    fn sample_schema() -> Schema {
        Schema {
            tables: vec![
                Table::new("users")
                    .with_column(Column::new("id", "int").primary_key())
                    .with_relationship(Relationship::one_to_many("messages", "user_id")),
                Table::new("messages").with_column(Column::new("id", "int").primary_key()),
            ],
        }
    }

    #[test]
    fn test_compile_without_snapshot_has_no_data() {
        let text = compile(&sample_schema(), None);
        assert!(!text.has_data());
        assert_eq!(text.to_text(), text.mermaid);
    }

    #[test]
    fn test_compile_is_idempotent() {
        let mut snapshot = DataSnapshot::new();
        snapshot.insert("users", TableData::new("id | integer", "1"));
        snapshot.insert("messages", TableData::new("id | integer", ""));

        let schema = sample_schema();
        let first = compile(&schema, Some(&snapshot));
        let second = compile(&schema, Some(&snapshot));
        assert_eq!(first, second);
        assert_eq!(first.to_text(), second.to_text());
    }

    #[test]
    fn test_display_matches_to_text() {
        let mut snapshot = DataSnapshot::new();
        snapshot.insert("users", TableData::new("id | integer", "1"));

        let text = compile(&sample_schema(), Some(&snapshot));
        assert_eq!(text.to_string(), text.to_text());
        assert!(text.to_text().starts_with("erDiagram\n"));
        assert!(text.to_text().ends_with("</div>\n"));
    }

    #[test]
    fn test_summarize() {
        let stats = summarize(&sample_schema());
        assert_eq!(
            stats,
            DiagramStats {
                tables: 2,
                columns: 2,
                relationships: 1
            }
        );
        assert_eq!(stats.to_string(), "2 tables, 2 columns, 1 relationships");
    }
}
