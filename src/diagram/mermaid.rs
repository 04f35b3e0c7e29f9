//! Mermaid erDiagram format output.

use crate::schema::{Column, Relationship, Schema, Table};
use std::fmt::Write;

/// Diagram type keyword, always the first line
pub const HEADER: &str = "erDiagram";

/// Generate a Mermaid erDiagram from a schema.
///
/// Tables, columns and relationships are emitted in document order. Names,
/// types and labels are written verbatim.
pub fn to_mermaid(schema: &Schema) -> String {
    let mut output = String::new();

    output.push_str(HEADER);
    output.push('\n');

    for table in &schema.tables {
        write_table(&mut output, table);
    }

    output
}

fn write_table(output: &mut String, table: &Table) {
    let _ = writeln!(output, "    {} {{", table.name);

    for col in &table.columns {
        output.push_str("        ");
        output.push_str(&column_line(col));
        output.push('\n');
    }

    output.push_str("    }\n");

    for rel in &table.relationships {
        output.push_str("    ");
        output.push_str(&relationship_line(&table.name, rel));
        output.push('\n');
    }
}

/// `<type> <name>` plus the column's marker, without indentation
pub fn column_line(col: &Column) -> String {
    match col.marker().as_mermaid() {
        Some(marker) => format!("{} {} {}", col.col_type, col.name, marker),
        None => format!("{} {}", col.col_type, col.name),
    }
}

/// `<source> <token> <target> : "<label>"`, without indentation
pub fn relationship_line(source: &str, rel: &Relationship) -> String {
    format!(
        "{} {} {} : \"{}\"",
        source,
        rel.kind.as_mermaid(),
        rel.target_table,
        rel.foreign_key
    )
}
