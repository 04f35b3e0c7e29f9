//! Markdown dashboard embedding the diagram and the live data section.

use crate::diagram::DiagramText;
use crate::schema::{ColumnMarker, Schema};
use std::fmt::Write;

/// Shown in place of the data section when no snapshot was collected
pub const NO_DATA_MESSAGE: &str = "<p>No data to display</p>";

/// Values the dashboard needs besides the compiled diagram
#[derive(Debug, Clone)]
pub struct DashboardOptions {
    /// Heading text, e.g. the project or database name
    pub title: String,
    /// Schema path echoed in the command hints
    pub schema_path: String,
    /// Pre-formatted generation timestamp
    pub generated_at: String,
}

/// Render the full Markdown dashboard
pub fn render_dashboard(schema: &Schema, diagram: &DiagramText, options: &DashboardOptions) -> String {
    let mut doc = String::new();

    let _ = writeln!(doc, "# 🗄️ {} - Full visualization", options.title);
    doc.push('\n');
    let _ = writeln!(doc, "*Updated: {}*", options.generated_at);
    doc.push('\n');

    doc.push_str("## 📋 Schema diagram\n\n");
    doc.push_str("```mermaid\n");
    doc.push_str(diagram.mermaid.trim_end());
    doc.push_str("\n```\n\n");

    doc.push_str("## 📊 Tables\n\n");
    write_table_summary(&mut doc, schema);
    doc.push('\n');

    doc.push_str("## 🔗 Relationships\n\n");
    write_relationship_list(&mut doc, schema);
    doc.push('\n');

    if diagram.has_data() {
        doc.push_str(diagram.data.trim_end());
    } else {
        doc.push_str(NO_DATA_MESSAGE);
    }
    doc.push_str("\n\n");

    write_command_hints(&mut doc, &options.schema_path);

    doc
}

fn write_table_summary(doc: &mut String, schema: &Schema) {
    if schema.is_empty() {
        doc.push_str("_No tables defined._\n");
        return;
    }

    doc.push_str("| Table | Columns | Primary key | Relationships |\n");
    doc.push_str("|-------|---------|-------------|---------------|\n");

    for table in &schema.tables {
        let pk: Vec<&str> = table
            .columns
            .iter()
            .filter(|c| c.marker() == ColumnMarker::PrimaryKey)
            .map(|c| c.name.as_str())
            .collect();
        let pk = if pk.is_empty() {
            "-".to_string()
        } else {
            pk.join(", ")
        };

        let _ = writeln!(
            doc,
            "| {} | {} | {} | {} |",
            escape_cell(&table.name),
            table.columns.len(),
            escape_cell(&pk),
            table.relationships.len()
        );
    }
}

fn write_relationship_list(doc: &mut String, schema: &Schema) {
    let mut any = false;

    for (table, rel) in schema.relationships() {
        any = true;
        let _ = writeln!(
            doc,
            "- **{}** → **{}** ({}, `{}`)",
            table.name,
            rel.target_table,
            rel.kind.describe(),
            rel.foreign_key
        );
    }

    if !any {
        doc.push_str("_No relationships defined._\n");
    }
}

fn write_command_hints(doc: &mut String, schema_path: &str) {
    doc.push_str("## 🛠️ Commands\n\n");
    doc.push_str("```bash\n");
    doc.push_str("# Regenerate the diagram only\n");
    let _ = writeln!(doc, "schema-erd diagram {}", schema_path);
    doc.push('\n');
    doc.push_str("# Regenerate this dashboard\n");
    let _ = writeln!(doc, "schema-erd dashboard {}", schema_path);
    doc.push('\n');
    doc.push_str("# Regenerate without querying the database\n");
    let _ = writeln!(doc, "schema-erd dashboard {} --no-data", schema_path);
    doc.push_str("```\n");
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|")
}
