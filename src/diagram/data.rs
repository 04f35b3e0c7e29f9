//! HTML data section rendered from a live snapshot.

use crate::diagram::snapshot::{DataSnapshot, TableData};
use crate::schema::Schema;

/// Shown instead of sample rows when a table has none
pub const EMPTY_TABLE_MARKER: &str = "<p><em>Table is empty</em></p>";

/// Render one section per snapshot table.
///
/// Schema tables come first in schema order, followed by snapshot tables the
/// schema doesn't mention, in name order. Schema tables with no snapshot entry
/// are skipped.
pub fn to_data_html(schema: &Schema, snapshot: &DataSnapshot) -> String {
    let mut html = vec![
        "<div class='database-data'>".to_string(),
        "<h2>📊 Database data</h2>".to_string(),
    ];

    for table in &schema.tables {
        if let Some(data) = snapshot.get(&table.name) {
            push_table_section(&mut html, &table.name, data);
        }
    }

    for (name, data) in snapshot.iter() {
        if schema.table(name).is_none() {
            push_table_section(&mut html, name, data);
        }
    }

    html.push("</div>".to_string());

    let mut output = html.join("\n");
    output.push('\n');
    output
}

fn push_table_section(html: &mut Vec<String>, name: &str, data: &TableData) {
    html.push("<div class='table-section'>".to_string());
    html.push(format!("<h3>🗃️ Table: {}</h3>", escape_html(name)));

    html.push("<h4>Structure:</h4>".to_string());
    html.push("<pre>".to_string());
    html.push(escape_html(data.structure_text.trim_end()));
    html.push("</pre>".to_string());

    html.push("<h4>Sample rows:</h4>".to_string());
    if data.is_empty_sample() {
        html.push(EMPTY_TABLE_MARKER.to_string());
    } else {
        html.push("<pre>".to_string());
        html.push(escape_html(data.sample_text.trim_end()));
        html.push("</pre>".to_string());
    }

    html.push("</div>".to_string());
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
