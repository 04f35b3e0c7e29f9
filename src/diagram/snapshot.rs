//! Point-in-time table data captured from a live database.

use std::collections::BTreeMap;

/// Pre-formatted structure and sample rows for one table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableData {
    /// Column listing as printed by the data source
    pub structure_text: String,
    /// Sample rows as printed by the data source
    pub sample_text: String,
}

impl TableData {
    pub fn new(structure_text: impl Into<String>, sample_text: impl Into<String>) -> Self {
        Self {
            structure_text: structure_text.into(),
            sample_text: sample_text.into(),
        }
    }

    /// A blank sample means the table has no rows
    pub fn is_empty_sample(&self) -> bool {
        self.sample_text.trim().is_empty()
    }
}

/// Table data keyed by table name.
///
/// Backed by an ordered map so iteration never depends on hashing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataSnapshot {
    tables: BTreeMap<String, TableData>,
}

impl DataSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a table's data
    pub fn insert(&mut self, table: impl Into<String>, data: TableData) {
        self.tables.insert(table.into(), data);
    }

    pub fn get(&self, table: &str) -> Option<&TableData> {
        self.tables.get(table)
    }

    pub fn contains(&self, table: &str) -> bool {
        self.tables.contains_key(table)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Iterate tables in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TableData)> {
        self.tables.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, TableData)> for DataSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, TableData)>>(iter: I) -> Self {
        Self {
            tables: iter.into_iter().collect(),
        }
    }
}
