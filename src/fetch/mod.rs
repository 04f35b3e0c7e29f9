//! Live table data collection.
//!
//! The diagram compiler only ever sees a [`DataSnapshot`]; how it was filled is
//! hidden behind [`TableDataSource`]. Failures are isolated per table: a table
//! that can't be fetched is logged and left out of the snapshot.

pub mod config;
mod psql;

pub use config::{FetchConfig, FetchOverrides};
pub use psql::PsqlSource;

use crate::diagram::{DataSnapshot, TableData};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum DataFetchError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("query failed ({status}): {stderr}")]
    CommandFailed { status: String, stderr: String },
}

/// Source of live table structure and sample rows
pub trait TableDataSource {
    /// Names of all tables available in the database
    fn list_tables(&self) -> Result<Vec<String>, DataFetchError>;

    /// Structure and sample rows for one table
    fn fetch_table_data(&self, table: &str) -> Result<TableData, DataFetchError>;
}

/// Snapshot plus the tables that could not be fetched
#[derive(Debug, Default)]
pub struct CollectedSnapshot {
    pub snapshot: DataSnapshot,
    pub failed: Vec<String>,
}

/// Fetch every table the source lists.
///
/// Only a failure to list tables is returned as an error.
pub fn collect_snapshot(source: &dyn TableDataSource) -> Result<CollectedSnapshot, DataFetchError> {
    let tables = source.list_tables()?;
    debug!(count = tables.len(), "listed tables");
    Ok(collect_tables(source, &tables))
}

/// Fetch the given tables, skipping the ones that fail
pub fn collect_tables(source: &dyn TableDataSource, tables: &[String]) -> CollectedSnapshot {
    let mut collected = CollectedSnapshot::default();

    for table in tables {
        match source.fetch_table_data(table) {
            Ok(data) => collected.snapshot.insert(table.clone(), data),
            Err(e) => {
                warn!(table = %table, error = %e, "skipping table data");
                collected.failed.push(table.clone());
            }
        }
    }

    collected
}
