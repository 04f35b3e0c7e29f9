//! PostgreSQL data source that shells out to `psql` inside a Docker container.

use super::{DataFetchError, TableDataSource};
use crate::diagram::TableData;
use crate::fetch::config::FetchConfig;
use std::process::Command;
use tracing::debug;

const LIST_TABLES_QUERY: &str =
    "SELECT tablename FROM pg_tables WHERE schemaname = 'public' ORDER BY tablename;";

/// Runs each query as `docker exec <container> psql -U <user> -d <db> -t -c <query>`
#[derive(Debug, Clone)]
pub struct PsqlSource {
    config: FetchConfig,
}

impl PsqlSource {
    pub fn new(config: FetchConfig) -> Self {
        Self { config }
    }

    /// Arguments passed to the docker executable for a query
    pub fn command_args(&self, query: &str) -> Vec<String> {
        vec![
            "exec".to_string(),
            self.config.container.clone(),
            "psql".to_string(),
            "-U".to_string(),
            self.config.user.clone(),
            "-d".to_string(),
            self.config.database.clone(),
            "-t".to_string(),
            "-c".to_string(),
            query.to_string(),
        ]
    }

    fn run_query(&self, query: &str) -> Result<String, DataFetchError> {
        debug!(container = %self.config.container, query, "running psql query");

        let output = Command::new(&self.config.docker_bin)
            .args(self.command_args(query))
            .output()
            .map_err(|source| DataFetchError::Spawn {
                program: self.config.docker_bin.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(DataFetchError::CommandFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(decode_output(&output.stdout))
    }
}

impl TableDataSource for PsqlSource {
    fn list_tables(&self) -> Result<Vec<String>, DataFetchError> {
        let stdout = self.run_query(LIST_TABLES_QUERY)?;
        Ok(parse_table_list(&stdout))
    }

    fn fetch_table_data(&self, table: &str) -> Result<TableData, DataFetchError> {
        let sample = self.run_query(&sample_query(table, self.config.sample_rows))?;
        let structure = self.run_query(&structure_query(table))?;

        Ok(TableData::new(structure.trim(), sample.trim()))
    }
}

/// psql prints row data in the database encoding; undecodable bytes become U+FFFD
fn decode_output(stdout: &[u8]) -> String {
    String::from_utf8_lossy(stdout).into_owned()
}

/// One table name per non-blank line of tuples-only output
pub fn parse_table_list(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn sample_query(table: &str, limit: usize) -> String {
    format!("SELECT * FROM {} LIMIT {};", quote_ident(table), limit)
}

pub fn structure_query(table: &str) -> String {
    format!(
        "SELECT column_name, data_type, is_nullable FROM information_schema.columns \
         WHERE table_name = {} ORDER BY ordinal_position;",
        quote_literal(table)
    )
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
