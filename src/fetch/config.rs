//! YAML configuration for the live data source.

use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Connection settings for `docker exec <container> psql`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Docker executable
    pub docker_bin: String,
    /// Container running PostgreSQL
    pub container: String,
    /// Database role passed to `psql -U`
    pub user: String,
    /// Database name passed to `psql -d`
    pub database: String,
    /// Rows sampled per table
    pub sample_rows: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            docker_bin: "docker".to_string(),
            container: "ggchat-postgres".to_string(),
            user: "demo".to_string(),
            database: "ggchat".to_string(),
            sample_rows: 10,
        }
    }
}

/// Values given on the command line, each replacing the config file value
#[derive(Debug, Clone, Default)]
pub struct FetchOverrides {
    pub container: Option<String>,
    pub user: Option<String>,
    pub database: Option<String>,
    pub sample_rows: Option<usize>,
}

impl FetchConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: FetchConfig = serde_yaml_ng::from_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    pub fn with_overrides(mut self, overrides: FetchOverrides) -> Self {
        if let Some(container) = overrides.container {
            self.container = container;
        }
        if let Some(user) = overrides.user {
            self.user = user;
        }
        if let Some(database) = overrides.database {
            self.database = database;
        }
        if let Some(rows) = overrides.sample_rows {
            self.sample_rows = rows;
        }
        self
    }
}
