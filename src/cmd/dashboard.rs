//! Dashboard command: diagram plus live table data, wrapped in Markdown.

use super::{load_schema, write_output};
use crate::diagram::{compile, summarize, DataSnapshot};
use crate::document::{render_dashboard, DashboardOptions};
use crate::fetch::{collect_snapshot, FetchConfig, FetchOverrides, PsqlSource, TableDataSource};
use anyhow::{Context, Result};
use chrono::Local;
use std::path::PathBuf;
use tracing::{info, warn};

/// Parsed `dashboard` arguments
pub struct DashboardArgs {
    pub schema: PathBuf,
    pub output: PathBuf,
    pub diagram_output: PathBuf,
    pub title: String,
    pub no_data: bool,
    pub config: Option<PathBuf>,
    pub container: Option<String>,
    pub user: Option<String>,
    pub database: Option<String>,
    pub sample_rows: Option<usize>,
}

pub fn run(args: DashboardArgs) -> Result<()> {
    let schema = load_schema(&args.schema)?;

    let snapshot = if args.no_data {
        None
    } else {
        let config = resolve_config(&args)?;
        info!(
            container = %config.container,
            database = %config.database,
            "fetching live table data"
        );
        fetch_snapshot(&PsqlSource::new(config))
    };

    let diagram = compile(&schema, snapshot.as_ref());

    let options = DashboardOptions {
        title: args.title.clone(),
        schema_path: args.schema.display().to_string(),
        generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    };
    let doc = render_dashboard(&schema, &diagram, &options);

    write_output(&args.output, &doc)?;
    write_output(&args.diagram_output, &diagram.mermaid)?;

    eprintln!("Dashboard written to: {}", args.output.display());
    eprintln!("Diagram written to: {}", args.diagram_output.display());
    eprintln!("ERD: {}", summarize(&schema));
    if let Some(ref snapshot) = snapshot {
        eprintln!("Data: {} tables captured", snapshot.len());
    }

    Ok(())
}

fn resolve_config(args: &DashboardArgs) -> Result<FetchConfig> {
    let base = match args.config {
        Some(ref path) => FetchConfig::load(path).context("config: failed to load fetch config")?,
        None => FetchConfig::default(),
    };

    Ok(base.with_overrides(FetchOverrides {
        container: args.container.clone(),
        user: args.user.clone(),
        database: args.database.clone(),
        sample_rows: args.sample_rows,
    }))
}

/// Collect a snapshot, degrading to no data instead of failing the run
fn fetch_snapshot(source: &dyn TableDataSource) -> Option<DataSnapshot> {
    match collect_snapshot(source) {
        Ok(collected) => {
            if !collected.failed.is_empty() {
                eprintln!(
                    "fetch: no data for {} table(s): {}",
                    collected.failed.len(),
                    collected.failed.join(", ")
                );
            }
            Some(collected.snapshot)
        }
        Err(e) => {
            warn!(error = %e, "live data unavailable");
            eprintln!("fetch: live data unavailable: {}", e);
            None
        }
    }
}
