mod dashboard;
mod diagram;
mod schema;

use crate::schema::{load_file, Schema};
use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub use dashboard::DashboardArgs;

/// Schema document read when no path is given
pub const DEFAULT_SCHEMA: &str = "db_schema.json";

#[derive(Parser)]
#[command(name = "schema-erd")]
#[command(version)]
#[command(about = "Compile database schema documents into Mermaid ER diagrams", long_about = None)]
pub struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a Mermaid ER diagram from a schema document
    Diagram {
        /// Schema document (JSON, or YAML by .yaml/.yml extension)
        #[arg(default_value = DEFAULT_SCHEMA)]
        schema: PathBuf,

        /// Output diagram file
        #[arg(short, long, default_value = "database_diagram.mmd")]
        output: PathBuf,

        /// Don't echo the diagram to stdout
        #[arg(short, long)]
        quiet: bool,
    },

    /// Generate a Markdown dashboard with the diagram and live table data
    Dashboard {
        /// Schema document (JSON, or YAML by .yaml/.yml extension)
        #[arg(default_value = DEFAULT_SCHEMA)]
        schema: PathBuf,

        /// Output dashboard file
        #[arg(short, long, default_value = "database_full_dashboard.md")]
        output: PathBuf,

        /// Output diagram file
        #[arg(long, default_value = "database_diagram_enhanced.mmd")]
        diagram_output: PathBuf,

        /// Dashboard heading
        #[arg(long, default_value = "Database")]
        title: String,

        /// Skip querying the database for live data
        #[arg(long)]
        no_data: bool,

        /// YAML config file for the database connection
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Docker container running PostgreSQL
        #[arg(long)]
        container: Option<String>,

        /// Database user
        #[arg(long)]
        user: Option<String>,

        /// Database name
        #[arg(long)]
        database: Option<String>,

        /// Sample rows fetched per table
        #[arg(long)]
        sample_rows: Option<usize>,
    },

    /// Print the JSON Schema of the schema document format
    Schema {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Diagram {
            schema,
            output,
            quiet,
        } => diagram::run(schema, output, quiet),
        Commands::Dashboard {
            schema,
            output,
            diagram_output,
            title,
            no_data,
            config,
            container,
            user,
            database,
            sample_rows,
        } => dashboard::run(DashboardArgs {
            schema,
            output,
            diagram_output,
            title,
            no_data,
            config,
            container,
            user,
            database,
            sample_rows,
        }),
        Commands::Schema { output } => schema::run(output),
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "schema-erd", &mut io::stdout());
            Ok(())
        }
    }
}

/// Load a schema document, prefixing failures with the `load` stage
pub(crate) fn load_schema(path: &Path) -> Result<Schema> {
    if !path.exists() {
        bail!("load: schema file not found: {}", path.display());
    }
    load_file(path).with_context(|| format!("load: invalid schema {}", path.display()))
}

/// Write an output file, prefixing failures with the `write` stage
pub(crate) fn write_output(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("write: failed to write {}", path.display()))
}
