//! Diagram command: schema document in, `.mmd` file out.

use super::{load_schema, write_output};
use crate::diagram::{compile, summarize};
use anyhow::Result;
use std::path::PathBuf;

pub fn run(schema_path: PathBuf, output: PathBuf, quiet: bool) -> Result<()> {
    let schema = load_schema(&schema_path)?;
    let diagram = compile(&schema, None);

    if !quiet {
        println!("```mermaid");
        print!("{}", diagram.mermaid);
        println!("```");
    }

    write_output(&output, &diagram.mermaid)?;

    eprintln!("Diagram written to: {}", output.display());
    eprintln!("ERD: {}", summarize(&schema));

    Ok(())
}
