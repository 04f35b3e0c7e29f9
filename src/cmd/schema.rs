use super::write_output;
use crate::json_schema::document_schema_json;
use anyhow::Result;
use std::path::PathBuf;

pub fn run(output: Option<PathBuf>) -> Result<()> {
    let json = document_schema_json();

    match output {
        Some(path) => {
            write_output(&path, &json)?;
            eprintln!("Schema written to: {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
