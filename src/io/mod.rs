pub mod output;
pub mod table_reader;

pub use table_reader::{table_from_json, table_from_records};

use crate::core::Table;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn read_file(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}

/// Read a JSON records file into a [`Table`]
pub fn load_table(path: &Path) -> Result<Table> {
    let contents =
        read_file(path).with_context(|| format!("Failed to read input {}", path.display()))?;
    let table = table_from_json(&contents)
        .with_context(|| format!("Failed to parse input {}", path.display()))?;
    tracing::debug!(
        rows = table.n_rows(),
        columns = table.n_columns(),
        "loaded {}",
        path.display()
    );
    Ok(table)
}
