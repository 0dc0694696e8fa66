//! Build a [`Table`] from a JSON array of flat records
//!
//! `[{"state": "SP", "income": 3.1}, ...]`. Column order follows first
//! appearance. A column is numeric when every non-null cell is a number;
//! otherwise it becomes a text column. Absent keys and `null` are missing
//! cells.

use crate::core::{Column, Table};
use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};

pub fn table_from_json(json: &str) -> Result<Table> {
    let records: Vec<Map<String, Value>> =
        serde_json::from_str(json).context("Expected a JSON array of objects")?;
    table_from_records(&records)
}

pub fn table_from_records(records: &[Map<String, Value>]) -> Result<Table> {
    let mut names: Vec<&str> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !names.contains(&key.as_str()) {
                names.push(key);
            }
        }
    }

    let mut table = Table::new();
    for name in names {
        let cells: Vec<&Value> = records
            .iter()
            .map(|r| r.get(name).unwrap_or(&Value::Null))
            .collect();
        table.push_column(name, build_column(name, &cells)?)?;
    }

    Ok(table)
}

fn build_column(name: &str, cells: &[&Value]) -> Result<Column> {
    let all_numeric = cells
        .iter()
        .all(|cell| matches!(cell, Value::Null | Value::Number(_)));

    if all_numeric {
        return Ok(Column::Numeric(cells.iter().map(|cell| cell.as_f64()).collect()));
    }

    let values = cells
        .iter()
        .map(|cell| match cell {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s.clone())),
            Value::Number(n) => Ok(Some(n.to_string())),
            Value::Bool(b) => Ok(Some(b.to_string())),
            Value::Array(_) | Value::Object(_) => {
                bail!("Column '{}' contains a nested value", name)
            }
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Column::Text(values))
}
