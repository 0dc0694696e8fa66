// Test utility module for socindex integration tests
#![allow(dead_code)]

use socindex::io::table_from_json;
use socindex::Table;
use std::path::PathBuf;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data/fixtures")
        .join(name)
}

/// Ten states with income, schooling and poverty indicators
pub fn states_table() -> Table {
    let json = std::fs::read_to_string(fixture_path("states.json"))
        .expect("Failed to read states fixture");
    table_from_json(&json).expect("Failed to parse states fixture")
}

pub fn state_features() -> Vec<String> {
    vec!["income".into(), "schooling".into(), "poverty".into()]
}
