//! BDD harness (cucumber-rs).
//!
//! This crate exists to keep scenario tests isolated from the production crates.

use camino::Utf8PathBuf;

/// Shared fixtures at the workspace root: `specs/` and `vocabulary.yaml`.
pub fn fixtures_dir() -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(|root| root.join("tests").join("fixtures"))
        .unwrap_or_else(|| Utf8PathBuf::from("tests/fixtures"))
}

/// Issue kinds of one report section, in report order.
pub fn issue_kinds(issues: &serde_json::Value) -> Vec<String> {
    issues
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|i| i["kind"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
