//! Tolerant on-disk shape of `project_specs.yaml`.
//!
//! Unknown keys are ignored; anything that affects alignment is checked in
//! [`crate::load`] when converting into the strict model.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct RawProjectSpecs {
    pub project_id: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub drs_specs: Vec<RawDrsSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawDrsSpec {
    #[serde(rename = "type")]
    pub drs_type: String,

    pub separator: String,

    /// Coarse pre-check pattern some projects ship. Not used for alignment.
    #[serde(default)]
    pub regex: Option<String>,

    #[serde(default)]
    pub properties: Option<RawProperties>,

    #[serde(default)]
    pub parts: Vec<RawPart>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProperties {
    #[serde(default)]
    pub extension: Option<String>,

    #[serde(default)]
    pub extension_separator: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPart {
    #[serde(default)]
    pub collection_id: Option<String>,

    #[serde(default = "default_required")]
    pub is_required: bool,

    #[serde(default)]
    pub kind: Option<String>,

    #[serde(default)]
    pub position: Option<usize>,

    /// Present on constant parts, which are rejected.
    #[serde(default)]
    pub value: Option<String>,
}

fn default_required() -> bool {
    true
}
