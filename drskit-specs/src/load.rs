use crate::raw::{RawDrsSpec, RawProjectSpecs};
use camino::{Utf8Path, Utf8PathBuf};
use drskit_types::{
    CollectionSlot, DrsSpecification, DrsType, FileNameExtension, ProjectDrsSpecification,
};
use fs_err as fs;
use glob::glob;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

/// File name of a project's schema inside its directory.
pub const PROJECT_SPECS_FILE: &str = "project_specs.yaml";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpecLoadError {
    #[error("project '{project_id}' not found")]
    NotFound { project_id: String },

    #[error("io error reading {path}: {message}")]
    Io { path: String, message: String },

    #[error("yaml parse error in {path}: {message}")]
    Yaml { path: String, message: String },

    #[error("file declares project '{found}' but '{expected}' was requested")]
    ProjectMismatch { expected: String, found: String },

    #[error("unknown DRS type '{value}'")]
    UnknownDrsType { value: String },

    #[error("{drs_type}: DRS type declared twice")]
    DuplicateDrsType { drs_type: DrsType },

    #[error("{drs_type}: separator must be a single character, got '{separator}'")]
    InvalidSeparator { drs_type: DrsType, separator: String },

    #[error("{drs_type}: part {index} declares position {found}, expected {index}")]
    NonContiguousPosition {
        drs_type: DrsType,
        index: usize,
        found: usize,
    },

    #[error("{drs_type}: required part '{collection_id}' follows an optional part")]
    NonTrailingOptional {
        drs_type: DrsType,
        collection_id: String,
    },

    #[error("{drs_type}: part {index} has kind '{kind}', only collection parts are supported")]
    UnsupportedPartKind {
        drs_type: DrsType,
        index: usize,
        kind: String,
    },

    #[error("{drs_type}: part {index} has no collection_id")]
    MissingCollectionId { drs_type: DrsType, index: usize },

    #[error("{drs_type}: no parts declared")]
    EmptySpecification { drs_type: DrsType },

    #[error("file_name specification declares no extension")]
    MissingExtension,
}

/// Read and validate a single `project_specs.yaml`.
pub fn load_project_specs(path: &Utf8Path) -> Result<ProjectDrsSpecification, SpecLoadError> {
    debug!(path = %path, "loading project specs");
    let text = fs::read_to_string(path).map_err(|e| SpecLoadError::Io {
        path: path.to_string(),
        message: e.to_string(),
    })?;
    parse_project_specs(&text).map_err(|e| match e {
        SpecLoadError::Yaml { message, .. } => SpecLoadError::Yaml {
            path: path.to_string(),
            message,
        },
        other => other,
    })
}

/// Parse and validate schema text.
pub fn parse_project_specs(text: &str) -> Result<ProjectDrsSpecification, SpecLoadError> {
    let raw: RawProjectSpecs = serde_yaml::from_str(text).map_err(|e| SpecLoadError::Yaml {
        path: "<inline>".to_string(),
        message: e.to_string(),
    })?;
    convert_project(raw)
}

fn convert_project(raw: RawProjectSpecs) -> Result<ProjectDrsSpecification, SpecLoadError> {
    let mut specs = BTreeMap::new();
    for raw_spec in raw.drs_specs {
        let spec = convert_spec(raw_spec)?;
        let drs_type = spec.drs_type;
        if specs.insert(drs_type, spec).is_some() {
            return Err(SpecLoadError::DuplicateDrsType { drs_type });
        }
    }
    Ok(ProjectDrsSpecification {
        project_id: raw.project_id,
        description: raw.description,
        specs,
    })
}

fn convert_spec(raw: RawDrsSpec) -> Result<DrsSpecification, SpecLoadError> {
    let drs_type: DrsType = raw
        .drs_type
        .parse()
        .map_err(|_| SpecLoadError::UnknownDrsType {
            value: raw.drs_type.clone(),
        })?;

    let mut chars = raw.separator.chars();
    let separator = match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => {
            return Err(SpecLoadError::InvalidSeparator {
                drs_type,
                separator: raw.separator,
            });
        }
    };

    if raw.parts.is_empty() {
        return Err(SpecLoadError::EmptySpecification { drs_type });
    }

    let mut slots = Vec::with_capacity(raw.parts.len());
    let mut seen_optional = false;
    for (index, part) in raw.parts.into_iter().enumerate() {
        if let Some(kind) = part.kind.as_deref()
            && kind != "collection"
        {
            return Err(SpecLoadError::UnsupportedPartKind {
                drs_type,
                index,
                kind: kind.to_string(),
            });
        }
        let Some(collection_id) = part.collection_id else {
            if part.value.is_some() {
                return Err(SpecLoadError::UnsupportedPartKind {
                    drs_type,
                    index,
                    kind: "constant".to_string(),
                });
            }
            return Err(SpecLoadError::MissingCollectionId { drs_type, index });
        };
        if let Some(found) = part.position
            && found != index
        {
            return Err(SpecLoadError::NonContiguousPosition {
                drs_type,
                index,
                found,
            });
        }
        if part.is_required && seen_optional {
            return Err(SpecLoadError::NonTrailingOptional {
                drs_type,
                collection_id,
            });
        }
        seen_optional |= !part.is_required;
        slots.push(CollectionSlot {
            collection_id,
            required: part.is_required,
            position: index,
        });
    }

    let extension = match drs_type {
        DrsType::FileName => {
            let props = raw.properties.unwrap_or_default();
            match props.extension {
                Some(value) if !value.is_empty() => Some(FileNameExtension {
                    separator: props.extension_separator.unwrap_or_else(|| ".".to_string()),
                    value,
                }),
                _ => return Err(SpecLoadError::MissingExtension),
            }
        }
        _ => None,
    };

    Ok(DrsSpecification {
        drs_type,
        separator,
        slots,
        extension,
    })
}

/// Directory-backed store: `<root>/<project_id>/project_specs.yaml`.
#[derive(Debug, Clone)]
pub struct FsSpecificationStore {
    root: Utf8PathBuf,
}

impl FsSpecificationStore {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn project_path(&self, project_id: &str) -> Utf8PathBuf {
        self.root.join(project_id).join(PROJECT_SPECS_FILE)
    }

    pub fn load_project(&self, project_id: &str) -> Result<ProjectDrsSpecification, SpecLoadError> {
        let path = self.project_path(project_id);
        if !path.is_file() {
            return Err(SpecLoadError::NotFound {
                project_id: project_id.to_string(),
            });
        }
        let spec = load_project_specs(&path)?;
        if spec.project_id != project_id {
            return Err(SpecLoadError::ProjectMismatch {
                expected: project_id.to_string(),
                found: spec.project_id,
            });
        }
        Ok(spec)
    }

    /// Project ids with a schema file under the root, sorted.
    pub fn list_projects(&self) -> Result<Vec<String>, SpecLoadError> {
        let pattern = self.root.join("*").join(PROJECT_SPECS_FILE);
        let entries = glob(pattern.as_str()).map_err(|e| SpecLoadError::Io {
            path: pattern.to_string(),
            message: e.to_string(),
        })?;

        let mut out = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| SpecLoadError::Io {
                path: pattern.to_string(),
                message: e.to_string(),
            })?;
            if let Some(name) = path
                .parent()
                .and_then(|p| p.file_name())
                .and_then(|n| n.to_str())
            {
                out.push(name.to_string());
            }
        }
        out.sort();
        debug!(root = %self.root, count = out.len(), "listed projects");
        Ok(out)
    }
}
