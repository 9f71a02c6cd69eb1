use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The three expression shapes a project can declare a DRS for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrsType {
    Directory,
    FileName,
    DatasetId,
}

impl DrsType {
    pub const ALL: [DrsType; 3] = [DrsType::Directory, DrsType::FileName, DrsType::DatasetId];

    pub fn as_str(self) -> &'static str {
        match self {
            DrsType::Directory => "directory",
            DrsType::FileName => "file_name",
            DrsType::DatasetId => "dataset_id",
        }
    }
}

impl fmt::Display for DrsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDrsType(pub String);

impl fmt::Display for UnknownDrsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown DRS type '{}'", self.0)
    }
}

impl std::error::Error for UnknownDrsType {}

impl FromStr for DrsType {
    type Err = UnknownDrsType;

    /// Accepts the canonical snake_case names plus the short aliases used on
    /// the command line (`filename`, `dataset`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "directory" | "dir" => Ok(DrsType::Directory),
            "file_name" | "filename" => Ok(DrsType::FileName),
            "dataset_id" | "dataset" => Ok(DrsType::DatasetId),
            other => Err(UnknownDrsType(other.to_string())),
        }
    }
}

/// One schema position bound to one vocabulary collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSlot {
    pub collection_id: String,
    pub required: bool,
    /// 0-based, contiguous within a [`DrsSpecification`].
    pub position: usize,
}

/// Fixed trailing literal of file names, e.g. `.` + `nc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNameExtension {
    pub separator: String,
    pub value: String,
}

impl FileNameExtension {
    pub fn full(&self) -> String {
        format!("{}{}", self.separator, self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrsSpecification {
    pub drs_type: DrsType,
    pub separator: char,
    pub slots: Vec<CollectionSlot>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<FileNameExtension>,
}

impl DrsSpecification {
    pub fn required_count(&self) -> usize {
        self.slots.iter().filter(|s| s.required).count()
    }

    /// Collection ids in position order.
    pub fn collection_ids(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|s| s.collection_id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDrsSpecification {
    pub project_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub specs: BTreeMap<DrsType, DrsSpecification>,
}

impl ProjectDrsSpecification {
    pub fn get(&self, drs_type: DrsType) -> Option<&DrsSpecification> {
        self.specs.get(&drs_type)
    }
}

/// Canonical result of a successful compliance check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchingTerm {
    pub project_id: String,
    pub collection_id: String,
    pub term_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drs_type_parses_aliases() {
        assert_eq!("filename".parse::<DrsType>().unwrap(), DrsType::FileName);
        assert_eq!("file_name".parse::<DrsType>().unwrap(), DrsType::FileName);
        assert_eq!("Dataset".parse::<DrsType>().unwrap(), DrsType::DatasetId);
        assert_eq!("directory".parse::<DrsType>().unwrap(), DrsType::Directory);
        assert!("path".parse::<DrsType>().is_err());
    }

    #[test]
    fn drs_type_serializes_snake_case() {
        let json = serde_json::to_string(&DrsType::DatasetId).unwrap();
        assert_eq!(json, "\"dataset_id\"");
        assert_eq!(DrsType::FileName.to_string(), "file_name");
    }

    #[test]
    fn extension_full_joins_separator() {
        let ext = FileNameExtension {
            separator: ".".into(),
            value: "nc".into(),
        };
        assert_eq!(ext.full(), ".nc");
    }
}
