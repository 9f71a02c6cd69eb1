//! YAML vocabulary catalog used as a [`TermOracle`].
//!
//! ```yaml
//! projects:
//!   cmip6plus:
//!     collections:
//!       institution_id:
//!         terms:
//!           - { id: ipsl, drs_name: IPSL }
//!       member_id:
//!         terms:
//!           - { id: ripf, pattern: 'r\d+i\d+p\d+f\d+' }
//! ```
//!
//! Literal terms match their `drs_name` (or `id` when absent) exactly.
//! Pattern terms match when the whole value matches.

use camino::Utf8Path;
use drskit_domain::{OracleError, TermOracle};
use drskit_types::MatchingTerm;
use fs_err as fs;
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("io error reading {path}: {message}")]
    Io { path: String, message: String },

    #[error("yaml parse error: {message}")]
    Yaml { message: String },

    #[error("invalid pattern for {project_id}/{collection_id}/{term_id}: {message}")]
    InvalidPattern {
        project_id: String,
        collection_id: String,
        term_id: String,
        message: String,
    },
}

#[derive(Debug, Default, Deserialize)]
struct RawCatalog {
    #[serde(default)]
    projects: BTreeMap<String, RawProject>,
}

#[derive(Debug, Default, Deserialize)]
struct RawProject {
    #[serde(default)]
    collections: BTreeMap<String, RawCollection>,
}

#[derive(Debug, Default, Deserialize)]
struct RawCollection {
    #[serde(default)]
    terms: Vec<RawTerm>,
}

#[derive(Debug, Deserialize)]
struct RawTerm {
    id: String,

    #[serde(default)]
    drs_name: Option<String>,

    #[serde(default)]
    pattern: Option<String>,
}

#[derive(Debug)]
enum Matcher {
    Literal(String),
    Pattern(Regex),
}

#[derive(Debug)]
struct CatalogTerm {
    id: String,
    matcher: Matcher,
}

impl CatalogTerm {
    fn matches(&self, value: &str) -> bool {
        match &self.matcher {
            Matcher::Literal(name) => name == value,
            Matcher::Pattern(re) => re.is_match(value),
        }
    }
}

type Collections = BTreeMap<String, Vec<CatalogTerm>>;

#[derive(Debug, Default)]
pub struct CatalogOracle {
    projects: BTreeMap<String, Collections>,
}

impl CatalogOracle {
    pub fn load(path: &Utf8Path) -> Result<Self, CatalogError> {
        debug!(path = %path, "loading vocabulary catalog");
        let text = fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_yaml_str(&text)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = serde_yaml::from_str(text).map_err(|e| CatalogError::Yaml {
            message: e.to_string(),
        })?;

        let mut projects = BTreeMap::new();
        for (project_id, raw_project) in raw.projects {
            let mut collections = BTreeMap::new();
            for (collection_id, raw_collection) in raw_project.collections {
                let mut terms = Vec::with_capacity(raw_collection.terms.len());
                for raw_term in raw_collection.terms {
                    let matcher = match raw_term.pattern {
                        Some(pattern) => {
                            let anchored = format!("^(?:{pattern})$");
                            let re = Regex::new(&anchored).map_err(|e| {
                                CatalogError::InvalidPattern {
                                    project_id: project_id.clone(),
                                    collection_id: collection_id.clone(),
                                    term_id: raw_term.id.clone(),
                                    message: e.to_string(),
                                }
                            })?;
                            Matcher::Pattern(re)
                        }
                        None => Matcher::Literal(
                            raw_term.drs_name.unwrap_or_else(|| raw_term.id.clone()),
                        ),
                    };
                    terms.push(CatalogTerm {
                        id: raw_term.id,
                        matcher,
                    });
                }
                collections.insert(collection_id, terms);
            }
            projects.insert(project_id, collections);
        }
        Ok(Self { projects })
    }

    fn collection(&self, project_id: &str, collection_id: &str) -> Result<&[CatalogTerm], OracleError> {
        let project = self
            .projects
            .get(project_id)
            .ok_or_else(|| OracleError::UnknownProject {
                project_id: project_id.to_string(),
            })?;
        project
            .get(collection_id)
            .map(Vec::as_slice)
            .ok_or_else(|| OracleError::UnknownCollection {
                project_id: project_id.to_string(),
                collection_id: collection_id.to_string(),
            })
    }
}

impl TermOracle for CatalogOracle {
    fn check_compliance(
        &self,
        project_id: &str,
        collection_id: &str,
        value: &str,
    ) -> Result<Option<MatchingTerm>, OracleError> {
        let terms = self.collection(project_id, collection_id)?;
        Ok(terms.iter().find(|t| t.matches(value)).map(|t| MatchingTerm {
            project_id: project_id.to_string(),
            collection_id: collection_id.to_string(),
            term_id: t.id.clone(),
        }))
    }

    fn list_terms(
        &self,
        project_id: &str,
        collection_id: &str,
    ) -> Result<Vec<String>, OracleError> {
        let terms = self.collection(project_id, collection_id)?;
        let mut ids: Vec<String> = terms.iter().map(|t| t.id.clone()).collect();
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"
projects:
  demo:
    collections:
      institution_id:
        terms:
          - { id: ipsl, drs_name: IPSL }
          - { id: ncc }
      member_id:
        terms:
          - { id: ripf, pattern: 'r\d+i\d+p\d+f\d+' }
"#;

    #[test]
    fn literal_terms_match_drs_name_or_id() {
        let oracle = CatalogOracle::from_yaml_str(CATALOG).unwrap();
        let hit = oracle
            .check_compliance("demo", "institution_id", "IPSL")
            .unwrap()
            .unwrap();
        assert_eq!(hit.term_id, "ipsl");
        assert!(
            oracle
                .check_compliance("demo", "institution_id", "ncc")
                .unwrap()
                .is_some()
        );
        assert!(
            oracle
                .check_compliance("demo", "institution_id", "ipsl")
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn patterns_are_anchored() {
        let oracle = CatalogOracle::from_yaml_str(CATALOG).unwrap();
        assert!(
            oracle
                .check_compliance("demo", "member_id", "r2i2p1f2")
                .unwrap()
                .is_some()
        );
        assert!(
            oracle
                .check_compliance("demo", "member_id", "xr2i2p1f2")
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn unknown_collection_and_bad_pattern() {
        let oracle = CatalogOracle::from_yaml_str(CATALOG).unwrap();
        assert!(matches!(
            oracle.check_compliance("demo", "grid_label", "gn"),
            Err(OracleError::UnknownCollection { .. })
        ));

        let bad = "projects: { p: { collections: { c: { terms: [ { id: x, pattern: '(' } ] } } } }";
        assert!(matches!(
            CatalogOracle::from_yaml_str(bad),
            Err(CatalogError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn list_terms_is_sorted() {
        let oracle = CatalogOracle::from_yaml_str(CATALOG).unwrap();
        assert_eq!(
            oracle.list_terms("demo", "institution_id").unwrap(),
            vec!["ipsl", "ncc"]
        );
    }
}
