use crate::error::{DrsError, OracleError};
use drskit_specs::{FsSpecificationStore, SpecLoadError};
use drskit_types::{DrsSpecification, DrsType, MatchingTerm, ProjectDrsSpecification};
use std::collections::BTreeMap;
use tracing::warn;

/// Answers "is this value one of the terms of that collection".
///
/// Implementations are expected to be read-only and idempotent. The engine
/// calls them synchronously, possibly many times per expression, and may
/// share one oracle between threads.
pub trait TermOracle: Send + Sync {
    fn check_compliance(
        &self,
        project_id: &str,
        collection_id: &str,
        value: &str,
    ) -> Result<Option<MatchingTerm>, OracleError>;

    /// Term ids of a collection, for diagnostics only.
    fn list_terms(&self, project_id: &str, collection_id: &str)
    -> Result<Vec<String>, OracleError>;
}

/// Source of project DRS schemas.
pub trait SpecificationStore {
    fn load_project(&self, project_id: &str) -> Result<ProjectDrsSpecification, SpecLoadError>;

    /// One expression type of a project.
    fn load(&self, project_id: &str, drs_type: DrsType) -> Result<DrsSpecification, DrsError> {
        let mut project = self.load_project(project_id)?;
        project
            .specs
            .remove(&drs_type)
            .ok_or_else(|| DrsError::UnsupportedDrsType {
                project_id: project_id.to_string(),
                drs_type,
            })
    }
}

impl SpecificationStore for FsSpecificationStore {
    fn load_project(&self, project_id: &str) -> Result<ProjectDrsSpecification, SpecLoadError> {
        FsSpecificationStore::load_project(self, project_id)
    }
}

/// Position-level compliance: lookup failures count as "not compliant".
pub(crate) fn is_compliant(
    oracle: &dyn TermOracle,
    project_id: &str,
    collection_id: &str,
    value: &str,
) -> bool {
    match oracle.check_compliance(project_id, collection_id, value) {
        Ok(found) => found.is_some(),
        Err(err) => {
            warn!(
                project = %project_id,
                collection = %collection_id,
                value = %value,
                error = %err,
                "compliance lookup failed; treating value as non-compliant"
            );
            false
        }
    }
}

/// Oracle backed by literal term lists, keyed by project then collection.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTermOracle {
    // project -> collection -> drs name -> term id
    projects: BTreeMap<String, BTreeMap<String, BTreeMap<String, String>>>,
}

impl InMemoryTermOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register terms whose DRS name is also their id.
    pub fn with_terms<S: AsRef<str>>(
        mut self,
        project_id: &str,
        collection_id: &str,
        terms: impl IntoIterator<Item = S>,
    ) -> Self {
        let collection = self
            .projects
            .entry(project_id.to_string())
            .or_default()
            .entry(collection_id.to_string())
            .or_default();
        for term in terms {
            let term = term.as_ref();
            collection.insert(term.to_string(), term.to_lowercase());
        }
        self
    }
}

impl TermOracle for InMemoryTermOracle {
    fn check_compliance(
        &self,
        project_id: &str,
        collection_id: &str,
        value: &str,
    ) -> Result<Option<MatchingTerm>, OracleError> {
        let collection = self.collection(project_id, collection_id)?;
        Ok(collection.get(value).map(|term_id| MatchingTerm {
            project_id: project_id.to_string(),
            collection_id: collection_id.to_string(),
            term_id: term_id.clone(),
        }))
    }

    fn list_terms(
        &self,
        project_id: &str,
        collection_id: &str,
    ) -> Result<Vec<String>, OracleError> {
        let collection = self.collection(project_id, collection_id)?;
        let mut ids: Vec<String> = collection.values().cloned().collect();
        ids.sort();
        ids.dedup();
        Ok(ids)
    }
}

impl InMemoryTermOracle {
    fn collection(
        &self,
        project_id: &str,
        collection_id: &str,
    ) -> Result<&BTreeMap<String, String>, OracleError> {
        let project = self
            .projects
            .get(project_id)
            .ok_or_else(|| OracleError::UnknownProject {
                project_id: project_id.to_string(),
            })?;
        project
            .get(collection_id)
            .ok_or_else(|| OracleError::UnknownCollection {
                project_id: project_id.to_string(),
                collection_id: collection_id.to_string(),
            })
    }
}

/// Store holding already-parsed schemas.
#[derive(Debug, Clone, Default)]
pub struct InMemorySpecificationStore {
    projects: BTreeMap<String, ProjectDrsSpecification>,
}

impl InMemorySpecificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(mut self, project: ProjectDrsSpecification) -> Self {
        self.projects.insert(project.project_id.clone(), project);
        self
    }
}

impl SpecificationStore for InMemorySpecificationStore {
    fn load_project(&self, project_id: &str) -> Result<ProjectDrsSpecification, SpecLoadError> {
        self.projects
            .get(project_id)
            .cloned()
            .ok_or_else(|| SpecLoadError::NotFound {
                project_id: project_id.to_string(),
            })
    }
}
