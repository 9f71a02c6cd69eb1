//! Collection assignment for unordered bags of terms.
//!
//! Resolution is conservative: a collection claimed by several terms, or a
//! term that is the only candidate of several collections, is left unfilled
//! and reported. Nothing is ever guessed.

use crate::ports::{TermOracle, is_compliant};
use crate::sink::IssueSink;
use drskit_types::{DrsSpecification, GenerationIssue};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Outcome of resolving a bag against one schema.
#[derive(Debug, Default)]
pub(crate) struct Resolution {
    pub assigned: BTreeMap<String, String>,
}

/// `collection_id -> compliant terms` for every collection of the schema.
pub(crate) fn candidates(
    oracle: &dyn TermOracle,
    project_id: &str,
    spec: &DrsSpecification,
    terms: &BTreeSet<String>,
) -> BTreeMap<String, BTreeSet<String>> {
    let mut out: BTreeMap<String, BTreeSet<String>> = spec
        .collection_ids()
        .map(|id| (id.to_string(), BTreeSet::new()))
        .collect();
    for term in terms {
        for collection_id in spec.collection_ids() {
            if is_compliant(oracle, project_id, collection_id, term)
                && let Some(set) = out.get_mut(collection_id)
            {
                set.insert(term.clone());
            }
        }
    }
    out
}

pub(crate) fn resolve(
    spec: &DrsSpecification,
    terms: &BTreeSet<String>,
    candidates: &BTreeMap<String, BTreeSet<String>>,
    sink: &mut IssueSink<GenerationIssue>,
) -> Resolution {
    // term -> collections (in slot order) where it is the sole candidate
    let mut sole_claims: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for collection_id in spec.collection_ids() {
        if let Some(set) = candidates.get(collection_id)
            && set.len() == 1
            && let Some(term) = set.first()
        {
            sole_claims
                .entry(term.as_str())
                .or_default()
                .push(collection_id);
        }
    }

    let mut resolution = Resolution::default();
    let mut reported_conflicts: BTreeSet<&str> = BTreeSet::new();
    for collection_id in spec.collection_ids() {
        let Some(set) = candidates.get(collection_id) else {
            continue;
        };
        match set.len() {
            0 => {}
            1 => {
                let Some(term) = set.first() else { continue };
                let claims = sole_claims.get(term.as_str()).map_or(&[][..], Vec::as_slice);
                if claims.len() > 1 {
                    if reported_conflicts.insert(term.as_str()) {
                        debug!(term = %term, collections = claims.len(), "conflicting collections");
                        sink.error(GenerationIssue::ConflictingCollections {
                            collection_ids: claims.iter().map(|c| c.to_string()).collect(),
                            term: term.clone(),
                        });
                    }
                } else {
                    resolution
                        .assigned
                        .insert(collection_id.to_string(), term.clone());
                }
            }
            _ => {
                debug!(collection = %collection_id, candidates = set.len(), "ambiguous collection");
                sink.error(GenerationIssue::AmbiguousCollection {
                    collection_id: collection_id.to_string(),
                    candidates: set.clone(),
                });
            }
        }
    }

    for term in terms {
        let claimed = candidates.values().any(|set| set.contains(term));
        if !claimed {
            sink.warning(GenerationIssue::ExtraTerm {
                value: term.clone(),
            });
        }
    }

    resolution
}
