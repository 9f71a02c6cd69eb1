//! Entry streams for batch runs.
//!
//! A stream mixes context switches and payloads: a known project id or a DRS
//! type keyword changes the current context, anything else is a payload
//! (an expression to validate, or terms to generate from) bound to it.

use drskit_types::DrsType;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BatchError {
    #[error("'{entry}' appears before any project was selected")]
    MissingProject { entry: String },

    #[error("'{entry}' appears before any DRS type was selected")]
    MissingDrsType { entry: String },

    #[error("malformed mapping entry '{entry}'")]
    MalformedMapping { entry: String },
}

/// One payload with its resolved context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    pub project_id: String,
    pub drs_type: DrsType,
    pub payload: String,
}

/// What a generation payload asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationRequest {
    Mapping(BTreeMap<String, String>),
    BagOfTerms(BTreeSet<String>),
}

pub fn parse_entries<S: AsRef<str>>(
    entries: &[S],
    projects: &BTreeSet<String>,
) -> Result<Vec<BatchItem>, BatchError> {
    let mut project: Option<String> = None;
    let mut drs_type: Option<DrsType> = None;
    let mut items = Vec::new();

    for raw in entries {
        let raw = raw.as_ref();
        // Keywords are matched trimmed; payloads are kept verbatim.
        let entry = raw.trim();
        if entry.is_empty() {
            continue;
        }
        if projects.contains(entry) {
            project = Some(entry.to_string());
            continue;
        }
        if let Ok(t) = entry.parse::<DrsType>() {
            drs_type = Some(t);
            continue;
        }
        let Some(project_id) = project.clone() else {
            return Err(BatchError::MissingProject {
                entry: entry.to_string(),
            });
        };
        let Some(drs_type) = drs_type else {
            return Err(BatchError::MissingDrsType {
                entry: entry.to_string(),
            });
        };
        items.push(BatchItem {
            project_id,
            drs_type,
            payload: raw.to_string(),
        });
    }
    Ok(items)
}

/// Split file content for validation: every whitespace-separated word is an
/// entry.
pub fn validation_entries(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Split file content for generation: leading context keywords of a line are
/// separate entries, the rest of the line is one payload.
pub fn generation_entries(text: &str, projects: &BTreeSet<String>) -> Vec<String> {
    let mut out = Vec::new();
    for line in text.lines() {
        let words: Vec<&str> = line.split_whitespace().collect();
        let mut rest = 0;
        while rest < words.len()
            && (projects.contains(words[rest]) || words[rest].parse::<DrsType>().is_ok())
        {
            out.push(words[rest].to_string());
            rest += 1;
        }
        if rest < words.len() {
            out.push(words[rest..].join(" "));
        }
    }
    out
}

/// Words all of the form `collection=value` make a mapping; anything else is
/// a bag of terms.
pub fn generation_request(payload: &str) -> Result<GenerationRequest, BatchError> {
    let words: Vec<&str> = payload.split_whitespace().collect();
    if !words.is_empty() && words.iter().all(|w| w.contains('=')) {
        let mut mapping = BTreeMap::new();
        for word in words {
            match word.split_once('=') {
                Some((k, v)) if !k.is_empty() && !v.is_empty() => {
                    mapping.insert(k.to_string(), v.to_string());
                }
                _ => {
                    return Err(BatchError::MalformedMapping {
                        entry: word.to_string(),
                    });
                }
            }
        }
        return Ok(GenerationRequest::Mapping(mapping));
    }
    Ok(GenerationRequest::BagOfTerms(
        words.into_iter().map(str::to_string).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn projects() -> BTreeSet<String> {
        ["cmip6plus".to_string(), "cmip6".to_string()]
            .into_iter()
            .collect()
    }

    #[test]
    fn context_switches_apply_to_following_payloads() {
        let entries = [
            "cmip6plus",
            "dataset",
            "a.b",
            "c.d",
            "filename",
            "x_y.nc",
            "cmip6",
            "directory",
            "p/q",
        ];
        let items = parse_entries(&entries, &projects()).unwrap();
        let summary: Vec<(&str, DrsType, &str)> = items
            .iter()
            .map(|i| (i.project_id.as_str(), i.drs_type, i.payload.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("cmip6plus", DrsType::DatasetId, "a.b"),
                ("cmip6plus", DrsType::DatasetId, "c.d"),
                ("cmip6plus", DrsType::FileName, "x_y.nc"),
                ("cmip6", DrsType::Directory, "p/q"),
            ]
        );
    }

    #[test]
    fn payloads_keep_surrounding_whitespace() {
        let items = parse_entries(&[" cmip6plus ", "dataset", " a.b "], &projects()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].project_id, "cmip6plus");
        assert_eq!(items[0].payload, " a.b ");
    }

    #[test]
    fn payload_without_context_is_rejected() {
        assert_eq!(
            parse_entries(&["a.b"], &projects()).unwrap_err(),
            BatchError::MissingProject {
                entry: "a.b".into()
            }
        );
        assert_eq!(
            parse_entries(&["cmip6", "a.b"], &projects()).unwrap_err(),
            BatchError::MissingDrsType {
                entry: "a.b".into()
            }
        );
    }

    #[test]
    fn generation_lines_keep_bags_together() {
        let text = "cmip6plus dataset CMIP6Plus CMIP IPSL\nUA IPSL\n\n";
        assert_eq!(
            generation_entries(text, &projects()),
            vec!["cmip6plus", "dataset", "CMIP6Plus CMIP IPSL", "UA IPSL"]
        );
    }

    #[test]
    fn mapping_versus_bag() {
        assert_eq!(
            generation_request("a=1 b=2").unwrap(),
            GenerationRequest::Mapping(
                [("a".to_string(), "1".to_string()), ("b".to_string(), "2".to_string())]
                    .into_iter()
                    .collect()
            )
        );
        assert_eq!(
            generation_request("a=1 tas").unwrap(),
            GenerationRequest::BagOfTerms(
                ["a=1".to_string(), "tas".to_string()].into_iter().collect()
            )
        );
        assert!(generation_request("a= b=2").is_err());
    }
}
