//! Structural pass: whitespace, extension, separators and blank tokens.
//!
//! Produces the token sequence used for alignment. Empty and blank tokens are
//! reported here and withdrawn, so they never consume a schema slot.

use crate::sink::IssueSink;
use crate::tokenizer::tokenize_at;
use drskit_types::{DrsSpecification, DrsType, Token, ValidationIssue};
use tracing::debug;

pub(crate) fn parse_expression(
    expression: &str,
    spec: &DrsSpecification,
    sink: &mut IssueSink<ValidationIssue>,
) -> Option<Vec<Token>> {
    let leading = expression.chars().take_while(|c| c.is_whitespace()).count();
    let trimmed = expression.trim();
    if trimmed.len() != expression.len() {
        sink.warning(ValidationIssue::Space);
    }

    let mut body = trimmed;
    if let Some(extension) = &spec.extension {
        let full = extension.full();
        match body.strip_suffix(full.as_str()) {
            Some(rest) => body = rest,
            None => sink.warning(ValidationIssue::FileNameExtension { expected: full }),
        }
    }

    let mut tokens = tokenize_at(body, spec.separator, leading);
    if tokens.len() < 2 {
        sink.error(ValidationIssue::Unparsable {
            expected: spec.drs_type,
        });
        return None;
    }

    // Trailing run of empty/blank tokens is one issue, located at the
    // separator that opens the run.
    let keep = tokens
        .iter()
        .rposition(|t| !t.is_void())
        .map_or(0, |i| i + 1);
    let trailing = if keep < tokens.len() {
        let dropped = tokens.split_off(keep);
        let column = dropped[0].start.saturating_sub(1);
        let has_blank = dropped.iter().any(Token::is_blank);
        debug!(column, dropped = dropped.len(), "trailing separators");
        Some((column, spec.drs_type == DrsType::Directory && !has_blank))
    } else {
        None
    };

    let is_directory = spec.drs_type == DrsType::Directory;
    for (index, token) in tokens.iter().enumerate() {
        if token.is_empty() {
            let issue = ValidationIssue::ExtraSeparator {
                column: token.start,
            };
            if is_directory && index != 0 {
                sink.warning(issue);
            } else {
                sink.error(issue);
            }
        } else if token.is_blank() {
            sink.error(ValidationIssue::BlankTerm {
                column: token.start,
            });
        }
    }

    match trailing {
        Some((column, true)) => sink.warning(ValidationIssue::ExtraSeparator { column }),
        Some((column, false)) => sink.error(ValidationIssue::ExtraChar { column }),
        None => {}
    }

    let aligned: Vec<Token> = tokens.into_iter().filter(|t| !t.is_void()).collect();
    if aligned.is_empty() {
        sink.error(ValidationIssue::Unparsable {
            expected: spec.drs_type,
        });
        return None;
    }
    Some(aligned)
}
