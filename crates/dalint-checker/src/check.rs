//! Per-file orchestration: split, load, classify, check keys and content,
//! validate field scopes, and collect every finding.

use crate::loader::{load_fragment, LoadError, LoadOutcome, ParsedBlock};
use crate::split::{split_documents, Fragment};
use crate::sublang::validator_for;
use crate::{classify, fields, schema};
use dalint_types::ValidationError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A failure that prevents a file from being checked at all.
///
/// Findings *within* a file are never errors of this kind; they come back
/// in the [`ValidationError`] list.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Check one file on disk.
pub fn check_file(path: &Path) -> Result<Vec<ValidationError>, CheckError> {
    let content = std::fs::read_to_string(path).map_err(|source| CheckError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(check_source(&content, &path.display().to_string()))
}

/// Check one file's content, returning findings sorted by line.
///
/// Re-running on unchanged content yields an identical list; no state is
/// kept between calls.
#[must_use]
pub fn check_source(content: &str, file: &str) -> Vec<ValidationError> {
    // The jinja preprocessor directive switches the whole file to a
    // different parsing dialect; nothing here applies to it.
    if content.lines().next() == Some("# use jinja") {
        tracing::debug!(file, "jinja preprocessor directive, skipping");
        return Vec::new();
    }

    let mut errors = Vec::new();
    for fragment in split_documents(content) {
        check_fragment(&fragment, file, &mut errors);
    }

    // Findings are mostly appended in line order already; the sort is
    // stable so same-line findings keep their discovery order.
    errors.sort_by_key(|e| e.line);
    tracing::debug!(file, count = errors.len(), "checked");
    errors
}

fn check_fragment(fragment: &Fragment, file: &str, errors: &mut Vec<ValidationError>) {
    match load_fragment(&fragment.text) {
        Err(LoadError::DuplicateKey { key, line }) => {
            errors.push(ValidationError::real(
                format!("found duplicate key \"{key}\" in mapping"),
                fragment.line_offset + line - 1,
                file,
            ));
        }
        Err(LoadError::Scan(scan)) => {
            let line = fragment.line_offset + scan.marker().line().saturating_sub(1);
            errors.push(ValidationError::real(
                format!("invalid YAML: {scan}"),
                line,
                file,
            ));
        }
        Ok(LoadOutcome::Empty) => {}
        Ok(LoadOutcome::NotAMapping { .. }) => {
            errors.push(ValidationError::heuristic(
                "top-level document must be a mapping of block keys",
                fragment.line_offset,
                file,
            ));
        }
        Ok(LoadOutcome::Block(block)) => check_block(&block, fragment, file, errors),
    }
}

fn check_block(
    block: &ParsedBlock,
    fragment: &Fragment,
    file: &str,
    errors: &mut Vec<ValidationError>,
) {
    for finding in classify::resolve(block) {
        errors.push(ValidationError::heuristic(
            finding.message(),
            fragment.line_offset,
            file,
        ));
    }

    check_unknown_keys(block, fragment, file, errors);

    for (key, value) in &block.entries {
        let Some(name) = key.as_str() else { continue };
        let Some(kind) = schema::content_kind(name) else {
            continue;
        };
        for sub in validator_for(kind).validate(value) {
            errors.push(ValidationError::heuristic(
                sub.message,
                sub.line + block.start_line + fragment.line_offset,
                file,
            ));
        }
    }

    if let Some(fields_value) = block.get("fields") {
        errors.extend(fields::validate_field_list(
            block,
            fields_value,
            fragment.line_offset,
            file,
        ));
    }
}

/// All unknown keys of a block are collected into a single error.
fn check_unknown_keys(
    block: &ParsedBlock,
    fragment: &Fragment,
    file: &str,
    errors: &mut Vec<ValidationError>,
) {
    let mut unknown = Vec::new();
    for (key, _) in &block.entries {
        match key.as_str() {
            Some(name) => {
                if !schema::is_recognized_key(name) {
                    unknown.push(name.to_string());
                }
            }
            // Non-string keys never appear in interview files.
            None => unknown.push(key.key_display()),
        }
    }
    if unknown.is_empty() {
        return;
    }

    let rendered: Vec<String> = unknown
        .iter()
        .map(|key| match schema::closest_recognized_key(key) {
            Some(suggestion) => format!("\"{key}\" (did you mean \"{suggestion}\"?)"),
            None => format!("\"{key}\""),
        })
        .collect();
    errors.push(ValidationError::real(
        format!("unrecognized keys in block: {}", rendered.join(", ")),
        fragment.line_offset,
        file,
    ));
}
