//! Line-oriented rewrite of the managed Spring properties file.
//!
//! The contract with the file is deliberately narrow: read one key's value
//! if present, and replace or append that one key while preserving every
//! other line byte-for-byte and in original order. The rewrite is an
//! explicit line transformation (split, filter, locate anchor, splice)
//! rather than whole-file regex surgery, so the preservation invariant is
//! easy to verify.

use std::fs;
use std::path::Path;

use crate::{AppError, Result};

/// Properties key holding the MongoDB connection URI.
pub const URI_KEY: &str = "spring.data.mongodb.uri";

/// Anchor comment the URI line is inserted after when present.
pub const MARKER_COMMENT: &str = "# MongoDB configuration";

/// Required scheme prefix for replacement URIs.
pub const URI_SCHEME: &str = "mongodb+srv://";

/// Validate a candidate replacement URI.
///
/// # Errors
///
/// Returns `AppError::Properties` when the candidate does not start with
/// the `mongodb+srv://` scheme.
pub fn validate_uri(candidate: &str) -> Result<()> {
    if candidate.starts_with(URI_SCHEME) {
        Ok(())
    } else {
        Err(AppError::Properties(format!(
            "URI must start with {URI_SCHEME}"
        )))
    }
}

/// Extract the current URI value from file contents, if the key is present.
#[must_use]
pub fn extract_uri(contents: &str) -> Option<&str> {
    let prefix = key_prefix();
    contents
        .lines()
        .find_map(|line| line.strip_prefix(prefix.as_str()))
        .map(str::trim)
}

/// Read the current URI value from the properties file.
///
/// A missing file reads as "no value"; the start flow treats that the same
/// as a file without the key.
///
/// # Errors
///
/// Returns `AppError::Properties` if the file exists but cannot be read.
pub fn current_uri(path: impl AsRef<Path>) -> Result<Option<String>> {
    let path = path.as_ref();
    if !path.is_file() {
        return Ok(None);
    }
    let contents = fs::read_to_string(path).map_err(|err| {
        AppError::Properties(format!("cannot read {}: {err}", path.display()))
    })?;
    Ok(extract_uri(&contents).map(str::to_owned))
}

/// Rewrite the URI line within `contents`, returning the new file body.
///
/// Any existing line for the key is removed. The replacement line is
/// inserted immediately after the marker comment when one exists, else the
/// marker and the line are appended at end of file. All other lines keep
/// their exact bytes, line endings included.
#[must_use]
pub fn splice_uri(contents: &str, new_uri: &str) -> String {
    let prefix = key_prefix();
    let mut lines: Vec<String> = contents
        .split_inclusive('\n')
        .filter(|segment| !segment.starts_with(prefix.as_str()))
        .map(str::to_owned)
        .collect();

    let new_line = format!("{URI_KEY}={new_uri}\n");

    let marker_at = lines
        .iter()
        .position(|segment| segment.trim() == MARKER_COMMENT);

    if let Some(index) = marker_at {
        ensure_newline(&mut lines[index]);
        lines.insert(index + 1, new_line);
    } else {
        if let Some(last) = lines.last_mut() {
            ensure_newline(last);
        }
        lines.push(format!("{MARKER_COMMENT}\n"));
        lines.push(new_line);
    }

    lines.concat()
}

/// Validate `new_uri` and rewrite the properties file in place.
///
/// # Errors
///
/// Returns `AppError::Properties` if the URI fails validation, the file is
/// missing, or it cannot be read or written. On any error the file is left
/// untouched.
pub fn update_uri(path: impl AsRef<Path>, new_uri: &str) -> Result<()> {
    validate_uri(new_uri)?;

    let path = path.as_ref();
    if !path.is_file() {
        return Err(AppError::Properties(format!(
            "properties file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|err| {
        AppError::Properties(format!("cannot read {}: {err}", path.display()))
    })?;
    let updated = splice_uri(&contents, new_uri);
    fs::write(path, updated).map_err(|err| {
        AppError::Properties(format!("cannot write {}: {err}", path.display()))
    })?;

    Ok(())
}

fn key_prefix() -> String {
    format!("{URI_KEY}=")
}

fn ensure_newline(segment: &mut String) {
    if !segment.ends_with('\n') {
        segment.push('\n');
    }
}
