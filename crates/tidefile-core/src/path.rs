//! Canonical slash-delimited path helpers.
//!
//! A canonical path is a slash-joined sequence of non-empty segments with
//! no leading or trailing slash. The root is the empty string.

use compact_str::CompactString;

use crate::error::TreeError;

/// Split a canonical path into its segments. The root path yields nothing.
pub fn split(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Join a directory path and a final segment.
///
/// Joining onto the root path returns the segment alone, so no canonical
/// path ever starts with a slash.
pub fn join(directory: &str, name: &str) -> CompactString {
    if directory.is_empty() {
        CompactString::from(name)
    } else {
        compact_str::format_compact!("{directory}/{name}")
    }
}

/// Final segment of a path ("foo/bar/baz" -> "baz").
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Path minus its final segment ("foo/bar/baz" -> "foo/bar").
pub fn directory(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// Extension of the final segment, without the dot.
pub fn extension(path: &str) -> Option<&str> {
    let name = file_name(path);
    match name.rfind('.') {
        Some(idx) if idx > 0 => Some(&name[idx + 1..]),
        _ => None,
    }
}

/// Validate a single sibling name: non-empty and slash-free.
pub fn validate_name(name: &str) -> Result<(), TreeError> {
    if name.is_empty() || name.contains('/') {
        return Err(TreeError::invalid_name(name));
    }
    Ok(())
}

/// Parse a record path into segments, rejecting non-canonical forms.
///
/// Empty paths, leading/trailing slashes, and empty interior segments are
/// all malformed: remote records always name a file, never the root.
pub fn parse(path: &str) -> Result<Vec<&str>, TreeError> {
    if path.is_empty() {
        return Err(TreeError::malformed("empty path"));
    }
    let segments: Vec<&str> = path.split('/').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(TreeError::malformed(format!(
            "empty segment in {path:?}"
        )));
    }
    Ok(segments)
}
