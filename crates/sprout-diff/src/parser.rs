//! Segmentation of unified diff text into per-file change records

use super::types::{FileChange, ParseResult};
use regex::Regex;
use std::sync::LazyLock;

/// Every file section after the first starts on a fresh line with this token
const SECTION_MARKER: &str = "\ndiff --git";

/// `a/<path>` followed by whitespace and `b/`, as in the `diff --git` header
static HEADER_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"a/(.*?)\s+b/").expect("header path pattern is valid"));

/// `+++ b/<path>` marker line
static MARKER_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\+\+\+ b/(.*)$").expect("marker path pattern is valid"));

/// Parse unified diff text into one [`FileChange`] per file section.
///
/// Never fails: sections without a recognizable path are skipped, and empty
/// or whitespace-only input yields an empty result.
pub fn parse(diff_text: &str) -> ParseResult {
    if diff_text.trim().is_empty() {
        return ParseResult::default();
    }

    let files = diff_text
        .split(SECTION_MARKER)
        .filter(|section| !section.trim().is_empty())
        .filter_map(parse_section)
        .collect();

    ParseResult::new(files)
}

/// One-line overview of a diff, e.g. `2 file(s) changed: 3 addition(s), 1 deletion(s)`.
pub fn summarize(diff_text: &str) -> String {
    parse(diff_text).summary()
}

/// The path comes from the trimmed section; lines are classified untrimmed so
/// a leading context line keeps its space prefix.
fn parse_section(section: &str) -> Option<FileChange> {
    let file_path = extract_file_path(section.trim())?;
    let (additions, deletions) = extract_changes(section);
    Some(FileChange::new(file_path, additions, deletions))
}

/// Header line first, then the `+++ b/` marker; `None` when neither yields a path.
pub fn extract_file_path(section: &str) -> Option<String> {
    let from_header = HEADER_PATH_RE
        .captures(section)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());

    let path = from_header.or_else(|| {
        MARKER_PATH_RE
            .captures(section)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
    })?;

    if path.is_empty() {
        None
    } else {
        Some(path)
    }
}

/// Split a section's body lines into (additions, deletions).
pub fn extract_changes(section: &str) -> (Vec<String>, Vec<String>) {
    let mut additions = Vec::new();
    let mut deletions = Vec::new();

    for line in section.split('\n') {
        // File markers and hunk headers are not content
        if line.starts_with("+++") || line.starts_with("---") || line.starts_with("@@") {
            continue;
        }

        if let Some(added) = line.strip_prefix('+') {
            additions.push(added.trim().to_string());
        } else if let Some(removed) = line.strip_prefix('-') {
            deletions.push(removed.trim().to_string());
        }
    }

    (additions, deletions)
}
