//! Type definitions for diff parsing

use serde::ser::{Serialize, SerializeStruct, Serializer};

/// All added and deleted lines within one file section of a diff.
///
/// Counts and the `+A, -D` summary are derived from the line lists, so they
/// can never disagree with them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    file_path: String,
    additions: Vec<String>,
    deletions: Vec<String>,
}

impl FileChange {
    pub fn new(file_path: String, additions: Vec<String>, deletions: Vec<String>) -> Self {
        Self {
            file_path,
            additions,
            deletions,
        }
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    /// Added lines, marker stripped and trimmed, in diff order
    pub fn additions(&self) -> &[String] {
        &self.additions
    }

    /// Deleted lines, marker stripped and trimmed, in diff order
    pub fn deletions(&self) -> &[String] {
        &self.deletions
    }

    pub fn addition_count(&self) -> usize {
        self.additions.len()
    }

    pub fn deletion_count(&self) -> usize {
        self.deletions.len()
    }

    /// `+{additions}, -{deletions}`
    pub fn change_summary(&self) -> String {
        format!("+{}, -{}", self.addition_count(), self.deletion_count())
    }
}

impl Serialize for FileChange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FileChange", 6)?;
        state.serialize_field("file_path", &self.file_path)?;
        state.serialize_field("additions", &self.additions)?;
        state.serialize_field("deletions", &self.deletions)?;
        state.serialize_field("addition_count", &self.addition_count())?;
        state.serialize_field("deletion_count", &self.deletion_count())?;
        state.serialize_field("change_summary", &self.change_summary())?;
        state.end()
    }
}

/// File changes in the order their sections appeared in the diff
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct ParseResult {
    files: Vec<FileChange>,
}

impl ParseResult {
    pub fn new(files: Vec<FileChange>) -> Self {
        Self { files }
    }

    pub fn files(&self) -> &[FileChange] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileChange> {
        self.files.iter()
    }

    pub fn total_additions(&self) -> usize {
        self.files.iter().map(FileChange::addition_count).sum()
    }

    pub fn total_deletions(&self) -> usize {
        self.files.iter().map(FileChange::deletion_count).sum()
    }

    /// One-line overview, or `No changes detected` for an empty result
    pub fn summary(&self) -> String {
        if self.is_empty() {
            return NO_CHANGES.to_string();
        }
        format!(
            "{} file(s) changed: {} addition(s), {} deletion(s)",
            self.len(),
            self.total_additions(),
            self.total_deletions()
        )
    }
}

pub(crate) const NO_CHANGES: &str = "No changes detected";

impl IntoIterator for ParseResult {
    type Item = FileChange;
    type IntoIter = std::vec::IntoIter<FileChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParseResult {
    type Item = &'a FileChange;
    type IntoIter = std::slice::Iter<'a, FileChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}
