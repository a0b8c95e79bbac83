//! Git change source for sprout
//!
//! Opens a repository, hands out unified diff text for staged and unstaged
//! changes, lists changed files and stages work. Parsing the diff text is
//! left to `sprout-diff`.

mod error;
mod handler;
mod source;

pub use error::{VcsError, VcsResult};
pub use handler::{GitHandler, RepositoryInfo, DEFAULT_CONTEXT_LINES};
pub use source::ChangeSource;

#[cfg(test)]
mod tests;
