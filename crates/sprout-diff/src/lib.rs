//! Unified diff parsing for change summaries
//!
//! Splits `git diff` output into file sections, pulls out each file's path
//! and collects its added and deleted lines. Everything here is a pure
//! function of the input text: no I/O, no shared state.

mod parser;
mod report;
mod types;

pub use parser::{extract_changes, extract_file_path, parse, summarize};
pub use report::{render_report, RenderOptions};
pub use types::{FileChange, ParseResult};
