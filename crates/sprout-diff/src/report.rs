//! Human-readable rendering of parsed diffs

use super::types::ParseResult;

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// List each deleted and added line beneath its file
    pub show_lines: bool,
}

/// Render the summary line followed by one line per changed file.
pub fn render_report(result: &ParseResult, options: RenderOptions) -> String {
    let mut report = result.summary();
    report.push('\n');

    for file_change in result {
        report.push_str(&format!(
            "  {}  {}\n",
            file_change.file_path(),
            file_change.change_summary()
        ));

        if options.show_lines {
            for line in file_change.deletions() {
                report.push_str(&format!("    - {}\n", line));
            }
            for line in file_change.additions() {
                report.push_str(&format!("    + {}\n", line));
            }
        }
    }

    report
}
