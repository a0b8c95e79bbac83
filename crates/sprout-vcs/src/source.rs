/// Anything that can hand over unified diff text for parsing.
///
/// Implementations degrade to an empty string on recoverable failures; a
/// source with nothing to report also returns an empty string.
pub trait ChangeSource {
    fn get_diff_text(&self) -> String;
}

/// Diff text captured elsewhere, e.g. piped in on stdin
impl ChangeSource for String {
    fn get_diff_text(&self) -> String {
        self.clone()
    }
}

impl ChangeSource for str {
    fn get_diff_text(&self) -> String {
        self.to_string()
    }
}
