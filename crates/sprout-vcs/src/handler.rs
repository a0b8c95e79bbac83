//! Git working-tree access through libgit2

use crate::error::{VcsError, VcsResult};
use crate::source::ChangeSource;
use chrono::DateTime;
use git2::{
    Diff, DiffFormat, DiffOptions, ErrorCode, IndexAddOption, Repository, StatusOptions,
};
use serde::Serialize;
use sprout_core::{DiffConfig, DiffScope};
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Same as `git diff --unified=3`
pub const DEFAULT_CONTEXT_LINES: u32 = 3;

/// Basic facts about an opened repository
#[derive(Debug, Clone, Serialize)]
pub struct RepositoryInfo {
    pub path: String,
    pub branch: String,
    pub has_changes: bool,
    pub total_commits: usize,
    /// Time of the HEAD commit, `None` before the first commit
    pub last_commit: Option<String>,
}

pub struct GitHandler {
    repo: Repository,
    workdir: PathBuf,
    scope: DiffScope,
    context_lines: u32,
}

impl GitHandler {
    /// Open the repository containing `path`, searching parent directories.
    pub fn open<P: AsRef<Path>>(path: P) -> VcsResult<Self> {
        let path = path.as_ref();
        let repo = Repository::discover(path).map_err(|e| {
            if e.code() == ErrorCode::NotFound {
                VcsError::NotARepository(path.display().to_string())
            } else {
                VcsError::Git(e)
            }
        })?;

        let Some(workdir) = repo.workdir().map(Path::to_path_buf) else {
            return Err(VcsError::BareRepository(repo.path().display().to_string()));
        };

        tracing::info!("Loaded repository: {}", workdir.display());

        Ok(Self {
            repo,
            workdir,
            scope: DiffScope::default(),
            context_lines: DEFAULT_CONTEXT_LINES,
        })
    }

    /// Open with the scope and context size from a `[diff]` config section
    pub fn open_with_config<P: AsRef<Path>>(path: P, config: &DiffConfig) -> VcsResult<Self> {
        Ok(Self::open(path)?
            .with_scope(config.scope)
            .with_context_lines(config.context_lines))
    }

    /// Which changes [`ChangeSource::get_diff_text`] reports
    pub fn with_scope(mut self, scope: DiffScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_context_lines(mut self, context_lines: u32) -> Self {
        self.context_lines = context_lines;
        self
    }

    pub fn scope(&self) -> DiffScope {
        self.scope
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// True when anything is staged, modified or untracked
    pub fn is_dirty(&self) -> VcsResult<bool> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true).include_ignored(false);
        let statuses = self.repo.statuses(Some(&mut opts))?;
        Ok(!statuses.is_empty())
    }

    /// Patch text of HEAD vs index (`git diff --cached`)
    pub fn staged_diff(&self) -> VcsResult<String> {
        diff_to_text(&self.staged_changes()?)
    }

    /// Patch text of index vs working tree (`git diff`)
    pub fn unstaged_diff(&self) -> VcsResult<String> {
        diff_to_text(&self.unstaged_changes()?)
    }

    /// Staged patch followed by the unstaged one
    pub fn all_diff(&self) -> VcsResult<String> {
        let staged = self.staged_diff()?;
        let unstaged = self.unstaged_diff()?;

        if !staged.is_empty() && !unstaged.is_empty() {
            return Ok(format!("{}\n\n{}", staged, unstaged));
        }
        Ok(if staged.is_empty() { unstaged } else { staged })
    }

    pub fn diff(&self, scope: DiffScope) -> VcsResult<String> {
        match scope {
            DiffScope::Staged => self.staged_diff(),
            DiffScope::Unstaged => self.unstaged_diff(),
            DiffScope::All => self.all_diff(),
        }
    }

    /// Staged, unstaged and untracked paths, sorted and without duplicates
    pub fn changed_files(&self) -> VcsResult<Vec<String>> {
        let mut files = BTreeSet::new();

        for diff in [self.staged_changes()?, self.unstaged_changes()?] {
            for delta in diff.deltas() {
                let path = delta.new_file().path().or_else(|| delta.old_file().path());
                if let Some(path) = path {
                    files.insert(path.to_string_lossy().into_owned());
                }
            }
        }

        let mut opts = StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);
        for entry in self.repo.statuses(Some(&mut opts))?.iter() {
            if entry.status().is_wt_new() {
                if let Some(path) = entry.path() {
                    files.insert(path.to_string());
                }
            }
        }

        Ok(files.into_iter().collect())
    }

    /// Text content of a working-tree file.
    ///
    /// `None` when the file is missing or not valid UTF-8.
    pub fn file_content(&self, file_path: &str) -> Option<String> {
        let full_path = self.workdir.join(file_path);

        let bytes = match fs::read(&full_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!("File not found: {}", file_path);
                return None;
            }
            Err(e) => {
                tracing::warn!("Cannot read {}: {}", file_path, e);
                return None;
            }
        };

        match String::from_utf8(bytes) {
            Ok(content) => Some(content),
            Err(_) => {
                tracing::warn!("Cannot read binary file: {}", file_path);
                None
            }
        }
    }

    /// Stage every change, including new and deleted files (`git add --all`)
    pub fn stage_all(&self) -> VcsResult<()> {
        let mut index = self.repo.index()?;
        index.add_all(["*"], IndexAddOption::DEFAULT, None)?;
        index.update_all(["*"], None)?;
        index.write()?;
        tracing::info!("All changes staged");
        Ok(())
    }

    pub fn repository_info(&self) -> VcsResult<RepositoryInfo> {
        let head_commit = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let last_commit = head_commit.as_ref().and_then(|commit| {
            DateTime::from_timestamp(commit.time().seconds(), 0)
                .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        });

        Ok(RepositoryInfo {
            path: self.workdir.display().to_string(),
            branch: self.current_branch()?,
            has_changes: self.is_dirty()?,
            total_commits: self.count_commits()?,
            last_commit,
        })
    }

    fn current_branch(&self) -> VcsResult<String> {
        match self.repo.head() {
            Ok(head) => Ok(head.shorthand().unwrap_or("HEAD").to_string()),
            Err(e) if e.code() == ErrorCode::UnbornBranch => {
                // No commits yet: HEAD still names the branch to be born
                let head = self.repo.find_reference("HEAD")?;
                let target = head.symbolic_target().unwrap_or("HEAD");
                Ok(target.trim_start_matches("refs/heads/").to_string())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn count_commits(&self) -> VcsResult<usize> {
        if self.repo.head().is_err() {
            return Ok(0);
        }
        let mut walk = self.repo.revwalk()?;
        walk.push_head()?;
        Ok(walk.count())
    }

    fn diff_options(&self) -> DiffOptions {
        let mut opts = DiffOptions::new();
        opts.context_lines(self.context_lines);
        opts
    }

    fn staged_changes(&self) -> VcsResult<Diff<'_>> {
        // An unborn HEAD diffs against the empty tree
        let head_tree = self.repo.head().ok().and_then(|h| h.peel_to_tree().ok());
        let mut opts = self.diff_options();
        Ok(self
            .repo
            .diff_tree_to_index(head_tree.as_ref(), None, Some(&mut opts))?)
    }

    fn unstaged_changes(&self) -> VcsResult<Diff<'_>> {
        let mut opts = self.diff_options();
        Ok(self.repo.diff_index_to_workdir(None, Some(&mut opts))?)
    }
}

impl ChangeSource for GitHandler {
    fn get_diff_text(&self) -> String {
        match self.diff(self.scope) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Error getting {} changes: {}", self.scope.as_str(), e);
                String::new()
            }
        }
    }
}

/// Render a libgit2 diff as `git diff` style patch text
fn diff_to_text(diff: &Diff<'_>) -> VcsResult<String> {
    let mut text = String::new();
    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        if matches!(line.origin(), '+' | '-' | ' ') {
            text.push(line.origin());
        }
        text.push_str(&String::from_utf8_lossy(line.content()));
        true
    })?;
    Ok(text)
}
