use super::*;
use git2::{Repository, Signature};
use sprout_core::{DiffConfig, DiffScope};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const INITIAL: &str = "line one\nline two\n";

fn commit_index(repo: &Repository, message: &str) {
    let mut index = repo.index().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let sig = Signature::now("Test", "test@example.com").unwrap();

    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap();
}

fn stage(repo: &Repository, path: &str) {
    let mut index = repo.index().unwrap();
    index.add_path(Path::new(path)).unwrap();
    index.write().unwrap();
}

/// Repository with `hello.txt` committed once
fn create_test_repo() -> (TempDir, Repository) {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    fs::write(dir.path().join("hello.txt"), INITIAL).unwrap();
    stage(&repo, "hello.txt");
    commit_index(&repo, "initial");
    (dir, repo)
}

#[test]
fn test_open_outside_repository() {
    let dir = TempDir::new().unwrap();
    let err = GitHandler::open(dir.path()).err().unwrap();
    assert!(matches!(err, VcsError::NotARepository(_)));
    assert!(err.to_string().contains("Not a git repository"));
}

#[test]
fn test_open_discovers_parent_repository() {
    let (dir, _repo) = create_test_repo();
    let nested = dir.path().join("src").join("deep");
    fs::create_dir_all(&nested).unwrap();

    let handler = GitHandler::open(&nested).unwrap();
    assert_eq!(
        fs::canonicalize(handler.workdir()).unwrap(),
        fs::canonicalize(dir.path()).unwrap()
    );
}

#[test]
fn test_clean_repository_has_no_changes() {
    let (dir, _repo) = create_test_repo();
    let handler = GitHandler::open(dir.path()).unwrap();

    assert!(!handler.is_dirty().unwrap());
    assert_eq!(handler.staged_diff().unwrap(), "");
    assert_eq!(handler.unstaged_diff().unwrap(), "");
    assert_eq!(handler.all_diff().unwrap(), "");
    assert!(handler.changed_files().unwrap().is_empty());
    assert_eq!(
        sprout_diff::summarize(&handler.get_diff_text()),
        "No changes detected"
    );
}

#[test]
fn test_unstaged_modification() {
    let (dir, _repo) = create_test_repo();
    fs::write(dir.path().join("hello.txt"), "line one\nline 2\nline three\n").unwrap();

    let handler = GitHandler::open(dir.path()).unwrap();
    assert!(handler.is_dirty().unwrap());
    assert_eq!(handler.staged_diff().unwrap(), "");

    let diff = handler.unstaged_diff().unwrap();
    assert!(diff.starts_with("diff --git a/hello.txt b/hello.txt"));

    let result = sprout_diff::parse(&diff);
    assert_eq!(result.len(), 1);
    let file_change = &result.files()[0];
    assert_eq!(file_change.file_path(), "hello.txt");
    assert_eq!(file_change.additions(), ["line 2", "line three"]);
    assert_eq!(file_change.deletions(), ["line two"]);
    assert_eq!(file_change.change_summary(), "+2, -1");
}

#[test]
fn test_staged_new_file() {
    let (dir, repo) = create_test_repo();
    fs::write(dir.path().join("new.txt"), "fresh\n").unwrap();
    stage(&repo, "new.txt");

    let handler = GitHandler::open(dir.path()).unwrap();
    assert_eq!(handler.unstaged_diff().unwrap(), "");

    let result = sprout_diff::parse(&handler.staged_diff().unwrap());
    assert_eq!(result.len(), 1);
    assert_eq!(result.files()[0].file_path(), "new.txt");
    assert_eq!(result.files()[0].additions(), ["fresh"]);
    assert_eq!(result.files()[0].deletion_count(), 0);
}

#[test]
fn test_all_diff_puts_staged_first() {
    let (dir, repo) = create_test_repo();
    fs::write(dir.path().join("new.txt"), "fresh\n").unwrap();
    stage(&repo, "new.txt");
    fs::write(dir.path().join("hello.txt"), "line one\n").unwrap();

    let handler = GitHandler::open(dir.path()).unwrap();
    let result = sprout_diff::parse(&handler.all_diff().unwrap());

    assert_eq!(result.len(), 2);
    assert_eq!(result.files()[0].file_path(), "new.txt");
    assert_eq!(result.files()[1].file_path(), "hello.txt");
    assert_eq!(result.files()[1].deletions(), ["line two"]);
    assert_eq!(
        result.summary(),
        "2 file(s) changed: 1 addition(s), 1 deletion(s)"
    );
}

#[test]
fn test_scope_selects_diff_text() {
    let (dir, _repo) = create_test_repo();
    fs::write(dir.path().join("hello.txt"), "changed\n").unwrap();

    let staged = GitHandler::open(dir.path())
        .unwrap()
        .with_scope(DiffScope::Staged);
    assert_eq!(staged.get_diff_text(), "");

    let config = DiffConfig {
        scope: DiffScope::Unstaged,
        ..DiffConfig::default()
    };
    let unstaged = GitHandler::open_with_config(dir.path(), &config).unwrap();
    assert_eq!(unstaged.scope(), DiffScope::Unstaged);
    assert_eq!(sprout_diff::parse(&unstaged.get_diff_text()).len(), 1);
}

#[test]
fn test_context_lines() {
    let (dir, _repo) = create_test_repo();
    fs::write(dir.path().join("hello.txt"), "line one\nline 2\n").unwrap();

    let handler = GitHandler::open(dir.path()).unwrap().with_context_lines(0);
    let diff = handler.unstaged_diff().unwrap();
    assert!(!diff.contains("\n line one"));

    let handler = GitHandler::open(dir.path()).unwrap();
    let diff = handler.unstaged_diff().unwrap();
    assert!(diff.contains("\n line one"));
}

#[test]
fn test_changed_files_include_untracked() {
    let (dir, repo) = create_test_repo();
    fs::write(dir.path().join("new.txt"), "fresh\n").unwrap();
    stage(&repo, "new.txt");
    fs::write(dir.path().join("new.txt"), "fresh\nand edited\n").unwrap();
    fs::write(dir.path().join("hello.txt"), "rewritten\n").unwrap();
    fs::create_dir_all(dir.path().join("notes")).unwrap();
    fs::write(dir.path().join("notes").join("todo.txt"), "todo\n").unwrap();

    let handler = GitHandler::open(dir.path()).unwrap();
    assert_eq!(
        handler.changed_files().unwrap(),
        ["hello.txt", "new.txt", "notes/todo.txt"]
    );
}

#[test]
fn test_file_content() {
    let (dir, _repo) = create_test_repo();
    fs::write(dir.path().join("blob.bin"), [0xff, 0xfe, 0x00, 0x80]).unwrap();

    let handler = GitHandler::open(dir.path()).unwrap();
    assert_eq!(handler.file_content("hello.txt").as_deref(), Some(INITIAL));
    assert_eq!(handler.file_content("missing.txt"), None);
    assert_eq!(handler.file_content("blob.bin"), None);
}

#[test]
fn test_stage_all() {
    let (dir, _repo) = create_test_repo();
    fs::write(dir.path().join("untracked.txt"), "brand new\n").unwrap();
    fs::write(dir.path().join("hello.txt"), "line one\n").unwrap();

    let handler = GitHandler::open(dir.path()).unwrap();
    handler.stage_all().unwrap();

    assert_eq!(handler.unstaged_diff().unwrap(), "");
    let result = sprout_diff::parse(&handler.staged_diff().unwrap());
    let paths: Vec<&str> = result.iter().map(|f| f.file_path()).collect();
    assert_eq!(paths, ["hello.txt", "untracked.txt"]);
}

#[test]
fn test_stage_all_records_deletions() {
    let (dir, _repo) = create_test_repo();
    fs::remove_file(dir.path().join("hello.txt")).unwrap();

    let handler = GitHandler::open(dir.path()).unwrap();
    handler.stage_all().unwrap();

    let result = sprout_diff::parse(&handler.staged_diff().unwrap());
    assert_eq!(result.len(), 1);
    assert_eq!(result.files()[0].file_path(), "hello.txt");
    assert_eq!(result.files()[0].deletions(), ["line one", "line two"]);
}

#[test]
fn test_repository_info() {
    let (dir, repo) = create_test_repo();
    fs::write(dir.path().join("hello.txt"), "second\n").unwrap();
    stage(&repo, "hello.txt");
    commit_index(&repo, "second");

    let handler = GitHandler::open(dir.path()).unwrap();
    let info = handler.repository_info().unwrap();

    assert!(!info.branch.is_empty());
    assert!(!info.has_changes);
    assert_eq!(info.total_commits, 2);
    assert!(info.last_commit.is_some());
}

#[test]
fn test_unborn_repository() {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    fs::write(dir.path().join("first.txt"), "hello\n").unwrap();
    stage(&repo, "first.txt");

    let handler = GitHandler::open(dir.path()).unwrap();
    let info = handler.repository_info().unwrap();
    assert!(!info.branch.is_empty());
    assert_eq!(info.total_commits, 0);
    assert!(info.last_commit.is_none());
    assert!(info.has_changes);

    let result = sprout_diff::parse(&handler.staged_diff().unwrap());
    assert_eq!(result.len(), 1);
    assert_eq!(result.files()[0].file_path(), "first.txt");
}

#[test]
fn test_string_change_source() {
    let captured = String::from("diff --git a/x b/x\n+1\n");
    assert_eq!(captured.get_diff_text(), captured);
    assert_eq!("".get_diff_text(), "");
}
