use thiserror::Error;

#[derive(Error, Debug)]
pub enum VcsError {
    #[error("Not a git repository: {0}\nRun 'git init' to create one, or navigate to an existing repo.")]
    NotARepository(String),

    #[error("Repository has no working tree: {0}")]
    BareRepository(String),

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type VcsResult<T> = Result<T, VcsError>;
