use clap::{Args, Parser, Subcommand};
use sprout_core::DiffScope;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "sprout", version, about = "Summarize git changes per file")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Specify configuration file path
    #[arg(long, env = "SPROUT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (overrides the [log] config section)
    #[arg(long, env = "SPROUT_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Repository path; parent directories are searched
    #[arg(short = 'C', long, default_value = ".", global = true)]
    pub repo: PathBuf,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Summarize the repository's changes
    Summary {
        #[command(flatten)]
        scope: ScopeArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Parse diff text from a file or stdin
    Parse {
        /// Diff file to read; stdin when omitted or "-"
        file: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List changed files (staged, unstaged and untracked)
    Files {
        /// Print JSON instead of one path per line
        #[arg(long)]
        json: bool,
    },

    /// Show repository information
    Info {
        /// Print JSON instead of key: value lines
        #[arg(long)]
        json: bool,
    },

    /// Stage all changes, like `git add --all`
    Stage,

    /// Print a working-tree file
    Show {
        /// Path relative to the repository root
        path: String,
    },
}

#[derive(Debug, Args)]
#[group(multiple = false)]
pub struct ScopeArgs {
    /// Only changes in the index
    #[arg(long)]
    pub staged: bool,

    /// Only changes not yet staged
    #[arg(long)]
    pub unstaged: bool,

    /// Staged and unstaged changes
    #[arg(long)]
    pub all: bool,
}

impl ScopeArgs {
    /// Scope picked on the command line, if any
    pub fn scope(&self) -> Option<DiffScope> {
        if self.staged {
            Some(DiffScope::Staged)
        } else if self.unstaged {
            Some(DiffScope::Unstaged)
        } else if self.all {
            Some(DiffScope::All)
        } else {
            None
        }
    }
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    /// List every added and deleted line
    #[arg(long)]
    pub lines: bool,

    /// Print the parsed files as JSON
    #[arg(long, conflicts_with = "lines")]
    pub json: bool,
}
