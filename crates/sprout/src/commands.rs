use crate::cli::{Cli, Command, OutputArgs};
use anyhow::{Context, Result};
use sprout_core::Config;
use sprout_diff::{render_report, RenderOptions};
use sprout_vcs::{ChangeSource, GitHandler};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

pub fn execute(cli: Cli, config: &Config) -> Result<()> {
    match cli.command {
        Command::Summary { scope, output } => {
            let diff_config = config.diff_config();
            let handler = GitHandler::open_with_config(&cli.repo, &diff_config)?
                .with_scope(scope.scope().unwrap_or(diff_config.scope));
            tracing::debug!("Summarizing {} changes", handler.scope().as_str());
            print_parsed(&handler.get_diff_text(), &output, diff_config.show_lines)
        }
        Command::Parse { file, output } => {
            let diff_text = read_diff_input(file.as_deref())?;
            print_parsed(&diff_text, &output, config.diff_config().show_lines)
        }
        Command::Files { json } => {
            let files = open(&cli.repo)?.changed_files()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&files)?);
            } else if files.is_empty() {
                println!("No changes detected");
            } else {
                for file in files {
                    println!("{}", file);
                }
            }
            Ok(())
        }
        Command::Info { json } => {
            let info = open(&cli.repo)?.repository_info()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("path: {}", info.path);
                println!("branch: {}", info.branch);
                println!("has_changes: {}", info.has_changes);
                println!("total_commits: {}", info.total_commits);
                if let Some(last_commit) = info.last_commit {
                    println!("last_commit: {}", last_commit);
                }
            }
            Ok(())
        }
        Command::Stage => {
            open(&cli.repo)?.stage_all()?;
            println!("All changes staged");
            Ok(())
        }
        Command::Show { path } => {
            let content = open(&cli.repo)?
                .file_content(&path)
                .with_context(|| format!("Cannot read {} as text", path))?;
            print!("{}", content);
            Ok(())
        }
    }
}

fn open(repo: &Path) -> Result<GitHandler> {
    Ok(GitHandler::open(repo)?)
}

fn print_parsed(diff_text: &str, output: &OutputArgs, show_lines: bool) -> Result<()> {
    let result = sprout_diff::parse(diff_text);

    if output.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        let options = RenderOptions {
            show_lines: output.lines || show_lines,
        };
        print!("{}", render_report(&result, options));
    }

    Ok(())
}

fn read_diff_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("Failed to read diff file {}", path.display())),
        _ => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read diff from stdin")?;
            Ok(input)
        }
    }
}
