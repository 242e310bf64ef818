use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::cli::Cli;
use crate::error::Error;
use crate::git;
use crate::model::Quiz;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitTarget {
    Directory(PathBuf),
    Git(PathBuf),
}

/// Command line merged with the quiz frontmatter.
#[derive(Debug, Clone)]
pub struct Settings {
    pub time_limit_minutes: i64,
    pub target: SubmitTarget,
    pub log_file: PathBuf,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "quiztake")
}

fn default_results_dir() -> PathBuf {
    project_dirs()
        .map(|d| d.data_dir().join("results"))
        .unwrap_or_else(|| PathBuf::from("quiztake-results"))
}

fn default_log_file() -> PathBuf {
    project_dirs()
        .map(|d| d.data_local_dir().join("quiztake.log"))
        .unwrap_or_else(|| PathBuf::from("quiztake.log"))
}

impl Settings {
    /// The time limit is not validated here; the session rejects it.
    pub fn resolve(cli: &Cli, quiz: &Quiz) -> Result<Self, Error> {
        let time_limit_minutes = cli.minutes.unwrap_or(quiz.frontmatter.time_limit);

        let target = if cli.git {
            let start = cli
                .quiz
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());
            let repo = git::find_repo_root(&start).ok_or_else(|| {
                Error::Config(format!(
                    "--git needs the quiz file inside a git repository ({})",
                    start.display()
                ))
            })?;
            SubmitTarget::Git(repo)
        } else {
            SubmitTarget::Directory(cli.results_dir.clone().unwrap_or_else(default_results_dir))
        };

        Ok(Self {
            time_limit_minutes,
            target,
            log_file: cli.log_file.clone().unwrap_or_else(default_log_file),
        })
    }

    pub fn time_limit_seconds(&self) -> i64 {
        self.time_limit_minutes.saturating_mul(60)
    }
}
