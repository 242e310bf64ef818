use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::StoreError;
use crate::model::{AttemptRef, Quiz};
use crate::session::Submission;
use crate::store::{self, AttemptStore};

const COMMIT_PREFIX: &str = "quiztake: submit";

fn run_git(args: &[&str], cwd: &Path) -> Result<String, StoreError> {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .map_err(|e| StoreError::Git {
            command: args.join(" "),
            stderr: format!("failed to run git: {}", e),
        })?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    } else {
        Err(StoreError::Git {
            command: args.join(" "),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

pub fn is_git_repo(path: &Path) -> bool {
    path.join(".git").exists()
}

/// Walk up from `start` to the first directory holding a `.git` entry.
pub fn find_repo_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| is_git_repo(dir))
        .map(Path::to_path_buf)
}

pub fn git_add(repo: &Path, paths: &[&str]) -> Result<(), StoreError> {
    let mut args = vec!["add"];
    args.extend(paths);
    run_git(&args, repo)?;
    Ok(())
}

pub fn git_commit(repo: &Path, message: &str) -> Result<(), StoreError> {
    run_git(&["commit", "-m", message], repo)?;
    Ok(())
}

pub fn git_commit_amend(repo: &Path, message: &str) -> Result<(), StoreError> {
    run_git(&["commit", "--amend", "-m", message], repo)?;
    Ok(())
}

/// True when HEAD is a submission commit the upstream has not seen yet,
/// left behind by an earlier push that failed.
pub fn has_unpushed_submission(repo: &Path) -> bool {
    run_git(&["log", "-1", "--format=%s", "@{u}..HEAD"], repo)
        .map(|subject| subject.starts_with(COMMIT_PREFIX))
        .unwrap_or(false)
}

pub fn git_push(repo: &Path) -> Result<(), StoreError> {
    match run_git(&["push"], repo) {
        Err(StoreError::Git { stderr, .. }) if stderr.contains("rejected") => {
            Err(StoreError::PushRejected(stderr))
        }
        other => other.map(|_| ()),
    }
}

pub fn head_commit(repo: &Path) -> Result<String, StoreError> {
    Ok(run_git(&["rev-parse", "HEAD"], repo)?.trim().to_string())
}

pub fn build_commit_message(quiz: &Quiz, submission: &Submission) -> String {
    let total = submission.question_order.len();
    let answered = submission.answers.len();
    format!(
        "{} {}\n\nStarted: {}\nSubmitted: {}\nQuestions: {} ({} answered, {} not answered){}",
        COMMIT_PREFIX,
        quiz.quiz_file,
        submission.started_at.to_rfc3339(),
        submission.submitted_at.to_rfc3339(),
        total,
        answered,
        total - answered,
        if submission.forced { "\nAuto-submitted: time expired" } else { "" },
    )
}

/// Commits `response/answers.yaml` into the quiz repository and pushes it.
/// The commit hash is the attempt reference. A retry after a failed push
/// amends the pending commit.
#[derive(Debug, Clone)]
pub struct GitStore {
    repo: PathBuf,
    quiz: Arc<Quiz>,
}

impl GitStore {
    pub fn new(repo: impl Into<PathBuf>, quiz: Arc<Quiz>) -> Self {
        Self {
            repo: repo.into(),
            quiz,
        }
    }
}

impl AttemptStore for GitStore {
    fn persist(&self, submission: &Submission) -> Result<AttemptRef, StoreError> {
        let response_dir = self.repo.join("response");
        fs::create_dir_all(&response_dir).map_err(|source| StoreError::Write {
            path: response_dir.clone(),
            source,
        })?;

        let yaml = store::build_answers_yaml(&self.quiz, submission)?;
        store::atomic_write(&response_dir.join("answers.yaml"), &yaml)?;

        let message = build_commit_message(&self.quiz, submission);
        let retrying = has_unpushed_submission(&self.repo);
        git_add(&self.repo, &["response/"])?;
        if retrying {
            debug!(repo = %self.repo.display(), "amending unpushed submission");
            git_commit_amend(&self.repo, &message)?;
        } else {
            git_commit(&self.repo, &message)?;
        }
        git_push(&self.repo)?;

        let commit = head_commit(&self.repo)?;
        info!(repo = %self.repo.display(), %commit, "attempt pushed");
        Ok(AttemptRef(commit))
    }
}
