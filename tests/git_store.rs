use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use chrono::Utc;

use quiztake::error::StoreError;
use quiztake::git::{head_commit, GitStore};
use quiztake::model::{OptionId, QuestionId, Quiz};
use quiztake::session::Submission;
use quiztake::store::AttemptStore;

fn git(args: &[&str], cwd: &Path) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("git not available");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn configure_identity(repo: &Path) {
    git(&["config", "user.name", "Quiz Taker"], repo);
    git(&["config", "user.email", "taker@example.com"], repo);
    git(&["config", "commit.gpgsign", "false"], repo);
}

/// A bare remote plus a working clone that tracks it.
fn setup_repos(name: &str) -> (PathBuf, PathBuf, PathBuf) {
    let root = std::env::temp_dir().join(name);
    let _ = fs::remove_dir_all(&root);
    fs::create_dir_all(&root).unwrap();

    let remote = root.join("remote.git");
    let work = root.join("work");
    git(&["init", "--bare", remote.to_str().unwrap()], &root);
    git(&["clone", remote.to_str().unwrap(), work.to_str().unwrap()], &root);
    configure_identity(&work);

    fs::copy("fixtures/sample_quiz.md", work.join("quiz.md")).unwrap();
    git(&["add", "quiz.md"], &work);
    git(&["commit", "-m", "add quiz"], &work);
    git(&["push", "-u", "origin", "HEAD"], &work);

    (root, remote, work)
}

fn sample_quiz() -> Arc<Quiz> {
    let content = fs::read_to_string("fixtures/sample_quiz.md").expect("Cannot read fixture");
    Arc::new(quiztake::parser::parse_quiz(&content, "quiz.md", "sha256:test").unwrap())
}

fn submission(quiz: &Quiz, answer: &str) -> Submission {
    let mut answers = HashMap::new();
    answers.insert(QuestionId::new("1"), OptionId::new(answer));
    Submission {
        question_order: quiz.question_ids(),
        answers,
        forced: false,
        time_limit_seconds: 1200,
        time_remaining_seconds: 600,
        started_at: Utc::now(),
        submitted_at: Utc::now(),
    }
}

/// Push a competing commit from a second clone so the next push is rejected.
fn advance_remote(root: &Path, remote: &Path) {
    let other = root.join("other");
    git(&["clone", remote.to_str().unwrap(), other.to_str().unwrap()], root);
    configure_identity(&other);
    fs::write(other.join("notes.txt"), "moved on").unwrap();
    git(&["add", "notes.txt"], &other);
    git(&["commit", "-m", "unrelated change"], &other);
    git(&["push"], &other);
}

#[test]
fn test_git_store_commits_and_pushes() {
    let (root, remote, work) = setup_repos("quiztake_test_git_store");
    let quiz = sample_quiz();
    let store = GitStore::new(&work, Arc::clone(&quiz));

    let attempt = store.persist(&submission(&quiz, "b")).unwrap();

    assert_eq!(attempt.0, git(&["rev-parse", "HEAD"], &work));
    assert_eq!(attempt.0, head_commit(&work).unwrap());
    let files = git(&["show", "--name-only", "--format=", "HEAD"], &work);
    assert!(files.lines().any(|f| f == "response/answers.yaml"), "{}", files);
    let subject = git(&["log", "-1", "--format=%s", "HEAD"], &work);
    assert!(subject.starts_with("quiztake: submit quiz.md"));

    // The remote received the same commit.
    let remote_head = git(&["rev-parse", "HEAD"], &remote);
    assert_eq!(remote_head, attempt.0);

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_rejected_push_and_retry_amends() {
    let (root, remote, work) = setup_repos("quiztake_test_git_reject");
    let quiz = sample_quiz();
    let store = GitStore::new(&work, Arc::clone(&quiz));
    advance_remote(&root, &remote);

    let first = store.persist(&submission(&quiz, "a"));
    assert!(matches!(first, Err(StoreError::PushRejected(_))), "{:?}", first);
    let ahead = git(&["rev-list", "--count", "@{u}..HEAD"], &work);
    assert_eq!(ahead, "1");

    let second = store.persist(&submission(&quiz, "c"));
    assert!(matches!(second, Err(StoreError::PushRejected(_))), "{:?}", second);
    let ahead = git(&["rev-list", "--count", "@{u}..HEAD"], &work);
    assert_eq!(ahead, "1");
    let answers = git(&["show", "HEAD:response/answers.yaml"], &work);
    assert!(answers.contains("answer: c"), "{}", answers);

    let _ = fs::remove_dir_all(&root);
}
