use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::info;

use crate::error::StoreError;
use crate::model::{AttemptRef, Quiz, Score};
use crate::session::Submission;

/// Synchronous persistence of a finished attempt.
pub trait AttemptStore {
    fn persist(&self, submission: &Submission) -> Result<AttemptRef, StoreError>;
}

#[derive(Debug, Serialize)]
struct AnswersDocument<'a> {
    quiz: QuizSection<'a>,
    attempt: AttemptSection,
    questions: Vec<QuestionEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct QuizSection<'a> {
    title: &'a str,
    source: &'a str,
    quiz_hash: &'a str,
}

#[derive(Debug, Serialize)]
struct AttemptSection {
    started_at: String,
    submitted_at: String,
    duration: String,
    forced: bool,
    time_limit_seconds: i64,
    time_remaining_seconds: i64,
    answered: usize,
    total: usize,
    score: Option<ScoreEntry>,
}

#[derive(Debug, Serialize)]
struct ScoreEntry {
    correct: usize,
    total: usize,
}

#[derive(Debug, Serialize)]
struct QuestionEntry<'a> {
    number: u32,
    id: &'a str,
    title: &'a str,
    answer: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    correct: Option<bool>,
}

impl From<Score> for ScoreEntry {
    fn from(score: Score) -> Self {
        Self {
            correct: score.correct,
            total: score.total,
        }
    }
}

/// Render the answers document. Unanswered questions carry `answer: null`.
pub fn build_answers_yaml(quiz: &Quiz, submission: &Submission) -> Result<String, StoreError> {
    let keyed = quiz.has_answer_key();

    let questions = submission
        .question_order
        .iter()
        .filter_map(|id| quiz.question(id))
        .map(|q| {
            let answer = submission.answers.get(&q.id);
            let correct = keyed.then(|| {
                answer.is_some_and(|a| q.choices.iter().any(|c| c.correct && &c.option_id() == a))
            });
            QuestionEntry {
                number: q.number,
                id: &q.id.0,
                title: &q.title,
                answer: answer.map(|a| a.0.as_str()),
                correct,
            }
        })
        .collect();

    let doc = AnswersDocument {
        quiz: QuizSection {
            title: &quiz.title,
            source: &quiz.quiz_file,
            quiz_hash: &quiz.quiz_hash,
        },
        attempt: AttemptSection {
            started_at: submission.started_at.to_rfc3339(),
            submitted_at: submission.submitted_at.to_rfc3339(),
            duration: format_elapsed(submission),
            forced: submission.forced,
            time_limit_seconds: submission.time_limit_seconds,
            time_remaining_seconds: submission.time_remaining_seconds,
            answered: submission.answers.len(),
            total: submission.question_order.len(),
            score: quiz.score(&submission.answers).map(ScoreEntry::from),
        },
        questions,
    };

    Ok(serde_yaml::to_string(&doc)?)
}

fn format_elapsed(submission: &Submission) -> String {
    let secs = (submission.submitted_at - submission.started_at)
        .num_seconds()
        .max(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Reference derived from the document content, never from the clock.
pub fn attempt_ref_for(document: &str) -> AttemptRef {
    let digest = compute_str_hash(document);
    let hex = digest.trim_start_matches("sha256:");
    AttemptRef(format!("attempt-{}", &hex[..16]))
}

/// Writes each attempt to `<dir>/<attempt-ref>.yaml`.
#[derive(Debug, Clone)]
pub struct DirStore {
    dir: PathBuf,
    quiz: Arc<Quiz>,
}

impl DirStore {
    pub fn new(dir: impl Into<PathBuf>, quiz: Arc<Quiz>) -> Self {
        Self {
            dir: dir.into(),
            quiz,
        }
    }

    pub fn path_for(&self, attempt: &AttemptRef) -> PathBuf {
        self.dir.join(format!("{}.yaml", attempt))
    }
}

impl AttemptStore for DirStore {
    fn persist(&self, submission: &Submission) -> Result<AttemptRef, StoreError> {
        let yaml = build_answers_yaml(&self.quiz, submission)?;
        let attempt = attempt_ref_for(&yaml);

        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Write {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.path_for(&attempt);
        atomic_write(&path, &yaml)?;

        info!(path = %path.display(), %attempt, "attempt stored");
        Ok(attempt)
    }
}

pub(crate) fn atomic_write(path: &Path, content: &str) -> Result<(), StoreError> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, content).map_err(|source| StoreError::Write {
        path: tmp.clone(),
        source,
    })?;
    fs::rename(&tmp, path).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

pub fn compute_file_hash(path: &Path) -> io::Result<String> {
    let content = fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&content);
    Ok(format!("sha256:{}", hex_encode(&hasher.finalize())))
}

pub fn compute_str_hash(s: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(s.as_bytes());
    format!("sha256:{}", hex_encode(&hasher.finalize()))
}
