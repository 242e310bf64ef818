use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a question within a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(pub String);

/// Identifier of a selectable option within a question.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OptionId(pub String);

/// Reference returned by a submission gateway; keys the results view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttemptRef(pub String);

impl QuestionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl OptionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for AttemptRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frontmatter {
    pub title: Option<String>,
    /// Time limit in minutes.
    pub time_limit: i64,
}

#[derive(Debug, Clone)]
pub struct Quiz {
    pub frontmatter: Frontmatter,
    pub title: String,
    pub preamble: Vec<String>,
    pub questions: Vec<Question>,
    pub quiz_file: String,
    pub quiz_hash: String,
}

#[derive(Debug, Clone)]
pub struct Question {
    pub number: u32,
    pub id: QuestionId,
    pub title: String,
    pub body: Vec<String>,
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone)]
pub struct Choice {
    pub label: char,
    pub text: String,
    pub correct: bool,
}

impl Choice {
    pub fn option_id(&self) -> OptionId {
        OptionId(self.label.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl Quiz {
    pub fn question_ids(&self) -> Vec<QuestionId> {
        self.questions.iter().map(|q| q.id.clone()).collect()
    }

    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| &q.id == id)
    }

    pub fn has_answer_key(&self) -> bool {
        self.questions
            .iter()
            .all(|q| q.choices.iter().any(|c| c.correct))
    }

    /// Count answers matching the marked option. `None` when any question
    /// lacks a marked option.
    pub fn score(&self, answers: &HashMap<QuestionId, OptionId>) -> Option<Score> {
        if !self.has_answer_key() {
            return None;
        }
        let correct = self
            .questions
            .iter()
            .filter(|q| {
                answers.get(&q.id).is_some_and(|selected| {
                    q.choices
                        .iter()
                        .any(|c| c.correct && &c.option_id() == selected)
                })
            })
            .count();
        Some(Score {
            correct,
            total: self.questions.len(),
        })
    }
}
