use std::sync::Arc;

use crate::error::SessionError;
use crate::model::{Question, Quiz};
use crate::session::{SessionController, Status, SubmissionGateway};
use crate::view::View;

pub type Session = SessionController<View, Box<dyn SubmissionGateway>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Working,
    Submitting,
    Results,
}

/// Everything the event loop and the renderer share.
pub struct App {
    pub quiz: Arc<Quiz>,
    pub session: Session,
    pub choice_cursor: usize,
    pub should_quit: bool,
    /// Where the gateway put the attempt, shown on the results screen.
    pub results_location: Option<String>,
}

impl App {
    pub fn start(
        quiz: Arc<Quiz>,
        time_limit_seconds: i64,
        gateway: Box<dyn SubmissionGateway>,
    ) -> Result<Self, SessionError> {
        let session =
            SessionController::start(quiz.question_ids(), time_limit_seconds, View::new(), gateway)?;
        Ok(Self {
            quiz,
            session,
            choice_cursor: 0,
            should_quit: false,
            results_location: None,
        })
    }

    pub fn view(&self) -> &View {
        self.session.presenter()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.quiz.question(self.session.attempt().current_question())
    }

    pub fn screen(&self) -> Screen {
        if self.view().results.is_some() {
            return Screen::Results;
        }
        match self.session.status() {
            Status::Submitting | Status::Submitted => Screen::Submitting,
            Status::NotStarted | Status::InProgress => Screen::Working,
        }
    }

    /// Put the choice cursor on the current question's answer, or the top.
    pub fn sync_cursor(&mut self) {
        let attempt = self.session.attempt();
        let selected = self.current_question().and_then(|q| {
            let answer = attempt.answer_for(&q.id)?;
            q.choices.iter().position(|c| &c.option_id() == answer)
        });
        self.choice_cursor = selected.unwrap_or(0);
    }
}
