//! Quiz-taking session controller.
//!
//! The controller owns one [`Attempt`] and is the only thing allowed to
//! mutate it. Hosts feed it discrete triggers (ticks, key presses, gateway
//! outcomes) and it reports back through a [`Presenter`].

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::error::SessionError;
use crate::model::{AttemptRef, OptionId, QuestionId};

/// Remaining seconds at which the five minute warning fires.
pub const FIVE_MINUTE_MARK: i64 = 300;
/// Remaining seconds at which the one minute warning fires.
pub const ONE_MINUTE_MARK: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    NotStarted,
    InProgress,
    Submitting,
    Submitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Warning {
    FiveMinutes,
    OneMinute,
}

/// Transient messages for the notification sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Submitting { forced: bool },
    SubmissionFailed { reason: String, retryable: bool },
}

/// Which navigation controls are visible for a given index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub backward: bool,
    pub forward: bool,
    pub submit: bool,
}

impl Controls {
    pub fn for_index(index: usize, total: usize) -> Self {
        let last = index + 1 >= total;
        Self {
            backward: index > 0,
            forward: !last,
            submit: last,
        }
    }
}

/// Callback surface implemented by the presentation layer.
pub trait Presenter {
    fn on_index_changed(&mut self, index: usize, total: usize);
    fn on_time_changed(&mut self, seconds_remaining: i64);
    fn on_progress_changed(&mut self, answered: usize, total: usize);
    fn on_warning(&mut self, warning: Warning);
    /// Answered later through `confirm_submit` or `cancel_submit`.
    fn on_unanswered_confirmation_needed(&mut self, positions: &[usize]);
    fn notify(&mut self, notice: Notice);
    fn show_results(&mut self, attempt: &AttemptRef);
}

/// Finalized attempt handed to the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub question_order: Vec<QuestionId>,
    pub answers: HashMap<QuestionId, OptionId>,
    pub forced: bool,
    pub time_limit_seconds: i64,
    pub time_remaining_seconds: i64,
    pub started_at: DateTime<Utc>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct SubmissionFailure {
    pub reason: String,
}

impl SubmissionFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

pub type SubmitOutcome = Result<AttemptRef, SubmissionFailure>;

/// Persists finished attempts. The outcome of each call is reported back
/// through [`SessionController::finish_submit`].
pub trait SubmissionGateway {
    fn submit_attempt(&mut self, submission: Submission);
}

impl<G: SubmissionGateway + ?Sized> SubmissionGateway for Box<G> {
    fn submit_attempt(&mut self, submission: Submission) {
        (**self).submit_attempt(submission);
    }
}

#[derive(Debug, Clone)]
pub struct Attempt {
    question_order: Vec<QuestionId>,
    current_index: usize,
    answers: HashMap<QuestionId, OptionId>,
    time_remaining_seconds: i64,
    status: Status,
    started_at: DateTime<Utc>,
}

impl Attempt {
    fn new(question_order: Vec<QuestionId>, time_limit_seconds: i64) -> Self {
        Self {
            question_order,
            current_index: 0,
            answers: HashMap::new(),
            time_remaining_seconds: time_limit_seconds,
            status: Status::NotStarted,
            started_at: Utc::now(),
        }
    }

    pub fn question_order(&self) -> &[QuestionId] {
        &self.question_order
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> &QuestionId {
        &self.question_order[self.current_index]
    }

    pub fn answers(&self) -> &HashMap<QuestionId, OptionId> {
        &self.answers
    }

    pub fn answer_for(&self, question: &QuestionId) -> Option<&OptionId> {
        self.answers.get(question)
    }

    pub fn time_remaining_seconds(&self) -> i64 {
        self.time_remaining_seconds
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn total(&self) -> usize {
        self.question_order.len()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// 1-based positions of unanswered questions, in display order.
    pub fn unanswered_positions(&self) -> Vec<usize> {
        self.question_order
            .iter()
            .enumerate()
            .filter(|(_, id)| !self.answers.contains_key(*id))
            .map(|(i, _)| i + 1)
            .collect()
    }
}

pub struct SessionController<P, G> {
    attempt: Attempt,
    time_limit_seconds: i64,
    countdown_running: bool,
    warned_five_minutes: bool,
    warned_one_minute: bool,
    pending_confirmation: Option<Vec<usize>>,
    attempt_ref: Option<AttemptRef>,
    presenter: P,
    gateway: G,
}

impl<P: Presenter, G: SubmissionGateway> SessionController<P, G> {
    /// Build the attempt and put it in progress.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` when there are no questions, a question id
    /// repeats, or the time limit is not positive.
    pub fn start(
        question_ids: Vec<QuestionId>,
        time_limit_seconds: i64,
        presenter: P,
        gateway: G,
    ) -> Result<Self, SessionError> {
        if question_ids.is_empty() {
            return Err(SessionError::InvalidConfiguration(
                "quiz has no questions".to_string(),
            ));
        }
        if time_limit_seconds <= 0 {
            return Err(SessionError::InvalidConfiguration(format!(
                "time limit must be positive, got {} seconds",
                time_limit_seconds
            )));
        }
        let duplicate = {
            let mut seen = HashSet::new();
            question_ids.iter().find(|id| !seen.insert(*id)).cloned()
        };
        if let Some(dup) = duplicate {
            return Err(SessionError::InvalidConfiguration(format!(
                "duplicate question id {}",
                dup
            )));
        }

        let mut controller = Self {
            attempt: Attempt::new(question_ids, time_limit_seconds),
            time_limit_seconds,
            countdown_running: false,
            warned_five_minutes: false,
            warned_one_minute: false,
            pending_confirmation: None,
            attempt_ref: None,
            presenter,
            gateway,
        };

        controller.attempt.status = Status::InProgress;
        controller.countdown_running = true;
        info!(
            questions = controller.attempt.total(),
            time_limit_seconds, "session started"
        );

        let total = controller.attempt.total();
        controller.presenter.on_index_changed(0, total);
        controller.presenter.on_time_changed(time_limit_seconds);
        controller.presenter.on_progress_changed(0, total);
        Ok(controller)
    }

    pub fn attempt(&self) -> &Attempt {
        &self.attempt
    }

    pub fn status(&self) -> Status {
        self.attempt.status
    }

    pub fn time_limit_seconds(&self) -> i64 {
        self.time_limit_seconds
    }

    pub fn is_countdown_running(&self) -> bool {
        self.countdown_running
    }

    pub fn pending_confirmation(&self) -> Option<&[usize]> {
        self.pending_confirmation.as_deref()
    }

    pub fn attempt_ref(&self) -> Option<&AttemptRef> {
        self.attempt_ref.as_ref()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn record_answer(&mut self, question: QuestionId, option: OptionId) {
        if self.attempt.status != Status::InProgress {
            debug!(status = ?self.attempt.status, "answer ignored");
            return;
        }
        if self.attempt.time_remaining_seconds == 0 {
            debug!(%question, "answer ignored after time expired");
            return;
        }
        if !self.attempt.question_order.contains(&question) {
            debug!(%question, "answer for unknown question ignored");
            return;
        }

        debug!(%question, %option, "answer recorded");
        self.attempt.answers.insert(question, option);
        self.presenter
            .on_progress_changed(self.attempt.answered_count(), self.attempt.total());
    }

    pub fn navigate(&mut self, direction: Direction) {
        if self.attempt.status != Status::InProgress {
            debug!(status = ?self.attempt.status, "navigation ignored");
            return;
        }

        let current = self.attempt.current_index;
        let last = self.attempt.total() - 1;
        let next = match direction {
            Direction::Forward if current < last => current + 1,
            Direction::Backward if current > 0 => current - 1,
            _ => return,
        };

        self.attempt.current_index = next;
        self.presenter.on_index_changed(next, self.attempt.total());
    }

    /// Advance the countdown by one second.
    pub fn tick(&mut self) {
        if self.attempt.status != Status::InProgress || !self.countdown_running {
            debug!(status = ?self.attempt.status, "tick ignored");
            return;
        }

        let remaining = (self.attempt.time_remaining_seconds - 1).max(0);
        self.attempt.time_remaining_seconds = remaining;
        self.presenter.on_time_changed(remaining);

        // Exact boundary values only, never a range check.
        if remaining == FIVE_MINUTE_MARK && !self.warned_five_minutes {
            self.warned_five_minutes = true;
            self.presenter.on_warning(Warning::FiveMinutes);
        }
        if remaining == ONE_MINUTE_MARK && !self.warned_one_minute {
            self.warned_one_minute = true;
            self.presenter.on_warning(Warning::OneMinute);
        }

        if remaining == 0 {
            self.countdown_running = false;
            info!("time expired, submitting");
            self.submit(true);
        }
    }

    /// User-initiated submission. Asks for confirmation when questions are
    /// unanswered.
    pub fn request_submit(&mut self) {
        if self.attempt.status != Status::InProgress {
            debug!(status = ?self.attempt.status, "submit request ignored");
            return;
        }
        if self.attempt.time_remaining_seconds == 0 {
            // Retrying an expired attempt follows the timeout path.
            self.submit(true);
            return;
        }

        let positions = self.attempt.unanswered_positions();
        if positions.is_empty() {
            self.submit(false);
        } else {
            debug!(?positions, "confirmation needed");
            self.presenter.on_unanswered_confirmation_needed(&positions);
            self.pending_confirmation = Some(positions);
        }
    }

    pub fn confirm_submit(&mut self) {
        if self.pending_confirmation.take().is_some() {
            self.submit(false);
        }
    }

    pub fn cancel_submit(&mut self) {
        if self.pending_confirmation.take().is_some() {
            debug!("submission cancelled");
        }
    }

    pub fn submit(&mut self, force: bool) {
        if self.attempt.status != Status::InProgress {
            debug!(status = ?self.attempt.status, force, "submit ignored");
            return;
        }

        self.attempt.status = Status::Submitting;
        self.countdown_running = false;
        self.pending_confirmation = None;

        let submission = Submission {
            question_order: self.attempt.question_order.clone(),
            answers: self.attempt.answers.clone(),
            forced: force,
            time_limit_seconds: self.time_limit_seconds,
            time_remaining_seconds: self.attempt.time_remaining_seconds,
            started_at: self.attempt.started_at,
            submitted_at: Utc::now(),
        };

        info!(
            force,
            answered = self.attempt.answered_count(),
            total = self.attempt.total(),
            "submitting attempt"
        );
        self.presenter.notify(Notice::Submitting { forced: force });
        self.gateway.submit_attempt(submission);
    }

    /// Resolve a pending submission with the gateway's outcome.
    pub fn finish_submit(&mut self, outcome: SubmitOutcome) {
        if self.attempt.status != Status::Submitting {
            debug!(status = ?self.attempt.status, "stale submission outcome ignored");
            return;
        }

        match outcome {
            Ok(attempt_ref) => {
                self.attempt.status = Status::Submitted;
                info!(%attempt_ref, "attempt submitted");
                self.presenter.show_results(&attempt_ref);
                self.attempt_ref = Some(attempt_ref);
            }
            Err(failure) => {
                self.attempt.status = Status::InProgress;
                self.countdown_running = self.attempt.time_remaining_seconds > 0;
                warn!(reason = %failure.reason, "submission failed");
                self.presenter.notify(Notice::SubmissionFailed {
                    reason: failure.reason,
                    retryable: true,
                });
            }
        }
    }
}
