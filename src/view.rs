use std::time::{Duration, Instant};

use crate::model::AttemptRef;
use crate::session::{Controls, Notice, Presenter, Warning};

/// How long a toast stays in the status bar.
pub const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    ConfirmUnanswered(Vec<usize>),
    FiveMinuteWarning,
    OneMinuteWarning,
    SubmitFailed(String),
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Danger,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub text: String,
    pub level: ToastLevel,
    pub shown_at: Instant,
}

impl Toast {
    fn new(text: impl Into<String>, level: ToastLevel) -> Self {
        Self {
            text: text.into(),
            level,
            shown_at: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.shown_at.elapsed() >= TOAST_TTL
    }
}

/// Render state driven entirely by session notifications.
#[derive(Debug, Clone)]
pub struct View {
    pub index: usize,
    pub total: usize,
    pub controls: Controls,
    pub seconds_remaining: i64,
    pub answered: usize,
    pub dialog_stack: Vec<Dialog>,
    pub toast: Option<Toast>,
    pub results: Option<AttemptRef>,
}

impl Default for View {
    fn default() -> Self {
        Self::new()
    }
}

impl View {
    pub fn new() -> Self {
        Self {
            index: 0,
            total: 0,
            controls: Controls::for_index(0, 0),
            seconds_remaining: 0,
            answered: 0,
            dialog_stack: Vec::new(),
            toast: None,
            results: None,
        }
    }

    pub fn has_dialog(&self) -> bool {
        !self.dialog_stack.is_empty()
    }

    pub fn top_dialog(&self) -> Option<&Dialog> {
        self.dialog_stack.last()
    }

    pub fn push_dialog(&mut self, dialog: Dialog) {
        self.dialog_stack.push(dialog);
    }

    pub fn pop_dialog(&mut self) -> Option<Dialog> {
        self.dialog_stack.pop()
    }

    /// The toast, unless it has outlived its display time.
    pub fn active_toast(&self) -> Option<&Toast> {
        self.toast.as_ref().filter(|t| !t.is_expired())
    }

    fn show_toast(&mut self, text: impl Into<String>, level: ToastLevel) {
        self.toast = Some(Toast::new(text, level));
    }
}

impl Presenter for View {
    fn on_index_changed(&mut self, index: usize, total: usize) {
        self.index = index;
        self.total = total;
        self.controls = Controls::for_index(index, total);
    }

    fn on_time_changed(&mut self, seconds_remaining: i64) {
        self.seconds_remaining = seconds_remaining;
    }

    fn on_progress_changed(&mut self, answered: usize, total: usize) {
        self.answered = answered;
        self.total = total;
    }

    fn on_warning(&mut self, warning: Warning) {
        match warning {
            Warning::FiveMinutes => {
                self.show_toast("Only 5 minutes remaining!", ToastLevel::Warning);
                self.push_dialog(Dialog::FiveMinuteWarning);
            }
            Warning::OneMinute => {
                self.show_toast("Only 1 minute remaining! Hurry up!", ToastLevel::Danger);
                self.push_dialog(Dialog::OneMinuteWarning);
            }
        }
    }

    fn on_unanswered_confirmation_needed(&mut self, positions: &[usize]) {
        self.push_dialog(Dialog::ConfirmUnanswered(positions.to_vec()));
    }

    fn notify(&mut self, notice: Notice) {
        match notice {
            Notice::Submitting { forced } => {
                // A timeout can fire while the confirmation is still open.
                self.dialog_stack
                    .retain(|d| !matches!(d, Dialog::ConfirmUnanswered(_)));
                let text = if forced {
                    "Time is up! Submitting your quiz..."
                } else {
                    "Submitting your quiz..."
                };
                self.show_toast(text, ToastLevel::Info);
            }
            Notice::SubmissionFailed { reason, retryable } => {
                let text = if retryable {
                    "Submission failed. Your answers are kept; submit again to retry."
                } else {
                    "Submission failed."
                };
                self.show_toast(text, ToastLevel::Danger);
                self.push_dialog(Dialog::SubmitFailed(reason));
            }
        }
    }

    fn show_results(&mut self, attempt: &AttemptRef) {
        self.dialog_stack.clear();
        self.toast = None;
        self.results = Some(attempt.clone());
    }
}
