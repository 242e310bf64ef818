use std::fs;
use std::sync::Arc;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use quiztake::app::{App, Screen};
use quiztake::dispatch::{action_for_key, apply, Action};
use quiztake::model::{AttemptRef, OptionId, QuestionId};
use quiztake::session::{Direction, Status, Submission, SubmissionGateway};
use quiztake::view::Dialog;

struct NullGateway;

impl SubmissionGateway for NullGateway {
    fn submit_attempt(&mut self, _submission: Submission) {}
}

fn sample_app(seconds: i64) -> App {
    let content = fs::read_to_string("fixtures/sample_quiz.md").expect("Cannot read fixture");
    let quiz = quiztake::parser::parse_quiz(&content, "sample_quiz.md", "sha256:test").unwrap();
    App::start(Arc::new(quiz), seconds, Box::new(NullGateway)).unwrap()
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn press(app: &mut App, event: KeyEvent) {
    if let Some(action) = action_for_key(event, app) {
        apply(action, app);
    }
}

#[test]
fn test_arrow_keys_navigate() {
    let mut app = sample_app(600);

    assert_eq!(
        action_for_key(key(KeyCode::Right), &app),
        Some(Action::Navigate(Direction::Forward))
    );
    assert_eq!(
        action_for_key(key(KeyCode::Left), &app),
        Some(Action::Navigate(Direction::Backward))
    );

    press(&mut app, key(KeyCode::Right));
    press(&mut app, key(KeyCode::Right));
    press(&mut app, key(KeyCode::Right));
    assert_eq!(app.session.attempt().current_index(), 2);
    assert_eq!(app.view().index, 2);
    assert!(app.view().controls.submit);
    assert!(!app.view().controls.forward);
}

#[test]
fn test_release_events_are_ignored() {
    let app = sample_app(600);
    let mut event = key(KeyCode::Right);
    event.kind = KeyEventKind::Release;

    assert_eq!(action_for_key(event, &app), None);
}

#[test]
fn test_letters_select_existing_choices_only() {
    let mut app = sample_app(600);

    assert_eq!(action_for_key(key(KeyCode::Char('c')), &app), Some(Action::Choose(2)));
    assert_eq!(action_for_key(key(KeyCode::Char('d')), &app), None);

    press(&mut app, key(KeyCode::Char('b')));
    assert_eq!(
        app.session.attempt().answer_for(&QuestionId::new("1")),
        Some(&OptionId::new("b"))
    );
    assert_eq!(app.choice_cursor, 1);
    assert_eq!(app.view().answered, 1);
}

#[test]
fn test_cursor_selection_and_sync() {
    let mut app = sample_app(600);

    press(&mut app, key(KeyCode::Down));
    press(&mut app, key(KeyCode::Down));
    press(&mut app, key(KeyCode::Down));
    assert_eq!(app.choice_cursor, 2);
    press(&mut app, key(KeyCode::Enter));
    assert_eq!(
        app.session.attempt().answer_for(&QuestionId::new("1")),
        Some(&OptionId::new("c"))
    );

    press(&mut app, key(KeyCode::Right));
    assert_eq!(app.choice_cursor, 0);
    press(&mut app, key(KeyCode::Left));
    assert_eq!(app.choice_cursor, 2);
}

#[test]
fn test_submit_key_only_on_last_question() {
    let mut app = sample_app(600);

    assert_eq!(action_for_key(ctrl('s'), &app), None);

    press(&mut app, key(KeyCode::Right));
    press(&mut app, key(KeyCode::Right));
    assert_eq!(action_for_key(ctrl('s'), &app), Some(Action::RequestSubmit));
}

#[test]
fn test_confirmation_dialog_cancel_and_confirm() {
    let mut app = sample_app(600);
    press(&mut app, key(KeyCode::Char('b')));
    press(&mut app, key(KeyCode::Right));
    press(&mut app, key(KeyCode::Right));

    press(&mut app, ctrl('s'));
    assert_eq!(
        app.view().top_dialog(),
        Some(&Dialog::ConfirmUnanswered(vec![2, 3]))
    );
    // Navigation is blocked while the dialog is open.
    assert_eq!(action_for_key(key(KeyCode::Left), &app), None);

    press(&mut app, key(KeyCode::Esc));
    assert!(!app.view().has_dialog());
    assert_eq!(app.session.status(), Status::InProgress);

    press(&mut app, ctrl('s'));
    press(&mut app, key(KeyCode::Enter));
    assert!(!app.view().has_dialog());
    assert_eq!(app.session.status(), Status::Submitting);
    assert_eq!(app.screen(), Screen::Submitting);
    assert_eq!(action_for_key(key(KeyCode::Right), &app), None);
}

#[test]
fn test_help_dialog_toggles() {
    let mut app = sample_app(600);

    press(&mut app, key(KeyCode::Char('?')));
    assert_eq!(app.view().top_dialog(), Some(&Dialog::Help));
    press(&mut app, key(KeyCode::Char('?')));
    assert!(!app.view().has_dialog());
}

#[test]
fn test_warnings_push_dialogs_and_toasts() {
    let mut app = sample_app(301);

    app.session.tick();
    assert_eq!(app.view().top_dialog(), Some(&Dialog::FiveMinuteWarning));
    let toast = app.view().active_toast().expect("toast");
    assert_eq!(toast.text, "Only 5 minutes remaining!");

    press(&mut app, key(KeyCode::Enter));
    assert!(!app.view().has_dialog());
    assert_eq!(app.view().seconds_remaining, 300);
}

#[test]
fn test_results_screen_quits_on_enter() {
    let mut app = sample_app(600);
    app.session.submit(false);
    app.session
        .finish_submit(Ok(AttemptRef("attempt-00ff00ff00ff00ff".to_string())));

    assert_eq!(app.screen(), Screen::Results);
    assert_eq!(
        app.view().results,
        Some(AttemptRef("attempt-00ff00ff00ff00ff".to_string()))
    );
    assert_eq!(action_for_key(key(KeyCode::Enter), &app), Some(Action::Quit));

    press(&mut app, key(KeyCode::Char('q')));
    assert!(app.should_quit);
}

#[test]
fn test_ctrl_q_quits_anywhere() {
    let app = sample_app(600);
    assert_eq!(action_for_key(ctrl('q'), &app), Some(Action::Quit));
}
