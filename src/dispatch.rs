//! Key events to session operations. Each action performs at most one
//! controller call, so keyboard and on-screen controls share one path.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, Screen};
use crate::session::Direction;
use crate::view::Dialog;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Navigate(Direction),
    MoveCursor(Direction),
    Choose(usize),
    ChooseAtCursor,
    RequestSubmit,
    ConfirmSubmit,
    CancelSubmit,
    DismissDialog,
    ShowHelp,
    Quit,
}

pub fn action_for_key(key: KeyEvent, app: &App) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c')) {
        return Some(Action::Quit);
    }

    match app.screen() {
        Screen::Results => match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        },
        Screen::Submitting => None,
        Screen::Working => match app.view().top_dialog() {
            Some(dialog) => dialog_action(key, dialog),
            None => working_action(key, ctrl, app),
        },
    }
}

fn dialog_action(key: KeyEvent, dialog: &Dialog) -> Option<Action> {
    match dialog {
        Dialog::ConfirmUnanswered(_) => match key.code {
            KeyCode::Enter => Some(Action::ConfirmSubmit),
            KeyCode::Esc => Some(Action::CancelSubmit),
            _ => None,
        },
        Dialog::Help => match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') => Some(Action::DismissDialog),
            _ => None,
        },
        Dialog::FiveMinuteWarning | Dialog::OneMinuteWarning | Dialog::SubmitFailed(_) => {
            match key.code {
                KeyCode::Enter | KeyCode::Esc => Some(Action::DismissDialog),
                _ => None,
            }
        }
    }
}

fn working_action(key: KeyEvent, ctrl: bool, app: &App) -> Option<Action> {
    if ctrl {
        return match key.code {
            KeyCode::Char('s') if app.view().controls.submit => Some(Action::RequestSubmit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Right => Some(Action::Navigate(Direction::Forward)),
        KeyCode::Left => Some(Action::Navigate(Direction::Backward)),
        KeyCode::Down => Some(Action::MoveCursor(Direction::Forward)),
        KeyCode::Up => Some(Action::MoveCursor(Direction::Backward)),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::ChooseAtCursor),
        KeyCode::Char('?') => Some(Action::ShowHelp),
        KeyCode::Char(c) if c.is_ascii_lowercase() => {
            let idx = (c as u8 - b'a') as usize;
            let choices = app.current_question().map_or(0, |q| q.choices.len());
            (idx < choices).then_some(Action::Choose(idx))
        }
        _ => None,
    }
}

pub fn apply(action: Action, app: &mut App) {
    match action {
        Action::Navigate(direction) => {
            app.session.navigate(direction);
            app.sync_cursor();
        }
        Action::MoveCursor(direction) => {
            let choices = app.current_question().map_or(0, |q| q.choices.len());
            app.choice_cursor = match direction {
                Direction::Forward => (app.choice_cursor + 1).min(choices.saturating_sub(1)),
                Direction::Backward => app.choice_cursor.saturating_sub(1),
            };
        }
        Action::Choose(idx) => {
            app.choice_cursor = idx;
            choose(app, idx);
        }
        Action::ChooseAtCursor => {
            let idx = app.choice_cursor;
            choose(app, idx);
        }
        Action::RequestSubmit => app.session.request_submit(),
        Action::ConfirmSubmit => {
            app.session.presenter_mut().pop_dialog();
            app.session.confirm_submit();
        }
        Action::CancelSubmit => {
            app.session.presenter_mut().pop_dialog();
            app.session.cancel_submit();
        }
        Action::DismissDialog => {
            app.session.presenter_mut().pop_dialog();
        }
        Action::ShowHelp => app.session.presenter_mut().push_dialog(Dialog::Help),
        Action::Quit => app.should_quit = true,
    }
}

fn choose(app: &mut App, idx: usize) {
    let Some(question) = app.current_question() else {
        return;
    };
    let Some(choice) = question.choices.get(idx) else {
        return;
    };
    let (question_id, option_id) = (question.id.clone(), choice.option_id());
    app.session.record_answer(question_id, option_id);
}
