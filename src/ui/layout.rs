use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::model::Quiz;

/// Cursor, marker, number and the right border around each sidebar title.
const SIDEBAR_CHROME: u16 = 10;
const SIDEBAR_MIN: u16 = 20;
const SIDEBAR_MAX: u16 = 36;
/// Below this width the question card gets the whole middle row.
const NARROW_WIDTH: u16 = 60;

pub struct AppLayout {
    pub titlebar: Rect,
    pub sidebar: Option<Rect>,
    pub main: Rect,
    pub statusbar: Rect,
    pub keybar: Rect,
}

pub fn sidebar_width(quiz: &Quiz, area_width: u16) -> u16 {
    if area_width < NARROW_WIDTH {
        return 0;
    }
    let longest = quiz
        .questions
        .iter()
        .map(|q| q.title.chars().count())
        .max()
        .unwrap_or(0);
    let wanted = u16::try_from(longest).unwrap_or(u16::MAX);
    wanted
        .saturating_add(SIDEBAR_CHROME)
        .clamp(SIDEBAR_MIN, SIDEBAR_MAX)
}

pub fn compute_layout(area: Rect, quiz: &Quiz) -> AppLayout {
    let [titlebar, middle, statusbar, keybar] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

    let width = sidebar_width(quiz, area.width);
    let (sidebar, main) = if width == 0 {
        (None, middle)
    } else {
        let [sidebar, main] = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(width), Constraint::Min(20)])
            .areas(middle);
        (Some(sidebar), main)
    };

    AppLayout {
        titlebar,
        sidebar,
        main,
        statusbar,
        keybar,
    }
}
