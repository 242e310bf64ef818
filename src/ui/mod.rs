pub mod dialog;
pub mod keybar;
pub mod layout;
pub mod question;
pub mod result;
pub mod sidebar;
pub mod statusbar;
pub mod titlebar;

use ratatui::Frame;

use crate::app::{App, Screen};

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    match app.screen() {
        Screen::Working => {
            draw_working(f, area, app);
        }
        Screen::Submitting => {
            result::draw_submitting(f, area, app);
        }
        Screen::Results => {
            result::draw_results(f, area, app);
        }
    }
}

fn draw_working(f: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let layout = layout::compute_layout(area, &app.quiz);

    titlebar::draw_titlebar(f, layout.titlebar, app);
    if let Some(sidebar_area) = layout.sidebar {
        sidebar::draw_sidebar(f, sidebar_area, app);
    }
    question::draw_question(f, layout.main, app);
    statusbar::draw_statusbar(f, layout.statusbar, app);
    keybar::draw_keybar(f, layout.keybar, app);

    if app.view().has_dialog() {
        dialog::draw_dialog(f, area, app);
    }
}
