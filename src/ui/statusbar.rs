use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::App;
use crate::view::ToastLevel;

const GAUGE_WIDTH: usize = 20;

fn gauge(filled: usize, total: usize) -> String {
    let cells = if total == 0 {
        0
    } else {
        filled.min(total) * GAUGE_WIDTH / total
    };
    format!("{}{}", "█".repeat(cells), "░".repeat(GAUGE_WIDTH - cells))
}

pub fn draw_statusbar(f: &mut Frame, area: Rect, app: &App) {
    let view = app.view();

    let mut spans = vec![
        Span::raw(" "),
        Span::styled(
            gauge(view.index + 1, view.total),
            Style::default().fg(Color::Blue),
        ),
        Span::raw(format!(" {}/{}", view.index + 1, view.total)),
        Span::raw("   "),
        Span::styled(
            format!("● {} answered", view.answered),
            Style::default().fg(Color::Green),
        ),
        Span::raw("   "),
        Span::styled(
            format!("○ {} open", view.total.saturating_sub(view.answered)),
            Style::default().fg(Color::White),
        ),
    ];

    if let Some(toast) = view.active_toast() {
        let color = match toast.level {
            ToastLevel::Info => Color::Cyan,
            ToastLevel::Warning => Color::Yellow,
            ToastLevel::Danger => Color::Red,
        };
        spans.push(Span::raw("   "));
        spans.push(Span::styled(toast.text.clone(), Style::default().fg(color)));
    }

    let widget =
        Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Rgb(30, 30, 30)));
    f.render_widget(widget, area);
}
