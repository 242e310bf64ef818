use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::App;

pub fn draw_submitting(f: &mut Frame, area: Rect, app: &App) {
    let attempt = app.session.attempt();
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "Submitting...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "{} of {} questions answered",
            attempt.answered_count(),
            attempt.total()
        )),
        Line::from(""),
    ];

    let block = Block::default().borders(Borders::ALL);
    let widget = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(widget, area);
}

pub fn draw_results(f: &mut Frame, area: Rect, app: &App) {
    let attempt = app.session.attempt();
    let reference = app
        .view()
        .results
        .as_ref()
        .map(|r| r.to_string())
        .unwrap_or_default();

    let mut lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "✓  Quiz Submitted Successfully",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Attempt: {}", reference)),
        Line::from(format!(
            "Answered: {} of {}",
            attempt.answered_count(),
            attempt.total()
        )),
    ];

    if let Some(score) = app.quiz.score(attempt.answers()) {
        let percent = score.correct * 100 / score.total.max(1);
        lines.push(Line::from(Span::styled(
            format!("Score: {}/{} ({}%)", score.correct, score.total, percent),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
    }

    if let Some(location) = &app.results_location {
        lines.push(Line::from(""));
        lines.push(Line::from(format!("Saved to {}", location)));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Enter] Exit",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));

    let block = Block::default().borders(Borders::ALL);
    let widget = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}
