use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::App;
use crate::view::Dialog;

pub fn draw_dialog(f: &mut Frame, area: Rect, app: &App) {
    let Some(dialog) = app.view().top_dialog() else {
        return;
    };

    match dialog {
        Dialog::ConfirmUnanswered(positions) => draw_confirm_unanswered(f, area, positions),
        Dialog::FiveMinuteWarning => draw_time_warning(f, area, "5 MINUTES REMAINING", Color::Yellow),
        Dialog::OneMinuteWarning => draw_time_warning(f, area, "1 MINUTE REMAINING", Color::Red),
        Dialog::SubmitFailed(reason) => draw_submit_failed(f, area, reason),
        Dialog::Help => draw_help(f, area),
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn render_box(f: &mut Frame, area: Rect, width: u16, lines: Vec<Line>, color: Color) {
    let rect = centered_rect(width, lines.len() as u16 + 2, area);
    f.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let widget = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(widget, rect);
}

fn confirm_cancel_line() -> Line<'static> {
    Line::from(vec![
        Span::styled("   [Enter] Submit anyway", Style::default().fg(Color::Green)),
        Span::raw("    "),
        Span::styled("[Esc] Keep working", Style::default().fg(Color::DarkGray)),
    ])
}

fn draw_confirm_unanswered(f: &mut Frame, area: Rect, positions: &[usize]) {
    let listed: Vec<String> = positions.iter().map(|p| p.to_string()).collect();
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Submit your quiz?",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "   You have {} unanswered question(s): {}",
            positions.len(),
            listed.join(", ")
        )),
        Line::from(""),
        confirm_cancel_line(),
    ];
    render_box(f, area, 56, lines, Color::Yellow);
}

fn draw_time_warning(f: &mut Frame, area: Rect, headline: &str, color: Color) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("   ⚠  {}", headline),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("   Your quiz will be submitted"),
        Line::from("   automatically when time runs out."),
        Line::from(""),
        Line::from(Span::styled(
            "          [Enter] Continue",
            Style::default().fg(Color::Green),
        )),
    ];
    render_box(f, area, 42, lines, color);
}

fn draw_submit_failed(f: &mut Frame, area: Rect, reason: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   ✗  Submission failed",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("   {}", reason)),
        Line::from(""),
        Line::from("   Your answers are kept. Submit again to retry."),
        Line::from(""),
        Line::from(Span::styled(
            "          [Enter] Continue",
            Style::default().fg(Color::Green),
        )),
    ];
    render_box(f, area, 60, lines, Color::Red);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Key Bindings",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("   ←/→        Previous/Next question"),
        Line::from("   ↑/↓        Move between choices"),
        Line::from("   Enter      Select highlighted choice"),
        Line::from("   a-z        Select choice by letter"),
        Line::from("   Ctrl+S     Submit (last question)"),
        Line::from("   Ctrl+Q     Quit without submitting"),
        Line::from("   ?          This help"),
        Line::from("   Esc        Close dialog"),
        Line::from(""),
        Line::from(Span::styled(
            "        [Esc] Close",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    render_box(f, area, 44, lines, Color::Cyan);
}
