use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::App;

/// Wrap text to fit within `width` columns, breaking at word boundaries.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    let mut result = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            result.push(current);
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        result.push(current);
    }
    if result.is_empty() {
        result.push(String::new());
    }
    result
}

pub fn draw_question(f: &mut Frame, area: Rect, app: &App) {
    let Some(question) = app.current_question() else {
        let p = Paragraph::new("No questions").block(Block::default().borders(Borders::ALL));
        f.render_widget(p, area);
        return;
    };

    let view = app.view();
    let selected = app.session.attempt().answer_for(&question.id);
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        format!("  Question {} of {}", view.index + 1, view.total),
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(Span::styled(
        format!("  {}. {}", question.number, question.title),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    let body_width = (area.width as usize).saturating_sub(4);
    for paragraph in &question.body {
        for wline in wrap_text(paragraph, body_width) {
            lines.push(Line::from(format!("  {}", wline)));
        }
        lines.push(Line::from(""));
    }

    for (i, choice) in question.choices.iter().enumerate() {
        let is_selected = selected == Some(&choice.option_id());
        let is_cursor = i == app.choice_cursor;

        let radio = if is_selected { "(●)" } else { "( )" };
        let cursor = if is_cursor { "▸" } else { " " };

        let mut style = if is_selected {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        };
        if is_cursor {
            style = style.add_modifier(Modifier::BOLD);
        }

        // Prefix: " ▸ (●) a. "
        let prefix = format!(" {} {} {}. ", cursor, radio, choice.label);
        let prefix_len = prefix.chars().count();
        let text_width = (area.width as usize).saturating_sub(prefix_len + 2);
        for (li, wline) in wrap_text(&choice.text, text_width).into_iter().enumerate() {
            let lead = if li == 0 {
                prefix.clone()
            } else {
                " ".repeat(prefix_len)
            };
            lines.push(Line::from(vec![
                Span::styled(lead, style),
                Span::styled(wline, style),
            ]));
        }
    }

    let block = Block::default().borders(Borders::NONE);
    let widget = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}
