use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::App;

pub fn draw_sidebar(f: &mut Frame, area: Rect, app: &App) {
    let attempt = app.session.attempt();
    let current = attempt.current_index();
    let visible_rows = area.height.saturating_sub(1) as usize;

    // Keep the current question on screen.
    let scroll_offset = (current + 1).saturating_sub(visible_rows);
    let title_max_len = area.width.saturating_sub(10) as usize;

    let mut lines: Vec<Line> = Vec::new();
    for (i, q) in app.quiz.questions.iter().enumerate().skip(scroll_offset) {
        if lines.len() >= visible_rows {
            break;
        }

        let answered = attempt.answer_for(&q.id).is_some();
        let (icon, color) = if answered {
            ("●", Color::Green)
        } else {
            ("○", Color::White)
        };

        let is_current = i == current;
        let style = if is_current {
            Style::default()
                .fg(Color::White)
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let mut title: String = q.title.chars().take(title_max_len).collect();
        if q.title.chars().count() > title_max_len && title_max_len > 0 {
            title.pop();
            title.push('…');
        }

        lines.push(Line::from(vec![
            Span::styled(if is_current { " ▸ " } else { "   " }, style),
            Span::styled(format!("{} ", icon), style.fg(color)),
            Span::styled(format!("{:>2}. ", i + 1), style),
            Span::styled(title, style),
        ]));
    }

    let block = Block::default()
        .borders(Borders::RIGHT)
        .title(format!(" {} Questions ", app.quiz.questions.len()))
        .title_style(Style::default().add_modifier(Modifier::BOLD));

    let widget = Paragraph::new(lines).block(block);
    f.render_widget(widget, area);
}
