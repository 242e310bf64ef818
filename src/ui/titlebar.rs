use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::App;
use crate::session::FIVE_MINUTE_MARK;
use crate::timer::format_clock;

pub fn draw_titlebar(f: &mut Frame, area: Rect, app: &App) {
    let secs = app.view().seconds_remaining;
    let timer_label = format!(" {} remaining ", format_clock(secs));

    // Red once under five minutes.
    let timer_span = if secs < FIVE_MINUTE_MARK {
        Span::styled(
            timer_label.clone(),
            Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(timer_label.clone(), Style::default().fg(Color::Rgb(200, 200, 120)))
    };

    let title_text = format!("[ {} ]", app.quiz.title);
    let title_span = Span::styled(
        title_text.clone(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    // Center the title, right-align the clock
    let available = area.width as usize;
    let title_len = title_text.chars().count();
    let timer_len = timer_label.chars().count();
    let center_pad = available.saturating_sub(title_len) / 2;
    let right_pad = available.saturating_sub(center_pad + title_len + timer_len);

    let line = Line::from(vec![
        Span::raw(" ".repeat(center_pad)),
        title_span,
        Span::raw(" ".repeat(right_pad)),
        timer_span,
    ]);

    let widget = Paragraph::new(line)
        .style(Style::default().bg(Color::DarkGray))
        .alignment(Alignment::Left);
    f.render_widget(widget, area);
}
