use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::App;

pub fn draw_keybar(f: &mut Frame, area: Rect, app: &App) {
    let controls = app.view().controls;

    let mut bindings: Vec<(&str, &str)> = Vec::new();
    if controls.backward {
        bindings.push(("←", "previous"));
    }
    if controls.forward {
        bindings.push(("→", "next"));
    }
    bindings.push(("a-z", "answer"));
    bindings.push(("↑/↓", "choice"));
    if controls.submit {
        bindings.push(("Ctrl+S", "submit"));
    }
    bindings.push(("?", "help"));
    bindings.push(("Ctrl+Q", "quit"));

    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for (i, (key, action)) in bindings.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        spans.push(Span::styled(
            key.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {}", action)));
    }

    let line = Line::from(spans);
    let widget = Paragraph::new(line).style(Style::default().bg(Color::Rgb(20, 20, 20)));
    f.render_widget(widget, area);
}
