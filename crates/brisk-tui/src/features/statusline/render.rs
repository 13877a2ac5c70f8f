//! Status line rendering.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::state::StatusLine;

pub fn render_status_line(status: &StatusLine, frame: &mut Frame, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);
    let fps_style = if status.fps < 30.0 {
        Style::default().fg(Color::Red)
    } else if status.fps < 55.0 {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Green)
    };
    let debounce_style = if status.debounce == "pending" {
        Style::default().fg(Color::Yellow)
    } else {
        dim
    };

    let line = Line::from(vec![
        Span::styled("focus: ", dim),
        Span::raw(status.focus),
        Span::styled(" | debounce: ", dim),
        Span::styled(status.debounce, debounce_style),
        Span::styled(" | processed: ", dim),
        Span::raw(status.processed.to_string()),
        Span::styled(" | ", dim),
        Span::styled(format!("{:.1}fps", status.fps), fps_style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
