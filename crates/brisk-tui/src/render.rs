//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, compose the view model and draw it to a
//! ratatui `Frame`. They never mutate state or return effects.

use brisk_core::data::ChartSeries;
use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, BorderType, Borders, Chart, Dataset, GraphType, Paragraph};

use crate::common::text::{truncate_with_ellipsis, width_of_prefix};
use crate::state::{AppState, Focus};
use crate::statusline::render_status_line;
use crate::view::{self, DashboardPanel, ViewModel};

/// Height of status line.
const STATUS_HEIGHT: u16 = 1;

/// Height of the button/text-field row (borders included).
const CONTROLS_HEIGHT: u16 = 3;

/// Height of the dashboard area while it is shown.
const DASHBOARD_HEIGHT: u16 = 16;

/// Spinner frames for the loading indicator.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let model = view::compose(app, &Local::now());
    let area = frame.area();

    let header_height = view::OPTIMIZATIONS.len() as u16 + 1;
    let dashboard_height = if model.dashboard == DashboardPanel::Hidden {
        0
    } else {
        DASHBOARD_HEIGHT
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_height),    // Title + optimizations
            Constraint::Length(CONTROLS_HEIGHT),  // Counter, text field, toggle
            Constraint::Min(3),                   // Expensive results + list
            Constraint::Length(dashboard_height), // Heavy dashboard
            Constraint::Length(STATUS_HEIGHT),    // Status line
        ])
        .split(area);

    render_header(frame, chunks[0]);
    render_controls(&model, frame, chunks[1]);
    render_panels(&model, frame, chunks[2]);
    if dashboard_height > 0 {
        render_dashboard(&model.dashboard, app.spinner_frame, frame, chunks[3]);
    }
    render_status_line(&model.status, frame, chunks[4]);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let mut lines = vec![Line::from(Span::styled(
        view::TITLE,
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    lines.extend(view::OPTIMIZATIONS.iter().map(|item| {
        Line::from(vec![
            Span::styled("  ✓ ", Style::default().fg(Color::Green)),
            Span::raw(*item),
        ])
    }));
    frame.render_widget(Paragraph::new(lines), area);
}

fn control_block(title: &str, focused: bool) -> Block<'static> {
    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
        .title(title.to_string())
}

fn render_controls(model: &ViewModel, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(20),
            Constraint::Min(20),
            Constraint::Length(42),
        ])
        .split(area);

    let counter = Paragraph::new(model.counter_label.as_str())
        .block(control_block("", model.focus == Focus::Counter));
    frame.render_widget(counter, chunks[0]);

    let text_focused = model.focus == Focus::Text;
    let inner_width = chunks[1].width.saturating_sub(2) as usize;
    let text = Paragraph::new(truncate_with_ellipsis(&model.text, inner_width))
        .block(control_block(view::TEXT_LABEL, text_focused));
    frame.render_widget(text, chunks[1]);
    if text_focused {
        let offset = width_of_prefix(&model.text, model.cursor).min(inner_width) as u16;
        frame.set_cursor_position((chunks[1].x + 1 + offset, chunks[1].y + 1));
    }

    let toggle = Paragraph::new(model.toggle_label.as_str())
        .block(control_block("", model.focus == Focus::DashboardToggle));
    frame.render_widget(toggle, chunks[2]);
}

fn render_panels(model: &ViewModel, frame: &mut Frame, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let metrics_height = model.metrics.as_ref().map_or(0, |rows| rows.len() as u16 + 2);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(metrics_height)])
        .split(columns[0]);

    let expensive: Vec<Line> = model.expensive.iter().map(|r| Line::raw(r.as_str())).collect();
    frame.render_widget(
        Paragraph::new(expensive).block(panel_block(view::EXPENSIVE_HEADING)),
        left[0],
    );

    if let Some(rows) = &model.metrics {
        let lines: Vec<Line> = rows
            .iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(format!("{label}: "), Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(value.as_str()),
                ])
            })
            .collect();
        frame.render_widget(
            Paragraph::new(lines).block(panel_block(view::METRICS_HEADING)),
            left[1],
        );
    }

    let mut lines: Vec<Line> = model.list.rows.iter().map(|r| Line::raw(r.as_str())).collect();
    if let Some(more) = &model.list.more {
        lines.push(Line::from(Span::styled(
            more.as_str(),
            Style::default().fg(Color::DarkGray),
        )));
    }
    frame.render_widget(
        Paragraph::new(lines).block(panel_block(&model.list.heading)),
        columns[1],
    );
}

fn panel_block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title.to_string())
}

fn render_dashboard(panel: &DashboardPanel, spinner_frame: usize, frame: &mut Frame, area: Rect) {
    match panel {
        DashboardPanel::Hidden => {}
        DashboardPanel::Loading => {
            let spinner = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
            let line = Line::from(vec![
                Span::styled(format!("{spinner} "), Style::default().fg(Color::Cyan)),
                Span::raw(view::LOADING_DASHBOARD),
            ]);
            frame.render_widget(Paragraph::new(line).block(panel_block("")), area);
        }
        DashboardPanel::Failed { error } => {
            let lines = vec![
                Line::from(Span::styled(
                    "Heavy dashboard failed to load",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::raw(error.as_str()),
                Line::from(Span::styled(
                    "Toggle the dashboard again to retry.",
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            frame.render_widget(Paragraph::new(lines).block(panel_block("")), area);
        }
        DashboardPanel::Ready {
            heading,
            caption,
            chart_title,
            chart,
        } => {
            let block = panel_block(heading);
            let inner = block.inner(area);
            frame.render_widget(block, area);

            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Min(1)])
                .split(inner);
            frame.render_widget(
                Paragraph::new(Span::styled(
                    caption.as_str(),
                    Style::default().fg(Color::DarkGray),
                )),
                rows[0],
            );
            match chart {
                Some(series) => render_chart(series, chart_title, frame, rows[1]),
                None => frame.render_widget(Paragraph::new(view::LOADING_CHART), rows[1]),
            }
        }
    }
}

fn render_chart(series: &ChartSeries, title: &str, frame: &mut Frame, area: Rect) {
    let points: Vec<(f64, f64)> = series
        .values
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, *v))
        .collect();
    let x_max = points.len().saturating_sub(1).max(1) as f64;
    let (_, y_max) = series.bounds().unwrap_or((0.0, 1.0));
    let y_max = y_max.max(1.0).ceil();

    let first = series.labels.first().map(String::as_str).unwrap_or_default();
    let last = series.labels.last().map(String::as_str).unwrap_or_default();

    let dataset = Dataset::default()
        .name(series.name.clone())
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(Block::default().title(title.to_string()))
        .x_axis(
            Axis::default()
                .bounds([0.0, x_max])
                .labels(vec![Span::raw(first.to_string()), Span::raw(last.to_string())])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([0.0, y_max])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format!("{:.0}", y_max / 2.0)),
                    Span::raw(format!("{y_max:.0}")),
                ])
                .style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use brisk_core::config::Config;
    use brisk_core::loader::DashboardModule;
    use brisk_core::metrics::EnvironmentCounters;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::common::TaskSeq;
    use crate::dashboard;

    struct Counters;

    impl EnvironmentCounters for Counters {
        fn payload_size_bytes(&self) -> Option<u64> {
            None
        }
        fn load_time(&self) -> Option<Duration> {
            None
        }
        fn memory_usage_bytes(&self) -> Option<u64> {
            None
        }
    }

    fn screen(app: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 48)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_renders_initial_screen() {
        let mut app = AppState::new(Config::default(), Arc::new(Counters));
        app.showcase.refresh();
        let screen = screen(&app);
        assert!(screen.contains("Counter: 0"));
        assert!(screen.contains(view::TEXT_LABEL));
        assert!(screen.contains("Show Heavy Dashboard (Lazy Loaded)"));
        assert!(screen.contains("Large List (100 items)"));
        assert!(screen.contains("Item 0: Item-0"));
        assert!(!screen.contains(view::METRICS_HEADING));
        assert!(screen.contains("debounce: idle"));
    }

    #[test]
    fn test_renders_dashboard_states() {
        let mut app = AppState::new(Config::default(), Arc::new(Counters));
        let mut seq = TaskSeq::default();
        let now = Instant::now();

        dashboard::toggle(&mut app.dashboard, &mut seq, now);
        assert!(screen(&app).contains(view::LOADING_DASHBOARD));

        let module = DashboardModule::new(50, Duration::from_millis(500));
        dashboard::handle_loaded(&mut app.dashboard, Ok(module), now);
        let screen = screen(&app);
        assert!(screen.contains("Heavy Dashboard - "));
        assert!(screen.contains(view::LOADING_CHART));
    }
}
