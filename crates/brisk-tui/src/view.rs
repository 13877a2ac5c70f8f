//! Declarative view model.
//!
//! `compose` reads `AppState` and produces everything the renderer draws,
//! so the composed output can be asserted on without a terminal.

use brisk_core::data::ChartSeries;
use chrono::{DateTime, Local};

use crate::dashboard::ModuleState;
use crate::showcase::{self, ListView};
use crate::state::{AppState, Focus};
use crate::statusline::StatusLine;

pub const TITLE: &str = "Brisk Performance Showcase";

pub const OPTIMIZATIONS: &[&str] = &[
    "Memoized derived data (computed once per input identity)",
    "Debounced input handling",
    "Lazy loading for the heavy dashboard",
    "Deferred chart population",
    "Bounded list rendering",
];

pub const TEXT_LABEL: &str = "Type something (debounced)";
pub const EXPENSIVE_HEADING: &str = "Expensive Calculation Results";
pub const LOADING_DASHBOARD: &str = "Loading heavy dashboard...";
pub const LOADING_CHART: &str = "Loading chart data...";
pub const METRICS_HEADING: &str = "Performance Metrics";

/// What the dashboard area shows.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardPanel {
    Hidden,
    Loading,
    Failed {
        error: String,
    },
    Ready {
        heading: String,
        caption: String,
        chart_title: String,
        /// `None` until the population delay has elapsed.
        chart: Option<ChartSeries>,
    },
}

#[derive(Debug, Clone)]
pub struct ViewModel {
    pub focus: Focus,
    pub counter_label: String,
    pub text: String,
    pub cursor: usize,
    pub expensive: Vec<String>,
    pub list: ListView,
    pub toggle_label: String,
    pub dashboard: DashboardPanel,
    /// Metric rows, absent until the probe has a snapshot.
    pub metrics: Option<Vec<(&'static str, String)>>,
    pub status: StatusLine,
}

pub fn compose(app: &AppState, now: &DateTime<Local>) -> ViewModel {
    ViewModel {
        focus: app.focus,
        counter_label: format!("Counter: {}", app.counter),
        text: app.input.text().to_string(),
        cursor: app.input.field.cursor(),
        expensive: showcase::expensive_rows(&app.showcase),
        list: showcase::list_view(&app.showcase, now),
        toggle_label: toggle_label(app.dashboard.visible),
        dashboard: dashboard_panel(app),
        metrics: app.metrics.snapshot().map(|s| s.rows().to_vec()),
        status: app.status(),
    }
}

fn toggle_label(visible: bool) -> String {
    let verb = if visible { "Hide" } else { "Show" };
    format!("{verb} Heavy Dashboard (Lazy Loaded)")
}

fn dashboard_panel(app: &AppState) -> DashboardPanel {
    let dashboard = &app.dashboard;
    if !dashboard.visible {
        return DashboardPanel::Hidden;
    }
    if let Some(view) = &dashboard.view {
        return DashboardPanel::Ready {
            heading: view.heading(),
            caption: view.module.caption.clone(),
            chart_title: view.module.chart_title.clone(),
            chart: view.chart().cloned(),
        };
    }
    match &dashboard.module {
        ModuleState::Failed { error } => DashboardPanel::Failed {
            error: error.clone(),
        },
        // Loaded modules are mounted as soon as they become visible.
        ModuleState::NotLoaded | ModuleState::Loading { .. } | ModuleState::Loaded(_) => {
            DashboardPanel::Loading
        }
    }
}
