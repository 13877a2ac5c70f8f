//! Heavy dashboard slice state.
//!
//! The module is fetched lazily the first time the dashboard is shown and
//! kept afterwards. Each time the dashboard becomes visible a fresh
//! `DashboardView` is mounted; hiding it disposes the view together with
//! its pending population timer.

use std::time::Instant;

use brisk_core::data::{self, ChartSeries};
use brisk_core::loader::DashboardModule;
use brisk_core::memo::DerivedDataCache;
use brisk_core::schedule::{DeferredSlot, Ticket, TimerCommand};
use chrono::{DateTime, Local};

use crate::common::TaskId;

/// Lazy module lifecycle.
#[derive(Debug, Clone, Default)]
pub enum ModuleState {
    #[default]
    NotLoaded,
    Loading {
        task: TaskId,
    },
    Loaded(DashboardModule),
    Failed {
        error: String,
    },
}

/// A mounted dashboard instance.
#[derive(Debug)]
pub struct DashboardView {
    pub module: DashboardModule,
    pub mounted_at: DateTime<Local>,
    chart_config: DerivedDataCache<(), ChartSeries>,
    chart_data: Option<ChartSeries>,
    populate: DeferredSlot<()>,
}

impl DashboardView {
    /// Mounts a view: computes the chart config and arms the population delay.
    pub fn mount(module: DashboardModule, now: Instant) -> (Self, Vec<TimerCommand>) {
        let mounted_at = Local::now();
        let mut view = Self {
            module,
            mounted_at,
            chart_config: DerivedDataCache::new(),
            chart_data: None,
            populate: DeferredSlot::new(),
        };
        let (name, points) = (view.module.series_name.clone(), view.module.chart_points);
        let today = mounted_at.date_naive();
        view.chart_config.get_or_compute((), |()| {
            ChartSeries::generate(&mut rand::rng(), &name, today, points)
        });
        let delay = view.module.populate_delay;
        let commands = view.populate.arm(now, delay, ());
        (view, commands)
    }

    /// Copies the chart config into the displayed data if `ticket` is this
    /// view's pending population step.
    pub fn populate(&mut self, ticket: Ticket) -> bool {
        if self.populate.fire(ticket).is_none() {
            return false;
        }
        self.chart_data = self.chart_config.peek().cloned();
        true
    }

    pub fn dispose(&mut self) -> Option<TimerCommand> {
        self.populate.cancel()
    }

    /// Chart data once populated.
    pub fn chart(&self) -> Option<&ChartSeries> {
        self.chart_data.as_ref().filter(|c| !c.is_empty())
    }

    pub fn is_populating(&self) -> bool {
        self.populate.is_pending()
    }

    pub fn heading(&self) -> String {
        format!(
            "{} - {}",
            self.module.heading,
            data::long_timestamp(&self.mounted_at)
        )
    }
}

#[derive(Debug, Default)]
pub struct DashboardState {
    pub visible: bool,
    pub module: ModuleState,
    pub view: Option<DashboardView>,
    /// Number of views mounted so far.
    pub mounts: u64,
}

impl DashboardState {
    pub fn is_loading(&self) -> bool {
        matches!(self.module, ModuleState::Loading { .. })
    }

    pub fn is_populating(&self) -> bool {
        self.view.as_ref().is_some_and(DashboardView::is_populating)
    }
}
