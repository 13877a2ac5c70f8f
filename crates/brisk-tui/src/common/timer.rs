/// Owner of a deferred callback, used to route a fired ticket back to the
/// state machine that armed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Quiet interval of the text input debounce gate.
    Debounce,
    /// Artificial data-population delay of a mounted dashboard.
    DashboardPopulate,
    /// Deferred render-time step of the metrics probe.
    MetricsStep,
}
