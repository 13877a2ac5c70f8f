use std::sync::Arc;

use brisk_core::loader::DashboardLoader;
use tokio_util::sync::CancellationToken;

use crate::events::UiEvent;

/// Runs the injected loader, aborting if the view is torn down first.
pub async fn dashboard_load(
    loader: Arc<dyn DashboardLoader>,
    cancel: Option<CancellationToken>,
) -> UiEvent {
    let cancel = cancel.unwrap_or_default();
    let result = tokio::select! {
        biased;
        () = cancel.cancelled() => Err("Dashboard load cancelled.".to_string()),
        result = loader.load() => result.map_err(|err| format!("{err:#}")),
    };
    UiEvent::DashboardLoaded(result)
}
