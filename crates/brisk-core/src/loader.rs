//! Lazy loading capability for the heavy dashboard.
//!
//! The view only knows "activate, show a loading indicator, then render".
//! Where the module comes from is up to the injected `DashboardLoader`.

use std::time::Duration;

use anyhow::Result;
use futures_util::FutureExt;
use futures_util::future::BoxFuture;

/// Everything the dashboard needs once it has been fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardModule {
    pub heading: String,
    pub caption: String,
    pub chart_title: String,
    pub series_name: String,
    pub chart_points: usize,
    pub populate_delay: Duration,
}

impl DashboardModule {
    pub fn new(chart_points: usize, populate_delay: Duration) -> Self {
        Self {
            heading: "Heavy Dashboard".to_string(),
            caption: "This view is lazy-loaded to keep startup light.".to_string(),
            chart_title: "Performance Optimized Chart".to_string(),
            series_name: "Sample Data".to_string(),
            chart_points,
            populate_delay,
        }
    }
}

/// Fetches the dashboard module on first activation.
pub trait DashboardLoader: Send + Sync {
    fn load(&self) -> BoxFuture<'static, Result<DashboardModule>>;
}

/// Loader that "fetches" the module after a fixed latency.
#[derive(Debug, Clone)]
pub struct SimulatedLoader {
    latency: Duration,
    module: DashboardModule,
}

impl SimulatedLoader {
    pub fn new(latency: Duration, module: DashboardModule) -> Self {
        Self { latency, module }
    }
}

impl DashboardLoader for SimulatedLoader {
    fn load(&self) -> BoxFuture<'static, Result<DashboardModule>> {
        let latency = self.latency;
        let module = self.module.clone();
        async move {
            tracing::debug!(?latency, "loading dashboard module");
            tokio::time::sleep(latency).await;
            Ok(module)
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::Instant;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_simulated_loader_waits_for_latency() {
        let module = DashboardModule::new(50, Duration::from_millis(500));
        let loader = SimulatedLoader::new(Duration::from_millis(250), module.clone());

        let start = Instant::now();
        let loaded = loader.load().await.unwrap();
        assert_eq!(loaded, module);
        assert!(start.elapsed() >= Duration::from_millis(250));
    }
}
