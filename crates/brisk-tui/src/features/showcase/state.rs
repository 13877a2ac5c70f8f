//! Memoized showcase data.
//!
//! Every derived value sits behind its own `DerivedDataCache`. `refresh` is
//! called on every frame; with unchanged inputs it costs four key
//! comparisons and never regenerates anything.

use std::sync::Arc;

use brisk_core::config::Config;
use brisk_core::data;
use brisk_core::memo::{DerivedDataCache, Identity};
use chrono::{DateTime, Local};

/// Sizes taken from configuration.
#[derive(Debug, Clone, Copy)]
pub struct ShowcaseSizes {
    pub large_data_len: usize,
    pub expensive_range: u64,
    pub expensive_preview: usize,
    pub list_len: usize,
    pub list_preview: usize,
}

impl From<&Config> for ShowcaseSizes {
    fn from(config: &Config) -> Self {
        Self {
            large_data_len: config.large_data_len,
            expensive_range: config.expensive_range,
            expensive_preview: config.expensive_preview,
            list_len: config.list_len,
            list_preview: config.list_preview,
        }
    }
}

pub struct ShowcaseState {
    pub sizes: ShowcaseSizes,
    large_data: DerivedDataCache<(), Arc<[f64]>>,
    processed: DerivedDataCache<Identity<[f64]>, Arc<[f64]>>,
    list_items: DerivedDataCache<(), Arc<[String]>>,
    list_stamp: DerivedDataCache<(), DateTime<Local>>,
}

impl ShowcaseState {
    pub fn new(sizes: ShowcaseSizes) -> Self {
        Self {
            sizes,
            large_data: DerivedDataCache::new(),
            processed: DerivedDataCache::new(),
            list_items: DerivedDataCache::new(),
            list_stamp: DerivedDataCache::new(),
        }
    }

    /// Brings every derived value up to date with its inputs.
    pub fn refresh(&mut self) {
        let ShowcaseSizes {
            large_data_len,
            expensive_range,
            list_len,
            ..
        } = self.sizes;

        let data = Arc::clone(self.large_data.get_or_compute((), |()| {
            tracing::debug!(len = large_data_len, "generating large data");
            data::random_sequence(&mut rand::rng(), large_data_len)
        }));
        self.processed.get_or_compute(Identity::of(&data), |input| {
            tracing::debug!(len = input.get().len(), "processing large data");
            data::expensive_transform(input.get(), expensive_range)
        });
        self.list_items
            .get_or_compute((), |()| data::list_labels(list_len));
        self.list_stamp.get_or_compute((), |()| Local::now());
    }

    pub fn large_data(&self) -> Option<&Arc<[f64]>> {
        self.large_data.peek()
    }

    pub fn processed(&self) -> Option<&Arc<[f64]>> {
        self.processed.peek()
    }

    pub fn list_items(&self) -> Option<&Arc<[String]>> {
        self.list_items.peek()
    }

    pub fn list_stamp(&self) -> Option<&DateTime<Local>> {
        self.list_stamp.peek()
    }

    /// Total compute runs across all caches.
    pub fn computations(&self) -> u64 {
        self.large_data.computations()
            + self.processed.computations()
            + self.list_items.computations()
            + self.list_stamp.computations()
    }
}
