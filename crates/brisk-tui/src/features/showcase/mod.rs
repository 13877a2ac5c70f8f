//! Memoized showcase panels (expensive calculation results, large list).

mod state;
mod view;

pub use state::{ShowcaseSizes, ShowcaseState};
pub use view::{ListView, expensive_rows, list_view};
