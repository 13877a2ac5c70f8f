//! Declarative content for the showcase panels.

use brisk_core::data;
use chrono::{DateTime, Local};

use super::state::ShowcaseState;

/// Large list panel content, limited to the preview prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub heading: String,
    pub rows: Vec<String>,
    pub more: Option<String>,
}

/// First `expensive_preview` processed values.
pub fn expensive_rows(state: &ShowcaseState) -> Vec<String> {
    state
        .processed()
        .map(|items| {
            items
                .iter()
                .take(state.sizes.expensive_preview)
                .map(|v| format!("{v:.4}"))
                .collect()
        })
        .unwrap_or_default()
}

/// List rows rendered relative to `now`.
pub fn list_view(state: &ShowcaseState, now: &DateTime<Local>) -> ListView {
    let items = state.list_items().map(|i| &i[..]).unwrap_or_default();
    let stamp = state.list_stamp().unwrap_or(now);
    let ago = data::time_ago(stamp, now);
    let preview = state.sizes.list_preview;

    let rows = items
        .iter()
        .take(preview)
        .enumerate()
        .map(|(i, item)| format!("Item {i}: {} - {ago}", data::capitalize(item)))
        .collect();
    let more = (items.len() > preview)
        .then(|| format!("... and {} more items", items.len() - preview));

    ListView {
        heading: format!("Large List ({} items)", items.len()),
        rows,
        more,
    }
}

#[cfg(test)]
mod tests {
    use brisk_core::config::Config;

    use super::*;
    use crate::features::showcase::ShowcaseSizes;

    #[test]
    fn test_views_are_limited_to_prefix() {
        let mut state = ShowcaseState::new(ShowcaseSizes::from(&Config::default()));
        state.refresh();

        let rows = expensive_rows(&state);
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|r| r.starts_with("495")));

        let list = list_view(&state, &Local::now());
        assert_eq!(list.heading, "Large List (100 items)");
        assert_eq!(list.rows.len(), 20);
        assert_eq!(list.rows[0], "Item 0: Item-0 - less than a minute ago");
        assert_eq!(list.more.as_deref(), Some("... and 80 more items"));
    }

    #[test]
    fn test_short_list_has_no_more_hint() {
        let sizes = ShowcaseSizes {
            list_len: 3,
            ..ShowcaseSizes::from(&Config::default())
        };
        let mut state = ShowcaseState::new(sizes);
        state.refresh();
        let list = list_view(&state, &Local::now());
        assert_eq!(list.rows.len(), 3);
        assert!(list.more.is_none());
    }

    #[test]
    fn test_empty_before_first_refresh() {
        let state = ShowcaseState::new(ShowcaseSizes::from(&Config::default()));
        assert!(expensive_rows(&state).is_empty());
        assert_eq!(list_view(&state, &Local::now()).heading, "Large List (0 items)");
    }
}
