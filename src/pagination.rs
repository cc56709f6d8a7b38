//! This module defines the common functionality for paging data.
//!
//! Pages are addressed by an integer offset key. A page loaded from offset
//! `k` with `n` items requested reports `k + n` as its next key even when the
//! store returned fewer items, so consumers keep requesting pages until an
//! empty (or short) one arrives.

use std::future::Future;

use crate::Error;

/// The offset of the first item of a page.
pub type PageKey = i64;

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The number of items to request per page when not specified.
    pub page_size: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self { page_size: 20 }
    }
}

/// A request for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadParams {
    /// The offset to start from, `None` for the first page.
    pub key: Option<PageKey>,
    /// How many items to request.
    pub load_size: u32,
}

impl LoadParams {
    /// Request the first page.
    pub fn initial(load_size: u32) -> Self {
        Self {
            key: None,
            load_size,
        }
    }
}

/// A loaded page of items and the keys of its neighbours.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// The items in the page, in store order.
    pub items: Vec<T>,
    /// `None` when the page starts at offset zero.
    pub prev_key: Option<PageKey>,
    /// Always `start + load_size`, even for a short page.
    pub next_key: Option<PageKey>,
}

/// The pages a consumer has loaded so far and where it is looking.
#[derive(Debug, Clone, PartialEq)]
pub struct PagingState<T> {
    /// Loaded pages in order.
    pub pages: Vec<Page<T>>,
    /// The index into the concatenated pages that was most recently accessed.
    pub anchor_position: Option<usize>,
}

impl<T> PagingState<T> {
    /// The loaded page containing the item at `position`, if any.
    pub fn page_containing(&self, position: usize) -> Option<&Page<T>> {
        let mut page_start = 0;

        for page in &self.pages {
            let page_end = page_start + page.items.len();

            if position < page_end {
                return Some(page);
            }

            page_start = page_end;
        }

        None
    }
}

/// The resolved offsets for a [LoadParams].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// The offset of the first item to fetch, never negative.
    pub start: PageKey,
    /// How many items to fetch.
    pub limit: PageKey,
    /// The previous key of the resolved page.
    pub prev_key: Option<PageKey>,
    /// The next key of the resolved page.
    pub next_key: Option<PageKey>,
}

impl PageWindow {
    /// Resolve the offsets for `params`, clamping negative keys to zero.
    pub fn resolve(params: LoadParams) -> Self {
        let start = params.key.unwrap_or(0).max(0);
        let limit = PageKey::from(params.load_size);

        Self {
            start,
            limit,
            prev_key: if start == 0 { None } else { Some(start) },
            next_key: Some(start.saturating_add(limit)),
        }
    }
}

/// A windowed, key based source of pages.
pub trait PagingSource: Send + Sync {
    /// The type of the items in a page.
    type Item;

    /// Load the page described by `params`.
    ///
    /// # Errors
    /// Errors from the backing store are returned unchanged, there is no retry.
    fn load(
        &self,
        params: LoadParams,
    ) -> impl Future<Output = Result<Page<Self::Item>, Error>> + Send;

    /// The key to reload from after the data is invalidated.
    ///
    /// This is the previous key of the page containing the anchor position,
    /// or `None` (start over) if there is no anchor or no loaded page covers it.
    fn refresh_key(&self, state: &PagingState<Self::Item>) -> Option<PageKey> {
        state
            .anchor_position
            .and_then(|anchor| state.page_containing(anchor))
            .and_then(|page| page.prev_key)
    }
}

#[cfg(test)]
mod tests {
    use super::{LoadParams, Page, PageWindow, PagingState};

    fn params(key: Option<i64>, load_size: u32) -> LoadParams {
        LoadParams { key, load_size }
    }

    #[test]
    fn first_page_has_no_previous_key() {
        let window = PageWindow::resolve(params(Some(0), 20));

        assert_eq!(window.start, 0);
        assert_eq!(window.prev_key, None);
        assert_eq!(window.next_key, Some(20));
    }

    #[test]
    fn missing_key_starts_at_zero() {
        let window = PageWindow::resolve(LoadParams::initial(20));

        assert_eq!(window.start, 0);
        assert_eq!(window.prev_key, None);
        assert_eq!(window.next_key, Some(20));
    }

    #[test]
    fn later_page_uses_its_start_as_previous_key() {
        let window = PageWindow::resolve(params(Some(20), 20));

        assert_eq!(window.start, 20);
        assert_eq!(window.prev_key, Some(20));
        assert_eq!(window.next_key, Some(40));
    }

    #[test]
    fn negative_key_is_clamped_to_zero() {
        let window = PageWindow::resolve(params(Some(-15), 10));

        assert_eq!(window.start, 0);
        assert_eq!(window.prev_key, None);
        assert_eq!(window.next_key, Some(10));
    }

    #[test]
    fn next_key_is_start_plus_load_size() {
        for key in [0, 1, 7, 20, 1000] {
            for load_size in [1, 5, 20, 100] {
                let window = PageWindow::resolve(params(Some(key), load_size));

                assert_eq!(window.next_key, Some(key + load_size as i64));
            }
        }
    }

    fn page(len: usize, prev_key: Option<i64>) -> Page<usize> {
        Page {
            items: (0..len).collect(),
            prev_key,
            next_key: None,
        }
    }

    #[test]
    fn page_containing_finds_covering_page() {
        let state = PagingState {
            pages: vec![page(3, None), page(0, Some(3)), page(3, Some(3)), page(2, Some(6))],
            anchor_position: None,
        };

        assert_eq!(state.page_containing(0).map(|p| p.prev_key), Some(None));
        assert_eq!(state.page_containing(3).map(|p| p.prev_key), Some(Some(3)));
        assert_eq!(state.page_containing(7).map(|p| p.prev_key), Some(Some(6)));
        assert_eq!(state.page_containing(8), None);
    }
}
