//! Paging over the basket list, newest baskets first.

use std::{
    future::Future,
    sync::{Arc, Mutex},
};

use rusqlite::Connection;

use crate::{
    Error,
    basket::{BasketOverview, get_baskets_page},
    pagination::{LoadParams, Page, PageKey, PageWindow, PagingSource},
};

/// An ordered store of baskets that can be read by offset.
pub trait BasketSource: Send + Sync {
    /// Fetch up to `limit` baskets starting at `offset` (never negative).
    fn fetch_baskets(
        &self,
        offset: PageKey,
        limit: PageKey,
    ) -> impl Future<Output = Result<Vec<BasketOverview>, Error>> + Send;
}

/// Reads baskets from the application's SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteBasketSource {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteBasketSource {
    /// Create a basket source sharing `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl BasketSource for SqliteBasketSource {
    async fn fetch_baskets(
        &self,
        offset: PageKey,
        limit: PageKey,
    ) -> Result<Vec<BasketOverview>, Error> {
        let connection = self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })?;

        get_baskets_page(offset, limit, &connection)
    }
}

/// Loads pages of [BasketOverview]s from a [BasketSource].
#[derive(Debug, Clone)]
pub struct BasketPagingSource<S> {
    source: S,
}

impl<S: BasketSource> BasketPagingSource<S> {
    /// Create a paging source reading from `source`.
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

impl<S: BasketSource> PagingSource for BasketPagingSource<S> {
    type Item = BasketOverview;

    async fn load(&self, params: LoadParams) -> Result<Page<BasketOverview>, Error> {
        let window = PageWindow::resolve(params);

        tracing::debug!(
            "loading baskets from offset {} (limit {})",
            window.start,
            window.limit
        );

        let items = self
            .source
            .fetch_baskets(window.start, window.limit)
            .await?;

        Ok(Page {
            items,
            prev_key: window.prev_key,
            next_key: window.next_key,
        })
    }
}
