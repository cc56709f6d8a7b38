//! Implements a struct that holds the shared state of the application.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;
use tokio::sync::watch;

use crate::{
    Error,
    basket::{BasketPagingSource, SqliteBasketSource},
    db::initialize,
    pagination::PaginationConfig,
    subscription::Subscription,
};

/// The state shared by everything that talks to the database.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The config that controls how many items make up a page.
    pub pagination_config: PaginationConfig,

    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,

    /// Bumped after every successful write so subscriptions can refresh.
    changes: Arc<watch::Sender<u64>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for
    /// the domain models and writing default preferences.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection, pagination_config: PaginationConfig) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let (changes, _) = watch::channel(0);

        Ok(Self {
            pagination_config,
            db_connection: Arc::new(Mutex::new(db_connection)),
            changes: Arc::new(changes),
        })
    }

    /// Run a read-only operation against the database.
    pub fn read<T>(&self, operation: impl FnOnce(&Connection) -> Result<T, Error>) -> Result<T, Error> {
        let connection = self.lock()?;

        operation(&connection)
    }

    /// Run an operation that modifies the database.
    ///
    /// If the operation succeeds, every live [Subscription] re-runs its query.
    pub fn write<T>(
        &self,
        operation: impl FnOnce(&Connection) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let result = {
            let connection = self.lock()?;
            operation(&connection)
        };

        if result.is_ok() {
            self.changes.send_modify(|revision| *revision += 1);
        }

        result
    }

    /// Subscribe to the result of `query`, refreshed after every write.
    ///
    /// Must be called from within a tokio runtime.
    pub fn subscribe<T, F>(&self, query: F) -> Subscription<T>
    where
        T: Send + 'static,
        F: Fn(&Connection) -> Result<T, Error> + Send + 'static,
    {
        Subscription::spawn(self.db_connection.clone(), self.changes.subscribe(), query)
    }

    /// A paging source over the baskets in this database.
    pub fn basket_paging_source(&self) -> BasketPagingSource<SqliteBasketSource> {
        BasketPagingSource::new(SqliteBasketSource::new(self.db_connection.clone()))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.db_connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::{
        AppState, EntityName, Error,
        category::{create_category, get_all_categories},
        pagination::{LoadParams, PaginationConfig, PagingSource},
        preferences::{Preference, get_preference},
    };

    fn get_test_state() -> AppState {
        AppState::new(
            Connection::open_in_memory().unwrap(),
            PaginationConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn new_initializes_database() {
        let state = get_test_state();

        let locale = state
            .read(|conn| get_preference(Preference::Locale.key(), conn))
            .unwrap();

        assert!(locale.is_some());
    }

    #[test]
    fn failed_write_is_returned() {
        let state = get_test_state();

        let result: Result<(), Error> = state.write(|_| Err(Error::NotFound));

        assert_eq!(result, Err(Error::NotFound));
    }

    #[tokio::test]
    async fn subscription_refreshes_after_write() {
        let state = get_test_state();
        let mut subscription = state.subscribe(get_all_categories);

        let initial = subscription.next().await.unwrap().unwrap();
        assert!(initial.is_empty());

        state
            .write(|conn| create_category(EntityName::new_unchecked("Dairy"), conn))
            .unwrap();

        let updated = subscription.next().await.unwrap().unwrap();
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].name.as_ref(), "Dairy");
    }

    #[tokio::test]
    async fn failed_query_ends_subscription() {
        let state = get_test_state();
        let mut subscription = state.subscribe(|_| -> Result<u32, Error> { Err(Error::NotFound) });

        assert_eq!(subscription.next().await, Some(Err(Error::NotFound)));
        assert_eq!(subscription.next().await, None);
    }

    #[tokio::test]
    async fn cancelled_subscription_leaves_state_usable() {
        let state = get_test_state();
        let subscription = state.subscribe(get_all_categories);

        subscription.cancel();

        state
            .write(|conn| create_category(EntityName::new_unchecked("Dairy"), conn))
            .unwrap();
        assert_eq!(state.read(get_all_categories).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn paging_source_reads_shared_connection() {
        let state = get_test_state();
        let source = state.basket_paging_source();

        let page = source
            .load(LoadParams::initial(state.pagination_config.page_size))
            .await
            .unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.next_key, Some(20));
    }
}
