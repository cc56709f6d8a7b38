//! Live query results that refresh whenever the database changes.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};

use crate::Error;

/// A stream of query snapshots.
///
/// A fresh snapshot is produced when the subscription starts and again after
/// every write made through [crate::AppState::write]. A failed query is
/// delivered once and ends the stream. Dropping the subscription (or calling
/// [Subscription::cancel]) stops the background task.
#[derive(Debug)]
pub struct Subscription<T> {
    receiver: mpsc::Receiver<Result<T, Error>>,
    task: JoinHandle<()>,
}

impl<T> Subscription<T>
where
    T: Send + 'static,
{
    /// Start re-running `query` on each change notification.
    ///
    /// Must be called from within a tokio runtime.
    pub(crate) fn spawn<F>(
        connection: Arc<Mutex<Connection>>,
        mut changes: watch::Receiver<u64>,
        query: F,
    ) -> Self
    where
        F: Fn(&Connection) -> Result<T, Error> + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel(1);

        let task = tokio::spawn(async move {
            loop {
                let snapshot = run_query(&connection, &query);
                let failed = snapshot.is_err();

                if sender.send(snapshot).await.is_err() {
                    tracing::debug!("subscriber went away, stopping subscription");
                    break;
                }

                if failed {
                    break;
                }

                if changes.changed().await.is_err() {
                    tracing::debug!("change notifier dropped, stopping subscription");
                    break;
                }
            }
        });

        Self { receiver, task }
    }
}

impl<T> Subscription<T> {
    /// Wait for the next snapshot.
    ///
    /// Returns `None` once the subscription has ended.
    pub async fn next(&mut self) -> Option<Result<T, Error>> {
        self.receiver.recv().await
    }

    /// Stop receiving snapshots.
    pub fn cancel(self) {
        drop(self);
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn run_query<T, F>(connection: &Mutex<Connection>, query: &F) -> Result<T, Error>
where
    F: Fn(&Connection) -> Result<T, Error>,
{
    let connection = connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError
    })?;

    query(&connection)
}
