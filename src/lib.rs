//! Grocery Ledger is a library for tracking grocery and household spending.
//!
//! Shops, product categories, producers, products and their variants are
//! stored in a local SQLite database together with purchase baskets. On top of
//! that the library provides spending rankings, monthly trends, paging over
//! baskets, persisted preferences and locale-aware currency formatting.

#![warn(missing_docs)]

pub mod aggregation;
mod app_state;
pub mod basket;
pub mod category;
pub mod currency;
mod database_id;
pub mod db;
mod logging;
mod name;
pub mod pagination;
pub mod preferences;
pub mod producer;
pub mod product;
pub mod ranking;
pub mod shop;
mod subscription;
mod timezone;

pub use app_state::AppState;
pub use database_id::{Amount, DatabaseId};
pub use db::initialize as initialize_db;
pub use logging::setup_logging;
pub use name::EntityName;
pub use subscription::Subscription;
pub use timezone::{get_local_offset, local_today};

/// The errors that may occur in the library.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used to create a name for a shop, category,
    /// producer, product or variant.
    #[error("name cannot be empty")]
    EmptyName,

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows. Lookups
    /// by ID convert this into `Ok(None)` before it reaches the caller.
    #[error("the requested resource could not be found")]
    NotFound,

    /// A row referenced another row that does not exist, e.g. an item with a
    /// product ID that is not in the database.
    #[error("a referenced row does not exist in the database")]
    InvalidForeignKey,

    /// Tried to delete a product that is still referenced by basket items.
    #[error("the product is still referenced by one or more basket items")]
    ProductInUse,

    /// A stored preference value could not be parsed.
    #[error("invalid value for preference \"{0}\"")]
    InvalidPreference(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// Tried to update a shop that does not exist
    #[error("tried to update a shop that is not in the database")]
    UpdateMissingShop,

    /// Tried to delete a shop that does not exist
    #[error("tried to delete a shop that is not in the database")]
    DeleteMissingShop,

    /// Tried to update a category that does not exist
    #[error("tried to update a category that is not in the database")]
    UpdateMissingCategory,

    /// Tried to delete a category that does not exist
    #[error("tried to delete a category that is not in the database")]
    DeleteMissingCategory,

    /// Tried to update a producer that does not exist
    #[error("tried to update a producer that is not in the database")]
    UpdateMissingProducer,

    /// Tried to delete a producer that does not exist
    #[error("tried to delete a producer that is not in the database")]
    DeleteMissingProducer,

    /// Tried to update a product or product variant that does not exist
    #[error("tried to update a product that is not in the database")]
    UpdateMissingProduct,

    /// Tried to delete a product or product variant that does not exist
    #[error("tried to delete a product that is not in the database")]
    DeleteMissingProduct,

    /// Tried to update a basket that does not exist
    #[error("tried to update a basket that is not in the database")]
    UpdateMissingBasket,

    /// Tried to delete a basket that does not exist
    #[error("tried to delete a basket that is not in the database")]
    DeleteMissingBasket,

    /// Tried to delete a basket item that does not exist
    #[error("tried to delete a basket item that is not in the database")]
    DeleteMissingItem,

    /// An item named a product variant that belongs to a different product.
    #[error("the variant does not belong to the item's product")]
    VariantProductMismatch,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => Error::InvalidForeignKey,
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}
