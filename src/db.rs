//! Database setup for the application.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{
    Error,
    basket::create_basket_tables,
    category::create_category_table,
    preferences::{bootstrap_preferences, create_preference_table},
    producer::create_producer_table,
    product::{create_product_table, create_variant_table},
    shop::create_shop_table,
};

/// Create the application tables and seed default preferences.
///
/// This must be called once at startup before anything else reads from the
/// database. It is safe to call on a database that was already initialized.
///
/// # Errors
/// Returns an error if a table cannot be created or a default preference
/// cannot be written.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    // Has no effect inside a transaction, so it must come first.
    connection.execute_batch("PRAGMA foreign_keys = ON;")?;

    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_shop_table(&transaction)?;
    create_category_table(&transaction)?;
    create_producer_table(&transaction)?;
    create_product_table(&transaction)?;
    create_variant_table(&transaction)?;
    create_basket_tables(&transaction)?;
    create_preference_table(&transaction)?;

    transaction.commit()?;

    let written = bootstrap_preferences(connection)?;
    tracing::debug!("database initialized, {written} default preference(s) written");

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::preferences::{Preference, get_preference};

    use super::initialize;

    #[test]
    fn initialize_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        initialize(&conn).unwrap();
        initialize(&conn).unwrap();

        let tables: u32 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'
                 AND name IN ('shop', 'category', 'producer', 'product', 'product_variant',
                              'basket', 'basket_item', 'preference')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 8);
    }

    #[test]
    fn initialize_seeds_preferences() {
        let conn = Connection::open_in_memory().unwrap();

        initialize(&conn).unwrap();

        for preference in Preference::ALL {
            assert!(get_preference(preference.key(), &conn).unwrap().is_some());
        }
    }
}
