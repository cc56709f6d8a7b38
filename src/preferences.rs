//! Persisted user preferences.
//!
//! Preferences live in a key-value table. Every known preference is seeded
//! with its default by [bootstrap_preferences], which [crate::db::initialize]
//! runs at startup, so reads after initialization never find a known key
//! missing.

use rusqlite::{Connection, OptionalExtension, TransactionBehavior};

use crate::{Error, currency::Locale};

/// The preferences the application knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preference {
    /// The locale tag used for currency formatting, e.g. "en-NZ".
    Locale,
    /// Whether amounts are shown without decimal places.
    HideDecimals,
}

impl Preference {
    /// Every known preference, in the order they are bootstrapped.
    pub const ALL: [Preference; 2] = [Preference::Locale, Preference::HideDecimals];

    /// The key the preference is stored under.
    pub fn key(self) -> &'static str {
        match self {
            Preference::Locale => "locale",
            Preference::HideDecimals => "hide_decimals",
        }
    }

    /// The value written when the preference has never been set.
    pub fn default_value(self) -> String {
        match self {
            Preference::Locale => Locale::system().tag().to_owned(),
            Preference::HideDecimals => false.to_string(),
        }
    }
}

/// Create the preference table in the database.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn create_preference_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS preference (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

/// Write `default` under `key` if there is no value for `key` yet.
///
/// The check and the write happen in one statement inside one transaction, so
/// a concurrent reader sees either no value or the default, never anything in
/// between. Calling this when the key already has a value does nothing.
///
/// # Returns
/// `true` if the default was written, `false` if a value already existed.
///
/// # Errors
/// Returns [Error::SqlError] if the transaction fails.
pub fn bootstrap_preference(
    key: &str,
    default: &str,
    connection: &Connection,
) -> Result<bool, Error> {
    let transaction =
        rusqlite::Transaction::new_unchecked(connection, TransactionBehavior::Immediate)?;

    let rows_inserted = transaction.execute(
        "INSERT OR IGNORE INTO preference (key, value) VALUES (?1, ?2)",
        (key, default),
    )?;

    transaction.commit()?;

    if rows_inserted > 0 {
        tracing::debug!("set default preference {key} = {default:?}");
    }

    Ok(rows_inserted > 0)
}

/// Seed every [Preference] with its default value where it is missing.
///
/// Must run before the first preference read. Returns the number of defaults
/// that were written.
pub fn bootstrap_preferences(connection: &Connection) -> Result<usize, Error> {
    let mut written = 0;

    for preference in Preference::ALL {
        if bootstrap_preference(preference.key(), &preference.default_value(), connection)? {
            written += 1;
        }
    }

    Ok(written)
}

/// Get the raw value stored under `key`, or `None` if there is none.
pub fn get_preference(key: &str, connection: &Connection) -> Result<Option<String>, Error> {
    connection
        .query_row(
            "SELECT value FROM preference WHERE key = ?1",
            [key],
            |row| row.get(0),
        )
        .optional()
        .map_err(|error| error.into())
}

/// Store `value` under `key`, replacing any existing value.
pub fn set_preference(key: &str, value: &str, connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "INSERT INTO preference (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        (key, value),
    )?;

    Ok(())
}

/// The locale to format currency with.
///
/// An unknown stored tag falls back to the platform default locale.
pub fn get_locale(connection: &Connection) -> Result<Locale, Error> {
    let tag = get_preference(Preference::Locale.key(), connection)?;

    Ok(Locale::resolve(tag.as_deref()))
}

/// Store the locale to format currency with.
pub fn set_locale(locale: &Locale, connection: &Connection) -> Result<(), Error> {
    set_preference(Preference::Locale.key(), locale.tag(), connection)
}

/// Whether amounts should be shown without decimal places.
///
/// # Errors
/// Returns [Error::InvalidPreference] if the stored value is not a boolean.
pub fn get_hide_decimals(connection: &Connection) -> Result<bool, Error> {
    let key = Preference::HideDecimals.key();

    match get_preference(key, connection)? {
        Some(value) => value
            .parse()
            .map_err(|_| Error::InvalidPreference(key.to_owned())),
        None => Ok(false),
    }
}

/// Store whether amounts should be shown without decimal places.
pub fn set_hide_decimals(hide_decimals: bool, connection: &Connection) -> Result<(), Error> {
    set_preference(
        Preference::HideDecimals.key(),
        &hide_decimals.to_string(),
        connection,
    )
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::*;

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_preference_table(&conn).unwrap();
        conn
    }

    fn count_rows(conn: &Connection) -> u32 {
        conn.query_row("SELECT COUNT(*) FROM preference", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn bootstrap_writes_default_once() {
        let conn = get_test_connection();

        let first = bootstrap_preference("theme", "dark", &conn).unwrap();
        let second = bootstrap_preference("theme", "light", &conn).unwrap();

        assert!(first);
        assert!(!second);
        assert_eq!(count_rows(&conn), 1);
        assert_eq!(get_preference("theme", &conn), Ok(Some("dark".to_owned())));
    }

    #[test]
    fn bootstrap_keeps_existing_value() {
        let conn = get_test_connection();
        set_preference("theme", "light", &conn).unwrap();

        let written = bootstrap_preference("theme", "dark", &conn).unwrap();

        assert!(!written);
        assert_eq!(get_preference("theme", &conn), Ok(Some("light".to_owned())));
    }

    #[test]
    fn missing_preference_is_absent() {
        let conn = get_test_connection();

        assert_eq!(get_preference("nope", &conn), Ok(None));
    }

    #[test]
    fn bootstrap_preferences_seeds_every_known_key() {
        let conn = get_test_connection();

        assert_eq!(bootstrap_preferences(&conn), Ok(Preference::ALL.len()));
        assert_eq!(bootstrap_preferences(&conn), Ok(0));

        for preference in Preference::ALL {
            assert!(
                get_preference(preference.key(), &conn).unwrap().is_some(),
                "{preference:?} is missing after bootstrap"
            );
        }
        assert_eq!(get_locale(&conn), Ok(Locale::system()));
        assert_eq!(get_hide_decimals(&conn), Ok(false));
    }

    #[test]
    fn set_preference_overwrites() {
        let conn = get_test_connection();
        bootstrap_preferences(&conn).unwrap();

        set_hide_decimals(true, &conn).unwrap();
        set_locale(&Locale::from_tag("de-DE").unwrap(), &conn).unwrap();

        assert_eq!(get_hide_decimals(&conn), Ok(true));
        assert_eq!(get_locale(&conn).map(|locale| locale.tag()), Ok("de-DE"));
    }

    #[test]
    fn invalid_boolean_is_an_error() {
        let conn = get_test_connection();
        set_preference(Preference::HideDecimals.key(), "maybe", &conn).unwrap();

        assert_eq!(
            get_hide_decimals(&conn),
            Err(Error::InvalidPreference("hide_decimals".to_owned()))
        );
    }

    #[test]
    fn unknown_locale_falls_back_to_system() {
        let conn = get_test_connection();
        set_preference(Preference::Locale.key(), "xx-YY", &conn).unwrap();

        assert_eq!(get_locale(&conn), Ok(Locale::system()));
    }
}
