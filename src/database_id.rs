//! Database ID and money type definitions.

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseId = i64;

/// A monetary amount in minor units of the currency, e.g. cents.
pub type Amount = i64;
