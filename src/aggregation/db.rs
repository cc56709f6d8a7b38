//! Queries that total item prices by shop, category, producer, product and month.
//!
//! Every query takes an optional inclusive date range over the basket date.
//! `None` means all time.

use std::ops::RangeInclusive;

use rusqlite::{Connection, Row, params_from_iter};
use time::{Date, Duration, Month};

use crate::{
    Amount, Error,
    aggregation::{
        MonthlySpend, TotalSpent, TotalSpentByCategory, TotalSpentByProducer, TotalSpentByProduct,
        TotalSpentByShop,
    },
    category::map_category_row,
    producer::map_producer_row,
    product::map_product_row,
    shop::map_shop_row,
};

/// How items are joined to the entity they are totalled by.
struct Grouping {
    /// The entity's columns, in the order its row mapper expects.
    columns: &'static str,
    column_count: usize,
    joins: &'static str,
    key: &'static str,
    name: &'static str,
}

const BY_SHOP: Grouping = Grouping {
    columns: "s.id, s.name, s.address",
    column_count: 3,
    joins: "JOIN shop s ON s.id = b.shop_id",
    key: "s.id",
    name: "s.name",
};

const BY_CATEGORY: Grouping = Grouping {
    columns: "c.id, c.name",
    column_count: 2,
    joins: "JOIN product p ON p.id = i.product_id
            JOIN category c ON c.id = p.category_id",
    key: "c.id",
    name: "c.name",
};

const BY_PRODUCER: Grouping = Grouping {
    columns: "pr.id, pr.name",
    column_count: 2,
    joins: "JOIN product p ON p.id = i.product_id
            JOIN producer pr ON pr.id = p.producer_id",
    key: "pr.id",
    name: "pr.name",
};

const BY_PRODUCT: Grouping = Grouping {
    columns: "p.id, p.name, p.category_id, p.producer_id",
    column_count: 4,
    joins: "JOIN product p ON p.id = i.product_id",
    key: "p.id",
    name: "p.name",
};

/// Total spent at each shop, largest total first.
///
/// Baskets without a shop are left out.
pub fn total_spent_by_shop(
    range: Option<&RangeInclusive<Date>>,
    connection: &Connection,
) -> Result<Vec<TotalSpentByShop>, Error> {
    query_totals(&BY_SHOP, range, connection, map_shop_row)
}

/// Total spent in each product category, largest total first.
///
/// Items whose product has no category are left out.
pub fn total_spent_by_category(
    range: Option<&RangeInclusive<Date>>,
    connection: &Connection,
) -> Result<Vec<TotalSpentByCategory>, Error> {
    query_totals(&BY_CATEGORY, range, connection, map_category_row)
}

/// Total spent on each producer's products, largest total first.
///
/// Items whose product has no producer are left out.
pub fn total_spent_by_producer(
    range: Option<&RangeInclusive<Date>>,
    connection: &Connection,
) -> Result<Vec<TotalSpentByProducer>, Error> {
    query_totals(&BY_PRODUCER, range, connection, map_producer_row)
}

/// Total spent on each product, largest total first.
pub fn total_spent_by_product(
    range: Option<&RangeInclusive<Date>>,
    connection: &Connection,
) -> Result<Vec<TotalSpentByProduct>, Error> {
    query_totals(&BY_PRODUCT, range, connection, map_product_row)
}

/// Total spent across all baskets in the range.
pub fn total_spent(
    range: Option<&RangeInclusive<Date>>,
    connection: &Connection,
) -> Result<Amount, Error> {
    let query = format!(
        "SELECT COALESCE(SUM(i.price), 0)
         FROM basket_item i
         JOIN basket b ON b.id = i.basket_id
         {}",
        date_filter(range)
    );

    connection
        .query_row(&query, params_from_iter(date_params(range)), |row| row.get(0))
        .map_err(|error| error.into())
}

/// Total spent in each month that has any spending, oldest month first.
pub fn monthly_spending(
    range: Option<&RangeInclusive<Date>>,
    connection: &Connection,
) -> Result<Vec<MonthlySpend>, Error> {
    let query = format!(
        "SELECT strftime('%Y-%m-01', b.date) AS month, SUM(i.price)
         FROM basket_item i
         JOIN basket b ON b.id = i.basket_id
         {}
         GROUP BY month
         ORDER BY month ASC",
        date_filter(range)
    );

    connection
        .prepare(&query)?
        .query_map(params_from_iter(date_params(range)), |row| {
            Ok(MonthlySpend {
                month: row.get(0)?,
                total: row.get(1)?,
            })
        })?
        .map(|maybe_spend| maybe_spend.map_err(|error| error.into()))
        .collect()
}

/// The first to the last day of the month containing `date`.
pub fn month_range(date: Date) -> RangeInclusive<Date> {
    let start = date - Duration::days(i64::from(date.day()) - 1);
    let end = start + Duration::days(i64::from(last_day_of_month(date.year(), date.month())) - 1);

    start..=end
}

fn query_totals<E>(
    grouping: &Grouping,
    range: Option<&RangeInclusive<Date>>,
    connection: &Connection,
    map_entity: fn(&Row) -> Result<E, rusqlite::Error>,
) -> Result<Vec<TotalSpent<E>>, Error> {
    let query = format!(
        "SELECT {columns}, SUM(i.price) AS total
         FROM basket_item i
         JOIN basket b ON b.id = i.basket_id
         {joins}
         {filter}
         GROUP BY {key}
         ORDER BY total DESC, {name} ASC, {key} ASC",
        columns = grouping.columns,
        joins = grouping.joins,
        filter = date_filter(range),
        key = grouping.key,
        name = grouping.name,
    );

    connection
        .prepare(&query)?
        .query_map(params_from_iter(date_params(range)), |row| {
            Ok(TotalSpent {
                entity: map_entity(row)?,
                total: row.get(grouping.column_count)?,
            })
        })?
        .map(|maybe_total| maybe_total.map_err(|error| error.into()))
        .collect()
}

fn date_filter(range: Option<&RangeInclusive<Date>>) -> &'static str {
    match range {
        Some(_) => "WHERE b.date BETWEEN ?1 AND ?2",
        None => "",
    }
}

fn date_params(range: Option<&RangeInclusive<Date>>) -> Vec<Date> {
    match range {
        Some(range) => vec![*range.start(), *range.end()],
        None => Vec::new(),
    }
}

fn last_day_of_month(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
