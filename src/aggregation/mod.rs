//! Spending totals by shop, category, producer, product and month.
//!
//! The query functions read a snapshot from a [rusqlite::Connection]. The
//! `watch_*` functions wrap them in a [Subscription] that yields a fresh
//! snapshot every time data is written through [AppState::write].

mod db;
mod domain;

use std::ops::RangeInclusive;

use time::Date;

use crate::{AppState, Subscription};

pub use db::{
    month_range, monthly_spending, total_spent, total_spent_by_category, total_spent_by_producer,
    total_spent_by_product, total_spent_by_shop,
};
pub use domain::{
    MonthlySpend, TotalSpent, TotalSpentByCategory, TotalSpentByProducer, TotalSpentByProduct,
    TotalSpentByShop,
};

/// Live totals by category. See [total_spent_by_category].
pub fn watch_total_spent_by_category(
    state: &AppState,
    range: Option<RangeInclusive<Date>>,
) -> Subscription<Vec<TotalSpentByCategory>> {
    state.subscribe(move |connection| total_spent_by_category(range.as_ref(), connection))
}

/// Live totals by shop. See [total_spent_by_shop].
pub fn watch_total_spent_by_shop(
    state: &AppState,
    range: Option<RangeInclusive<Date>>,
) -> Subscription<Vec<TotalSpentByShop>> {
    state.subscribe(move |connection| total_spent_by_shop(range.as_ref(), connection))
}

/// Live totals by producer. See [total_spent_by_producer].
pub fn watch_total_spent_by_producer(
    state: &AppState,
    range: Option<RangeInclusive<Date>>,
) -> Subscription<Vec<TotalSpentByProducer>> {
    state.subscribe(move |connection| total_spent_by_producer(range.as_ref(), connection))
}

/// Live totals by product. See [total_spent_by_product].
pub fn watch_total_spent_by_product(
    state: &AppState,
    range: Option<RangeInclusive<Date>>,
) -> Subscription<Vec<TotalSpentByProduct>> {
    state.subscribe(move |connection| total_spent_by_product(range.as_ref(), connection))
}

/// Live monthly totals. See [monthly_spending].
pub fn watch_monthly_spending(
    state: &AppState,
    range: Option<RangeInclusive<Date>>,
) -> Subscription<Vec<MonthlySpend>> {
    state.subscribe(move |connection| monthly_spending(range.as_ref(), connection))
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        AppState, EntityName,
        basket::{Basket, NewItem, create_basket},
        category::create_category,
        pagination::PaginationConfig,
        product::{NewProduct, create_product},
    };

    use super::{month_range, watch_monthly_spending, watch_total_spent_by_category};

    fn get_test_state() -> AppState {
        AppState::new(
            Connection::open_in_memory().unwrap(),
            PaginationConfig::default(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn category_totals_update_after_basket_is_added() {
        let state = get_test_state();
        let bread = state
            .write(|conn| {
                let food = create_category(EntityName::new_unchecked("Food"), conn)?;
                create_product(
                    NewProduct::named(EntityName::new_unchecked("Bread"))
                        .category_id(Some(food.id)),
                    conn,
                )
            })
            .unwrap();
        let mut totals =
            watch_total_spent_by_category(&state, Some(month_range(date!(2025 - 03 - 01))));

        assert_eq!(totals.next().await, Some(Ok(vec![])));

        state
            .write(|conn| {
                create_basket(
                    Basket::build(date!(2025 - 03 - 10))
                        .item(NewItem::new(bread.id, 1000))
                        .item(NewItem::new(bread.id, 2000))
                        .item(NewItem::new(bread.id, 500)),
                    conn,
                )
            })
            .unwrap();

        let snapshot = totals.next().await.unwrap().unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].entity.name.as_ref(), "Food");
        assert_eq!(snapshot[0].total, 3500);
    }

    #[tokio::test]
    async fn monthly_totals_start_empty() {
        let state = get_test_state();
        let mut months = watch_monthly_spending(&state, None);

        assert_eq!(months.next().await, Some(Ok(vec![])));

        months.cancel();
    }
}
