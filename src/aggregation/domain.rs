//! Aggregated spending types.

use serde::Serialize;
use time::Date;

use crate::{
    Amount,
    category::Category,
    currency::{Locale, format_minor_units},
    producer::Producer,
    product::Product,
    ranking::Rankable,
    shop::Shop,
};

/// The total spent on one entity over a window of time.
///
/// Totals are in minor units (e.g., cents) and are recomputed on every query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TotalSpent<E> {
    /// The entity the spending is grouped by.
    pub entity: E,
    /// The sum of the matching item prices in minor units.
    pub total: Amount,
}

/// Spending grouped by product category.
pub type TotalSpentByCategory = TotalSpent<Category>;

/// Spending grouped by the shop the basket was bought at.
pub type TotalSpentByShop = TotalSpent<Shop>;

/// Spending grouped by product producer.
pub type TotalSpentByProducer = TotalSpent<Producer>;

/// Spending grouped by product.
pub type TotalSpentByProduct = TotalSpent<Product>;

impl<E: Rankable> Rankable for TotalSpent<E> {
    fn display_name(&self) -> String {
        self.entity.display_name()
    }

    fn display_value(&self) -> String {
        format_minor_units(self.total, &Locale::system(), false)
    }

    fn sort_value(&self) -> i64 {
        self.total
    }

    fn fuzzy_score(&self, query: &str) -> i64 {
        self.entity.fuzzy_score(query)
    }
}

/// The total spent in one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlySpend {
    /// The first day of the month.
    pub month: Date,
    /// The sum of the item prices in the month, in minor units.
    pub total: Amount,
}

#[cfg(test)]
mod tests {
    use crate::{
        EntityName,
        category::Category,
        ranking::{Rankable, rank_by_query, sort_by_value},
    };

    use super::TotalSpentByCategory;

    fn total(id: i64, name: &str, total: i64) -> TotalSpentByCategory {
        TotalSpentByCategory {
            entity: Category {
                id,
                name: EntityName::new_unchecked(name),
            },
            total,
        }
    }

    #[test]
    fn sort_value_is_total() {
        let mut totals = vec![total(1, "Bakery", 250), total(2, "Dairy", 900)];

        sort_by_value(&mut totals);

        assert_eq!(totals[0].entity.name.as_ref(), "Dairy");
        assert_eq!(totals[0].sort_value(), 900);
    }

    #[test]
    fn ranks_by_entity_name() {
        let totals = vec![total(1, "Bakery", 250), total(2, "Dairy", 900)];

        let ranked = rank_by_query(&totals, "bak");

        assert_eq!(ranked[0].display_name(), "Bakery");
    }
}
