//! Core category domain types.

use serde::{Deserialize, Serialize};

use crate::{
    EntityName,
    database_id::DatabaseId,
    ranking::{Rankable, fuzzy_score},
};

/// Database identifier for a product category.
pub type CategoryId = DatabaseId;

/// A category for grouping products (e.g., 'Dairy', 'Household').
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Category {
    /// The ID of the category.
    pub id: CategoryId,
    /// The name of the category.
    pub name: EntityName,
}

impl Rankable for Category {
    fn display_name(&self) -> String {
        self.name.to_string()
    }

    fn display_value(&self) -> String {
        String::new()
    }

    fn sort_value(&self) -> i64 {
        self.id
    }

    fn fuzzy_score(&self, query: &str) -> i64 {
        fuzzy_score(self.name.as_ref(), query)
    }
}
