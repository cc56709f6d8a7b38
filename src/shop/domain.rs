//! Core shop domain types.

use serde::{Deserialize, Serialize};

use crate::{
    EntityName,
    database_id::DatabaseId,
    ranking::{Rankable, fuzzy_score},
};

/// Database identifier for a shop.
pub type ShopId = DatabaseId;

/// A shop, e.g. 'Corner Grocer' on 'Main St'.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Shop {
    /// The ID of the shop.
    pub id: ShopId,
    /// The name of the shop.
    pub name: EntityName,
    /// Where the shop is, free text.
    pub address: Option<String>,
}

/// The data needed to create or update a shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewShop {
    /// The name of the shop.
    pub name: EntityName,
    /// Where the shop is, free text.
    pub address: Option<String>,
}

impl NewShop {
    /// A shop without an address.
    pub fn named(name: EntityName) -> Self {
        Self {
            name,
            address: None,
        }
    }
}

impl Rankable for Shop {
    fn display_name(&self) -> String {
        self.name.to_string()
    }

    fn display_value(&self) -> String {
        self.address.clone().unwrap_or_default()
    }

    fn sort_value(&self) -> i64 {
        self.id
    }

    /// The better of the name and address scores.
    fn fuzzy_score(&self, query: &str) -> i64 {
        let name_score = fuzzy_score(self.name.as_ref(), query);

        match &self.address {
            Some(address) => name_score.max(fuzzy_score(address, query)),
            None => name_score,
        }
    }
}
