use serde::{Deserialize, Serialize};

use crate::{
    EntityName,
    database_id::DatabaseId,
    ranking::{Rankable, fuzzy_score},
};

/// Database identifier for a producer.
pub type ProducerId = DatabaseId;

/// The brand or manufacturer of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Producer {
    /// The ID of the producer.
    pub id: ProducerId,
    /// The name of the producer.
    pub name: EntityName,
}

impl Rankable for Producer {
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
