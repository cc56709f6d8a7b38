//! Core product domain types.

use serde::{Deserialize, Serialize};

use crate::{
    EntityName,
    category::CategoryId,
    database_id::DatabaseId,
    producer::ProducerId,
    ranking::{Rankable, fuzzy_score},
};

/// Database identifier for a product.
pub type ProductId = DatabaseId;

/// Database identifier for a product variant.
pub type VariantId = DatabaseId;

/// Something that can be bought, e.g. 'Milk'.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Product {
    /// The ID of the product.
    pub id: ProductId,
    /// The name of the product.
    pub name: EntityName,
    /// The category of the product, if any.
    pub category_id: Option<CategoryId>,
    /// The brand or manufacturer, if known.
    pub producer_id: Option<ProducerId>,
}

/// The data needed to create or update a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    /// The name of the product.
    pub name: EntityName,
    /// The category of the product, if any.
    pub category_id: Option<CategoryId>,
    /// The brand or manufacturer, if known.
    pub producer_id: Option<ProducerId>,
}

impl NewProduct {
    /// A product without a category or producer.
    pub fn named(name: EntityName) -> Self {
        Self {
            name,
            category_id: None,
            producer_id: None,
        }
    }

    /// Set the category.
    pub fn category_id(mut self, category_id: Option<CategoryId>) -> Self {
        self.category_id = category_id;
        self
    }

    /// Set the producer.
    pub fn producer_id(mut self, producer_id: Option<ProducerId>) -> Self {
        self.producer_id = producer_id;
        self
    }
}

/// A specific form of a product, e.g. '2 L' or 'Lactose free' milk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct ProductVariant {
    /// The ID of the variant.
    pub id: VariantId,
    /// The product this is a variant of.
    pub product_id: ProductId,
    /// The name of the variant.
    pub name: EntityName,
}

impl Rankable for Product {
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
