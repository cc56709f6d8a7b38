//! Core basket domain types.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    database_id::{Amount, DatabaseId},
    product::{ProductId, VariantId},
    shop::ShopId,
};

/// Database identifier for a basket.
pub type BasketId = DatabaseId;

/// Database identifier for a basket item.
pub type ItemId = DatabaseId;

/// A purchase, i.e. the items bought at a shop on a given day.
///
/// To create a new `Basket`, use [Basket::build].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Basket {
    /// The ID of the basket.
    pub id: BasketId,
    /// The shop the basket was bought at, if known.
    pub shop_id: Option<ShopId>,
    /// When the purchase happened.
    pub date: Date,
    /// A free text note, may be empty.
    pub note: String,
}

impl Basket {
    /// Create a new basket.
    ///
    /// Shortcut for [BasketBuilder] for discoverability.
    pub fn build(date: Date) -> BasketBuilder {
        BasketBuilder {
            details: BasketDetails {
                shop_id: None,
                date,
                note: String::new(),
            },
            items: Vec::new(),
        }
    }
}

/// The editable fields of a basket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketDetails {
    /// The shop the basket was bought at, if known.
    pub shop_id: Option<ShopId>,
    /// When the purchase happened.
    pub date: Date,
    /// A free text note, may be empty.
    pub note: String,
}

/// A builder for creating a [Basket] together with its items.
///
/// ```ignore
/// use time::macros::date;
///
/// let builder = Basket::build(date!(2025 - 01 - 15))
///     .shop_id(Some(shop.id))
///     .note("Weekly shop")
///     .item(NewItem::new(milk.id, 349).quantity(2.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BasketBuilder {
    /// The basket fields.
    pub details: BasketDetails,
    /// The items to insert with the basket, in order.
    pub items: Vec<NewItem>,
}

impl BasketBuilder {
    /// Set the shop the basket was bought at.
    pub fn shop_id(mut self, shop_id: Option<ShopId>) -> Self {
        self.details.shop_id = shop_id;
        self
    }

    /// Set the note.
    pub fn note(mut self, note: &str) -> Self {
        self.details.note = note.to_owned();
        self
    }

    /// Add an item to the basket.
    pub fn item(mut self, item: NewItem) -> Self {
        self.items.push(item);
        self
    }
}

/// A line in a basket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// The ID of the item.
    pub id: ItemId,
    /// The basket the item belongs to.
    pub basket_id: BasketId,
    /// The product that was bought.
    pub product_id: ProductId,
    /// The variant of the product, if recorded.
    pub variant_id: Option<VariantId>,
    /// The cost of the whole line in minor units.
    pub price: Amount,
    /// How much was bought, e.g. `1.2` for kilograms of apples.
    pub quantity: f64,
}

/// The data needed to add an item to a basket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    /// The product that was bought.
    pub product_id: ProductId,
    /// The variant of the product, must belong to `product_id`.
    pub variant_id: Option<VariantId>,
    /// The cost of the whole line in minor units.
    pub price: Amount,
    /// How much was bought.
    pub quantity: f64,
}

impl NewItem {
    /// A single unit of `product_id` costing `price` minor units.
    pub fn new(product_id: ProductId, price: Amount) -> Self {
        Self {
            product_id,
            variant_id: None,
            price,
            quantity: 1.0,
        }
    }

    /// Set the product variant.
    pub fn variant_id(mut self, variant_id: Option<VariantId>) -> Self {
        self.variant_id = variant_id;
        self
    }

    /// Set the quantity.
    pub fn quantity(mut self, quantity: f64) -> Self {
        self.quantity = quantity;
        self
    }
}

/// A row in the basket list: the basket with its shop name and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketOverview {
    /// The ID of the basket.
    pub id: BasketId,
    /// When the purchase happened.
    pub date: Date,
    /// The name of the shop, if the basket has one.
    pub shop_name: Option<String>,
    /// The basket note.
    pub note: String,
    /// The number of items in the basket.
    pub item_count: u32,
    /// The sum of the item prices in minor units.
    pub total: Amount,
}
