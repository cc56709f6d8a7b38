//! Baskets: purchase transactions made up of priced items.
//!
//! This module contains everything related to baskets:
//! - The `Basket` and `Item` models and the `BasketBuilder` for creating them
//! - Database functions for storing, querying and paging baskets
//! - The paging source that feeds the basket list

mod db;
mod domain;
mod paging;

pub use db::{
    add_item, count_baskets, create_basket, create_basket_tables, delete_basket, delete_item,
    get_basket, get_basket_items, get_baskets_page, update_basket,
};
pub use domain::{
    Basket, BasketBuilder, BasketDetails, BasketId, BasketOverview, Item, ItemId, NewItem,
};
pub use paging::{BasketPagingSource, BasketSource, SqliteBasketSource};
