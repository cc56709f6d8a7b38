//! Shops where baskets are bought.

mod db;
mod domain;

pub use db::{create_shop, create_shop_table, delete_shop, get_all_shops, get_shop, update_shop};
pub(crate) use db::map_row as map_shop_row;
pub use domain::{NewShop, Shop, ShopId};
