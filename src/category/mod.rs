//! Product categories, e.g. 'Dairy' or 'Fruit & Veg'.

mod db;
mod domain;

pub use db::{
    create_category, create_category_table, delete_category, get_all_categories, get_category,
    update_category,
};
pub(crate) use db::map_row as map_category_row;
pub use domain::{Category, CategoryId};
