//! Producers (brands and manufacturers) of products.

mod db;
mod domain;

pub use db::{
    create_producer, create_producer_table, delete_producer, get_all_producers, get_producer,
    update_producer,
};
pub(crate) use db::map_row as map_producer_row;
pub use domain::{Producer, ProducerId};
