//! Products and their variants.

mod db;
mod domain;
mod variant;

pub use db::{
    create_product, create_product_table, delete_product, get_all_products, get_product,
    update_product,
};
pub(crate) use db::map_product_row;
pub use domain::{NewProduct, Product, ProductId, ProductVariant, VariantId};
pub use variant::{
    create_variant, create_variant_table, delete_variant, get_variant, get_variants_for_product,
    update_variant,
};
