//! Database operations for product variants.

use rusqlite::{Connection, OptionalExtension, Row};

use crate::{
    EntityName, Error,
    product::{ProductId, ProductVariant, VariantId},
};

/// Create a variant of `product_id` and return it with its generated ID.
///
/// # Errors
/// Returns [Error::InvalidForeignKey] if the product does not exist.
pub fn create_variant(
    product_id: ProductId,
    name: EntityName,
    connection: &Connection,
) -> Result<ProductVariant, Error> {
    connection.execute(
        "INSERT INTO product_variant (product_id, name) VALUES (?1, ?2)",
        (product_id, name.as_ref()),
    )?;

    let id = connection.last_insert_rowid();

    Ok(ProductVariant {
        id,
        product_id,
        name,
    })
}

/// Retrieve a single variant by ID, or `None` if there is no such variant.
pub fn get_variant(
    variant_id: VariantId,
    connection: &Connection,
) -> Result<Option<ProductVariant>, Error> {
    connection
        .prepare("SELECT id, product_id, name FROM product_variant WHERE id = :id")?
        .query_row(&[(":id", &variant_id)], map_row)
        .optional()
        .map_err(|error| error.into())
}

/// Retrieve the variants of a product ordered by name.
pub fn get_variants_for_product(
    product_id: ProductId,
    connection: &Connection,
) -> Result<Vec<ProductVariant>, Error> {
    connection
        .prepare(
            "SELECT id, product_id, name FROM product_variant
             WHERE product_id = :product_id ORDER BY name ASC, id ASC",
        )?
        .query_map(&[(":product_id", &product_id)], map_row)?
        .map(|maybe_variant| maybe_variant.map_err(|error| error.into()))
        .collect()
}

/// Rename a variant. Returns an error if the variant doesn't exist.
pub fn update_variant(
    variant_id: VariantId,
    new_name: EntityName,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE product_variant SET name = ?1 WHERE id = ?2",
        (new_name.as_ref(), variant_id),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingProduct);
    }

    Ok(())
}

/// Delete a variant by ID. Items that used it keep their product.
pub fn delete_variant(variant_id: VariantId, connection: &Connection) -> Result<(), Error> {
    let rows_affected =
        connection.execute("DELETE FROM product_variant WHERE id = ?1", [variant_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingProduct);
    }

    Ok(())
}

/// Initialize the product variant table.
pub fn create_variant_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS product_variant (
            id INTEGER PRIMARY KEY,
            product_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            FOREIGN KEY(product_id) REFERENCES product(id) ON UPDATE CASCADE ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_product_variant_product ON product_variant(product_id);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<ProductVariant, rusqlite::Error> {
    let id = row.get(0)?;
    let product_id = row.get(1)?;
    let raw_name: String = row.get(2)?;

    Ok(ProductVariant {
        id,
        product_id,
        name: EntityName::new_unchecked(&raw_name),
    })
}
