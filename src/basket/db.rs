//! Database operations for baskets and their items.

use rusqlite::{Connection, OptionalExtension, Row};

use crate::{
    Error,
    basket::{Basket, BasketBuilder, BasketDetails, BasketId, BasketOverview, Item, ItemId, NewItem},
    product::{ProductId, VariantId},
};

// ============================================================================
// BASKETS
// ============================================================================

/// Create a basket and all of its items in a single database transaction.
///
/// # Errors
/// Returns [Error::InvalidForeignKey] if the shop, a product or a variant does
/// not exist, or [Error::VariantProductMismatch] if an item's variant belongs
/// to another product. Nothing is written in either case.
pub fn create_basket(builder: BasketBuilder, connection: &Connection) -> Result<Basket, Error> {
    let transaction = connection.unchecked_transaction()?;

    let BasketBuilder { details, items } = builder;

    let basket = transaction
        .prepare(
            "INSERT INTO basket (shop_id, date, note) VALUES (?1, ?2, ?3)
             RETURNING id, shop_id, date, note",
        )?
        .query_row((details.shop_id, details.date, details.note), map_basket_row)?;

    for item in items {
        insert_item(basket.id, item, &transaction)?;
    }

    transaction.commit()?;

    Ok(basket)
}

/// Retrieve a single basket by ID, or `None` if there is no such basket.
pub fn get_basket(basket_id: BasketId, connection: &Connection) -> Result<Option<Basket>, Error> {
    connection
        .prepare("SELECT id, shop_id, date, note FROM basket WHERE id = :id")?
        .query_row(&[(":id", &basket_id)], map_basket_row)
        .optional()
        .map_err(|error| error.into())
}

/// Replace the shop, date and note of a basket. Items are left untouched.
pub fn update_basket(
    basket_id: BasketId,
    details: BasketDetails,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE basket SET shop_id = ?1, date = ?2, note = ?3 WHERE id = ?4",
        (details.shop_id, details.date, details.note, basket_id),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingBasket);
    }

    Ok(())
}

/// Delete a basket and its items.
pub fn delete_basket(basket_id: BasketId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM basket WHERE id = ?1", [basket_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingBasket);
    }

    Ok(())
}

/// Count all baskets.
pub fn count_baskets(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM basket;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Get up to `limit` basket overviews starting at `offset`.
///
/// Baskets are ordered by date, newest first, and then by ID so that the
/// order is stable between pages.
pub fn get_baskets_page(
    offset: i64,
    limit: i64,
    connection: &Connection,
) -> Result<Vec<BasketOverview>, Error> {
    connection
        .prepare(
            "SELECT b.id, b.date, s.name, b.note, COUNT(i.id), COALESCE(SUM(i.price), 0)
             FROM basket b
             LEFT JOIN shop s ON s.id = b.shop_id
             LEFT JOIN basket_item i ON i.basket_id = b.id
             GROUP BY b.id
             ORDER BY b.date DESC, b.id DESC
             LIMIT ?1 OFFSET ?2",
        )?
        .query_map([limit, offset], |row| {
            Ok(BasketOverview {
                id: row.get(0)?,
                date: row.get(1)?,
                shop_name: row.get(2)?,
                note: row.get(3)?,
                item_count: row.get(4)?,
                total: row.get(5)?,
            })
        })?
        .map(|maybe_overview| maybe_overview.map_err(|error| error.into()))
        .collect()
}

// ============================================================================
// ITEMS
// ============================================================================

/// Add an item to an existing basket.
///
/// # Errors
/// Returns [Error::InvalidForeignKey] if the basket, product or variant does not
/// exist, or [Error::VariantProductMismatch] if the variant belongs to another product.
pub fn add_item(basket_id: BasketId, item: NewItem, connection: &Connection) -> Result<Item, Error> {
    insert_item(basket_id, item, connection)
}

/// Retrieve the items of a basket in the order they were added.
pub fn get_basket_items(basket_id: BasketId, connection: &Connection) -> Result<Vec<Item>, Error> {
    connection
        .prepare(
            "SELECT id, basket_id, product_id, variant_id, price, quantity FROM basket_item
             WHERE basket_id = :basket_id ORDER BY id ASC",
        )?
        .query_map(&[(":basket_id", &basket_id)], map_item_row)?
        .map(|maybe_item| maybe_item.map_err(|error| error.into()))
        .collect()
}

/// Remove a single item from its basket.
///
/// # Errors
/// Returns [Error::DeleteMissingItem] if there is no item with `item_id`.
pub fn delete_item(item_id: ItemId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM basket_item WHERE id = ?1", [item_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingItem);
    }

    Ok(())
}

fn insert_item(basket_id: BasketId, item: NewItem, connection: &Connection) -> Result<Item, Error> {
    if let Some(variant_id) = item.variant_id {
        check_variant_product(variant_id, item.product_id, connection)?;
    }

    connection
        .prepare(
            "INSERT INTO basket_item (basket_id, product_id, variant_id, price, quantity)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, basket_id, product_id, variant_id, price, quantity",
        )?
        .query_row(
            (
                basket_id,
                item.product_id,
                item.variant_id,
                item.price,
                item.quantity,
            ),
            map_item_row,
        )
        .map_err(|error| error.into())
}

/// The variant must exist and belong to `product_id`.
fn check_variant_product(
    variant_id: VariantId,
    product_id: ProductId,
    connection: &Connection,
) -> Result<(), Error> {
    let owner: Option<ProductId> = connection
        .query_row(
            "SELECT product_id FROM product_variant WHERE id = ?1",
            [variant_id],
            |row| row.get(0),
        )
        .optional()?;

    match owner {
        Some(owner) if owner == product_id => Ok(()),
        Some(owner) => {
            tracing::debug!(
                "rejected variant {variant_id} of product {owner} for an item of product {product_id}"
            );
            Err(Error::VariantProductMismatch)
        }
        None => Err(Error::InvalidForeignKey),
    }
}

// ============================================================================
// SCHEMA
// ============================================================================

/// Initialize the basket and basket item tables and indexes.
pub fn create_basket_tables(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS basket (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            shop_id INTEGER,
            date TEXT NOT NULL,
            note TEXT NOT NULL DEFAULT '',
            FOREIGN KEY(shop_id) REFERENCES shop(id) ON UPDATE CASCADE ON DELETE SET NULL
        );

        CREATE INDEX IF NOT EXISTS idx_basket_date ON basket(date DESC, id DESC);

        CREATE TABLE IF NOT EXISTS basket_item (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            basket_id INTEGER NOT NULL,
            product_id INTEGER NOT NULL,
            variant_id INTEGER,
            price INTEGER NOT NULL CHECK (price >= 0),
            quantity REAL NOT NULL DEFAULT 1,
            FOREIGN KEY(basket_id) REFERENCES basket(id) ON UPDATE CASCADE ON DELETE CASCADE,
            FOREIGN KEY(product_id) REFERENCES product(id) ON UPDATE CASCADE ON DELETE RESTRICT,
            FOREIGN KEY(variant_id) REFERENCES product_variant(id) ON UPDATE CASCADE ON DELETE SET NULL
        );

        CREATE INDEX IF NOT EXISTS idx_basket_item_basket ON basket_item(basket_id);
        CREATE INDEX IF NOT EXISTS idx_basket_item_product ON basket_item(product_id);",
    )?;

    Ok(())
}

fn map_basket_row(row: &Row) -> Result<Basket, rusqlite::Error> {
    let id = row.get(0)?;
    let shop_id = row.get(1)?;
    let date = row.get(2)?;
    let note = row.get(3)?;

    Ok(Basket {
        id,
        shop_id,
        date,
        note,
    })
}

fn map_item_row(row: &Row) -> Result<Item, rusqlite::Error> {
    Ok(Item {
        id: row.get(0)?,
        basket_id: row.get(1)?,
        product_id: row.get(2)?,
        variant_id: row.get(3)?,
        price: row.get(4)?,
        quantity: row.get(5)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================
