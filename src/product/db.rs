//! Database operations for products.

use rusqlite::{Connection, OptionalExtension, Row};

use crate::{
    EntityName, Error,
    product::{NewProduct, Product, ProductId},
};

/// Create a product and return it with its generated ID.
///
/// # Errors
/// Returns [Error::InvalidForeignKey] if the category or producer does not exist.
pub fn create_product(product: NewProduct, connection: &Connection) -> Result<Product, Error> {
    connection
        .prepare(
            "INSERT INTO product (name, category_id, producer_id) VALUES (?1, ?2, ?3)
             RETURNING id, name, category_id, producer_id",
        )?
        .query_row(
            (product.name.as_ref(), product.category_id, product.producer_id),
            map_product_row,
        )
        .map_err(|error| error.into())
}

/// Retrieve a single product by ID, or `None` if there is no such product.
pub fn get_product(
    product_id: ProductId,
    connection: &Connection,
) -> Result<Option<Product>, Error> {
    connection
        .prepare("SELECT id, name, category_id, producer_id FROM product WHERE id = :id")?
        .query_row(&[(":id", &product_id)], map_product_row)
        .optional()
        .map_err(|error| error.into())
}

/// Retrieve all products ordered alphabetically by name.
pub fn get_all_products(connection: &Connection) -> Result<Vec<Product>, Error> {
    connection
        .prepare("SELECT id, name, category_id, producer_id FROM product ORDER BY name ASC, id ASC")?
        .query_map([], map_product_row)?
        .map(|maybe_product| maybe_product.map_err(|error| error.into()))
        .collect()
}

/// Replace a product's details. Returns an error if the product doesn't exist.
pub fn update_product(
    product_id: ProductId,
    product: NewProduct,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE product SET name = ?1, category_id = ?2, producer_id = ?3 WHERE id = ?4",
        (
            product.name.as_ref(),
            product.category_id,
            product.producer_id,
            product_id,
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingProduct);
    }

    Ok(())
}

/// Delete a product and its variants.
///
/// # Errors
/// Returns [Error::ProductInUse] if any basket item refers to the product and
/// [Error::DeleteMissingProduct] if the product doesn't exist.
pub fn delete_product(product_id: ProductId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection
        .execute("DELETE FROM product WHERE id = ?1", [product_id])
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => Error::ProductInUse,
            error => error.into(),
        })?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingProduct);
    }

    Ok(())
}

/// Initialize the product table and indexes.
pub fn create_product_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS product (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            category_id INTEGER,
            producer_id INTEGER,
            FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE SET NULL,
            FOREIGN KEY(producer_id) REFERENCES producer(id) ON UPDATE CASCADE ON DELETE SET NULL
        );

        CREATE INDEX IF NOT EXISTS idx_product_name ON product(name);
        CREATE INDEX IF NOT EXISTS idx_product_category ON product(category_id);
        CREATE INDEX IF NOT EXISTS idx_product_producer ON product(producer_id);",
    )?;

    Ok(())
}

pub(crate) fn map_product_row(row: &Row) -> Result<Product, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let category_id = row.get(2)?;
    let producer_id = row.get(3)?;

    Ok(Product {
        id,
        name: EntityName::new_unchecked(&raw_name),
        category_id,
        producer_id,
    })
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::{
        EntityName, Error,
        category::{create_category, delete_category},
        db::initialize,
        product::{
            NewProduct, create_product, delete_product, get_all_products, get_product,
            update_product,
        },
    };

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        connection
    }

    #[test]
    fn create_product_succeeds() {
        let connection = get_test_connection();
        let dairy = create_category(EntityName::new_unchecked("Dairy"), &connection).unwrap();

        let product = create_product(
            NewProduct::named(EntityName::new_unchecked("Milk")).category_id(Some(dairy.id)),
            &connection,
        )
        .expect("Could not create product");

        assert!(product.id > 0);
        assert_eq!(product.category_id, Some(dairy.id));
        assert_eq!(product.producer_id, None);
        assert_eq!(get_product(product.id, &connection), Ok(Some(product)));
    }

    #[test]
    fn create_product_fails_on_invalid_category() {
        let connection = get_test_connection();

        let result = create_product(
            NewProduct::named(EntityName::new_unchecked("Milk")).category_id(Some(42)),
            &connection,
        );

        assert_eq!(result, Err(Error::InvalidForeignKey));
    }

    #[test]
    fn deleting_category_uncategorises_product() {
        let connection = get_test_connection();
        let dairy = create_category(EntityName::new_unchecked("Dairy"), &connection).unwrap();
        let product = create_product(
            NewProduct::named(EntityName::new_unchecked("Milk")).category_id(Some(dairy.id)),
            &connection,
        )
        .unwrap();

        delete_category(dairy.id, &connection).unwrap();

        let product = get_product(product.id, &connection).unwrap().unwrap();
        assert_eq!(product.category_id, None);
    }

    #[test]
    fn update_product_succeeds() {
        let connection = get_test_connection();
        let product =
            create_product(NewProduct::named(EntityName::new_unchecked("Mlk")), &connection)
                .unwrap();

        update_product(
            product.id,
            NewProduct::named(EntityName::new_unchecked("Milk")),
            &connection,
        )
        .unwrap();

        let products = get_all_products(&connection).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name.as_ref(), "Milk");
    }

    #[test]
    fn update_and_delete_missing_product_fail() {
        let connection = get_test_connection();

        assert_eq!(
            update_product(
                999,
                NewProduct::named(EntityName::new_unchecked("Milk")),
                &connection
            ),
            Err(Error::UpdateMissingProduct)
        );
        assert_eq!(
            delete_product(999, &connection),
            Err(Error::DeleteMissingProduct)
        );
    }
}
