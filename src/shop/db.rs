//! Database operations for shops.

use rusqlite::{Connection, OptionalExtension, Row};

use crate::{
    EntityName, Error,
    shop::{NewShop, Shop, ShopId},
};

/// Create a shop and return it with its generated ID.
pub fn create_shop(shop: NewShop, connection: &Connection) -> Result<Shop, Error> {
    connection
        .prepare("INSERT INTO shop (name, address) VALUES (?1, ?2) RETURNING id, name, address")?
        .query_row((shop.name.as_ref(), shop.address), map_row)
        .map_err(|error| error.into())
}

/// Retrieve a single shop by ID, or `None` if there is no such shop.
pub fn get_shop(shop_id: ShopId, connection: &Connection) -> Result<Option<Shop>, Error> {
    connection
        .prepare("SELECT id, name, address FROM shop WHERE id = :id")?
        .query_row(&[(":id", &shop_id)], map_row)
        .optional()
        .map_err(|error| error.into())
}

/// Retrieve all shops ordered alphabetically by name.
pub fn get_all_shops(connection: &Connection) -> Result<Vec<Shop>, Error> {
    connection
        .prepare("SELECT id, name, address FROM shop ORDER BY name ASC, id ASC")?
        .query_map([], map_row)?
        .map(|maybe_shop| maybe_shop.map_err(|error| error.into()))
        .collect()
}

/// Replace a shop's name and address. Returns an error if the shop doesn't exist.
pub fn update_shop(shop_id: ShopId, shop: NewShop, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE shop SET name = ?1, address = ?2 WHERE id = ?3",
        (shop.name.as_ref(), shop.address, shop_id),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingShop);
    }

    Ok(())
}

/// Delete a shop by ID. Baskets bought there keep existing without a shop.
pub fn delete_shop(shop_id: ShopId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM shop WHERE id = ?1", [shop_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingShop);
    }

    Ok(())
}

/// Initialize the shop table and indexes.
pub fn create_shop_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS shop (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            address TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_shop_name ON shop(name);",
    )?;

    Ok(())
}

pub(crate) fn map_row(row: &Row) -> Result<Shop, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let address = row.get(2)?;

    Ok(Shop {
        id,
        name: EntityName::new_unchecked(&raw_name),
        address,
    })
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::{
        EntityName, Error,
        db::initialize,
        shop::{NewShop, create_shop, delete_shop, get_all_shops, get_shop, update_shop},
    };

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        connection
    }

    fn new_shop(name: &str, address: Option<&str>) -> NewShop {
        NewShop {
            name: EntityName::new_unchecked(name),
            address: address.map(str::to_owned),
        }
    }

    #[test]
    fn create_shop_succeeds() {
        let connection = get_test_connection();

        let shop = create_shop(new_shop("Corner Grocer", Some("1 Main St")), &connection)
            .expect("Could not create shop");

        assert!(shop.id > 0);
        assert_eq!(shop.name.as_ref(), "Corner Grocer");
        assert_eq!(shop.address.as_deref(), Some("1 Main St"));
    }

    #[test]
    fn get_shop_succeeds() {
        let connection = get_test_connection();
        let inserted = create_shop(new_shop("Foo", None), &connection).unwrap();

        let selected = get_shop(inserted.id, &connection);

        assert_eq!(selected, Ok(Some(inserted)));
    }

    #[test]
    fn get_shop_with_invalid_id_returns_none() {
        let connection = get_test_connection();
        let inserted = create_shop(new_shop("Foo", None), &connection).unwrap();

        let selected = get_shop(inserted.id + 123, &connection);

        assert_eq!(selected, Ok(None));
    }

    #[test]
    fn get_all_shops_orders_by_name() {
        let connection = get_test_connection();
        let zebra = create_shop(new_shop("Zebra Mart", None), &connection).unwrap();
        let apple = create_shop(new_shop("Apple Market", None), &connection).unwrap();

        let shops = get_all_shops(&connection).unwrap();

        assert_eq!(shops, vec![apple, zebra]);
    }

    #[test]
    fn update_shop_succeeds() {
        let connection = get_test_connection();
        let shop = create_shop(new_shop("Original", None), &connection).unwrap();

        update_shop(shop.id, new_shop("Updated", Some("2 High St")), &connection).unwrap();

        let updated = get_shop(shop.id, &connection).unwrap().unwrap();
        assert_eq!(updated.name.as_ref(), "Updated");
        assert_eq!(updated.address.as_deref(), Some("2 High St"));
    }

    #[test]
    fn update_shop_with_invalid_id_fails() {
        let connection = get_test_connection();

        let result = update_shop(999999, new_shop("Updated", None), &connection);

        assert_eq!(result, Err(Error::UpdateMissingShop));
    }

    #[test]
    fn delete_shop_succeeds() {
        let connection = get_test_connection();
        let shop = create_shop(new_shop("ToDelete", None), &connection).unwrap();

        delete_shop(shop.id, &connection).unwrap();

        assert_eq!(get_shop(shop.id, &connection), Ok(None));
    }

    #[test]
    fn delete_shop_with_invalid_id_fails() {
        let connection = get_test_connection();

        let result = delete_shop(999999, &connection);

        assert_eq!(result, Err(Error::DeleteMissingShop));
    }
}
