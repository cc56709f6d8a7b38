//! Database operations for product categories.

use rusqlite::{Connection, OptionalExtension, Row};

use crate::{
    EntityName, Error,
    category::{Category, CategoryId},
};

/// Create a category and return it with its generated ID.
pub fn create_category(name: EntityName, connection: &Connection) -> Result<Category, Error> {
    connection.execute("INSERT INTO category (name) VALUES (?1);", (name.as_ref(),))?;

    let id = connection.last_insert_rowid();

    Ok(Category { id, name })
}

/// Retrieve a single category by ID, or `None` if there is no such category.
pub fn get_category(
    category_id: CategoryId,
    connection: &Connection,
) -> Result<Option<Category>, Error> {
    connection
        .prepare("SELECT id, name FROM category WHERE id = :id;")?
        .query_row(&[(":id", &category_id)], map_row)
        .optional()
        .map_err(|error| error.into())
}

/// Retrieve all categories ordered alphabetically by name.
pub fn get_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare("SELECT id, name FROM category ORDER BY name ASC;")?
        .query_map([], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Rename a category. Returns an error if the category doesn't exist.
pub fn update_category(
    category_id: CategoryId,
    new_name: EntityName,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE category SET name = ?1 WHERE id = ?2",
        (new_name.as_ref(), category_id),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingCategory);
    }

    Ok(())
}

/// Delete a category by ID. Its products become uncategorised.
pub fn delete_category(category_id: CategoryId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM category WHERE id = ?1", [category_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingCategory);
    }

    Ok(())
}

/// Initialize the category table and indexes.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        );

        CREATE INDEX IF NOT EXISTS idx_category_name ON category(name);",
    )?;

    Ok(())
}

pub(crate) fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let name = EntityName::new_unchecked(&raw_name);

    Ok(Category { id, name })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rusqlite::Connection;

    use crate::{
        EntityName, Error,
        category::{
            create_category, delete_category, get_all_categories, get_category, update_category,
        },
        db::initialize,
    };

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        connection
    }

    #[test]
    fn create_category_succeeds() {
        let connection = get_test_connection();
        let name = EntityName::new("Dairy").unwrap();

        let category = create_category(name.clone(), &connection).expect("Could not create category");

        assert!(category.id > 0);
        assert_eq!(category.name, name);
    }

    #[test]
    fn get_category_with_invalid_id_returns_none() {
        let connection = get_test_connection();
        let inserted = create_category(EntityName::new_unchecked("Foo"), &connection).unwrap();

        assert_eq!(get_category(inserted.id, &connection), Ok(Some(inserted.clone())));
        assert_eq!(get_category(inserted.id + 123, &connection), Ok(None));
    }

    #[test]
    fn get_all_categories_returns_every_category() {
        let connection = get_test_connection();
        let inserted = HashSet::from([
            create_category(EntityName::new_unchecked("Foo"), &connection).unwrap(),
            create_category(EntityName::new_unchecked("Bar"), &connection).unwrap(),
        ]);

        let selected = get_all_categories(&connection).expect("Could not get all categories");

        assert_eq!(inserted, HashSet::from_iter(selected));
    }

    #[test]
    fn update_category_succeeds() {
        let connection = get_test_connection();
        let category = create_category(EntityName::new_unchecked("Original"), &connection).unwrap();

        update_category(category.id, EntityName::new_unchecked("Updated"), &connection).unwrap();

        let updated = get_category(category.id, &connection).unwrap().unwrap();
        assert_eq!(updated.name.as_ref(), "Updated");
    }

    #[test]
    fn update_and_delete_missing_category_fail() {
        let connection = get_test_connection();

        assert_eq!(
            update_category(999999, EntityName::new_unchecked("Updated"), &connection),
            Err(Error::UpdateMissingCategory)
        );
        assert_eq!(
            delete_category(999999, &connection),
            Err(Error::DeleteMissingCategory)
        );
    }

    #[test]
    fn delete_category_succeeds() {
        let connection = get_test_connection();
        let category = create_category(EntityName::new_unchecked("ToDelete"), &connection).unwrap();

        delete_category(category.id, &connection).unwrap();

        assert_eq!(get_category(category.id, &connection), Ok(None));
    }
}
