//! Database operations for producers.

use rusqlite::{Connection, OptionalExtension, Row};

use crate::{
    EntityName, Error,
    producer::{Producer, ProducerId},
};

/// Create a producer and return it with its generated ID.
pub fn create_producer(name: EntityName, connection: &Connection) -> Result<Producer, Error> {
    connection.execute("INSERT INTO producer (name) VALUES (?1);", (name.as_ref(),))?;

    let id = connection.last_insert_rowid();

    Ok(Producer { id, name })
}

/// Retrieve a single producer by ID, or `None` if there is no such producer.
pub fn get_producer(
    producer_id: ProducerId,
    connection: &Connection,
) -> Result<Option<Producer>, Error> {
    connection
        .prepare("SELECT id, name FROM producer WHERE id = :id;")?
        .query_row(&[(":id", &producer_id)], map_row)
        .optional()
        .map_err(|error| error.into())
}

/// Retrieve all producers ordered alphabetically by name.
pub fn get_all_producers(connection: &Connection) -> Result<Vec<Producer>, Error> {
    connection
        .prepare("SELECT id, name FROM producer ORDER BY name ASC;")?
        .query_map([], map_row)?
        .map(|maybe_producer| maybe_producer.map_err(|error| error.into()))
        .collect()
}

/// Rename a producer. Returns an error if the producer doesn't exist.
pub fn update_producer(
    producer_id: ProducerId,
    new_name: EntityName,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE producer SET name = ?1 WHERE id = ?2",
        (new_name.as_ref(), producer_id),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingProducer);
    }

    Ok(())
}

/// Delete a producer by ID. Its products are kept without a producer.
pub fn delete_producer(producer_id: ProducerId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM producer WHERE id = ?1", [producer_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingProducer);
    }

    Ok(())
}

/// Initialize the producer table and indexes.
pub fn create_producer_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS producer (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        );

        CREATE INDEX IF NOT EXISTS idx_producer_name ON producer(name);",
    )?;

    Ok(())
}

pub(crate) fn map_row(row: &Row) -> Result<Producer, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;

    Ok(Producer {
        id,
        name: EntityName::new_unchecked(&raw_name),
    })
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::{
        EntityName, Error,
        db::initialize,
        producer::{
            create_producer, delete_producer, get_all_producers, get_producer, update_producer,
        },
    };

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        connection
    }

    #[test]
    fn create_and_get_producer() {
        let connection = get_test_connection();

        let producer = create_producer(EntityName::new_unchecked("Acme Dairy"), &connection)
            .expect("Could not create producer");

        assert_eq!(get_producer(producer.id, &connection), Ok(Some(producer)));
    }

    #[test]
    fn get_all_producers_orders_by_name() {
        let connection = get_test_connection();
        let b = create_producer(EntityName::new_unchecked("Bravo"), &connection).unwrap();
        let a = create_producer(EntityName::new_unchecked("Alpha"), &connection).unwrap();

        assert_eq!(get_all_producers(&connection), Ok(vec![a, b]));
    }

    #[test]
    fn update_producer_succeeds() {
        let connection = get_test_connection();
        let producer = create_producer(EntityName::new_unchecked("Old"), &connection).unwrap();

        update_producer(producer.id, EntityName::new_unchecked("New"), &connection).unwrap();

        let updated = get_producer(producer.id, &connection).unwrap().unwrap();
        assert_eq!(updated.name.as_ref(), "New");
    }

    #[test]
    fn delete_producer_succeeds_once() {
        let connection = get_test_connection();
        let producer = create_producer(EntityName::new_unchecked("Gone"), &connection).unwrap();

        assert_eq!(delete_producer(producer.id, &connection), Ok(()));
        assert_eq!(
            delete_producer(producer.id, &connection),
            Err(Error::DeleteMissingProducer)
        );
        assert_eq!(get_producer(producer.id, &connection), Ok(None));
    }
}
