/*! Database schema initialisation. */

use rusqlite::Connection;

use crate::{Error, receipt::create_receipt_tables};

/// Create all the tables the application needs, if they do not exist yet.
///
/// The tables are created in a single transaction, so either all of them are created or none
/// are.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let sql_transaction = connection.unchecked_transaction()?;

    create_receipt_tables(&sql_transaction)?;

    sql_transaction.commit()?;

    Ok(())
}
