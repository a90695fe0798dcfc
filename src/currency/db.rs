//! Database operations for currencies.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    currency::{Currency, CurrencyId, NewCurrency},
};

/// Create a currency and return it with its generated ID.
///
/// # Errors
///
/// Returns [Error::Validation] if the name or code is already taken.
pub fn create_currency(currency: NewCurrency, connection: &Connection) -> Result<Currency, Error> {
    connection.execute(
        "INSERT INTO currency (name, code, symbol) VALUES (?1, ?2, ?3);",
        (&currency.name, &currency.code, &currency.symbol),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Currency {
        id,
        name: currency.name,
        code: currency.code,
        symbol: currency.symbol,
    })
}

/// Retrieve a single currency by ID.
pub fn get_currency(currency_id: CurrencyId, connection: &Connection) -> Result<Currency, Error> {
    connection
        .prepare("SELECT id, name, code, symbol FROM currency WHERE id = :id;")?
        .query_row(&[(":id", &currency_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve a single currency by its code, e.g. "NZD".
pub fn get_currency_by_code(code: &str, connection: &Connection) -> Result<Currency, Error> {
    connection
        .prepare("SELECT id, name, code, symbol FROM currency WHERE code = :code;")?
        .query_row(&[(":code", code)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all currencies in the order they were created.
pub fn get_all_currencies(connection: &Connection) -> Result<Vec<Currency>, Error> {
    connection
        .prepare("SELECT id, name, code, symbol FROM currency ORDER BY id ASC;")?
        .query_map([], map_row)?
        .map(|maybe_currency| maybe_currency.map_err(|error| error.into()))
        .collect()
}

/// Overwrite a currency's fields. Returns [Error::NotFound] if the currency doesn't exist.
///
/// Transactions refer to the currency by ID, so they follow a change of code.
pub fn update_currency(
    currency_id: CurrencyId,
    currency: NewCurrency,
    connection: &Connection,
) -> Result<Currency, Error> {
    let rows_affected = connection.execute(
        "UPDATE currency SET name = ?1, code = ?2, symbol = ?3 WHERE id = ?4",
        (&currency.name, &currency.code, &currency.symbol, currency_id),
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(Currency {
        id: currency_id,
        name: currency.name,
        code: currency.code,
        symbol: currency.symbol,
    })
}

/// Delete a currency by ID.
///
/// # Errors
///
/// Returns [Error::NotFound] if the currency doesn't exist, or
/// [Error::ProtectedReference] if any transaction is paid in it.
pub fn delete_currency(currency_id: CurrencyId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection
        .execute("DELETE FROM currency WHERE id = ?1", [currency_id])
        .map_err(Error::from)
        .map_err(|error| match error {
            Error::ForeignKeyViolation => Error::ProtectedReference(format!(
                "Cannot delete currency {currency_id} because transactions still refer to it."
            )),
            error => error,
        })?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Initialize the currency table.
pub fn create_currency_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS currency (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            code TEXT NOT NULL UNIQUE,
            symbol TEXT NOT NULL DEFAULT '$'
        );",
        (),
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Currency, rusqlite::Error> {
    Ok(Currency {
        id: row.get(0)?,
        name: row.get(1)?,
        code: row.get(2)?,
        symbol: row.get(3)?,
    })
}
