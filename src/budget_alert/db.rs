//! Database operations for budget alerts.

use std::str::FromStr;

use rusqlite::{Connection, Row, types::Type};
use rust_decimal::Decimal;

use crate::{
    Error,
    budget_alert::{BudgetAlert, BudgetAlertData},
    db::map_category_error,
};

/// Create a budget alert and return it with its generated ID.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidCategory] if the category ID does not refer to a real category,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_budget_alert(
    data: BudgetAlertData,
    connection: &Connection,
) -> Result<BudgetAlert, Error> {
    connection
        .execute(
            "INSERT INTO budget_alert (category_id, threshold, message) VALUES (?1, ?2, ?3);",
            (data.category_id, data.threshold.to_string(), &data.message),
        )
        .map_err(|error| map_category_error(error, Some(data.category_id)))?;

    let id = connection.last_insert_rowid();

    Ok(BudgetAlert {
        id,
        category_id: data.category_id,
        threshold: data.threshold,
        message: data.message,
    })
}

/// Retrieve all budget alerts ordered by ID.
pub fn get_all_budget_alerts(connection: &Connection) -> Result<Vec<BudgetAlert>, Error> {
    connection
        .prepare("SELECT id, category_id, threshold, message FROM budget_alert ORDER BY id ASC;")?
        .query_map([], map_row)?
        .map(|maybe_alert| maybe_alert.map_err(|error| error.into()))
        .collect()
}

/// Initialize the budget alert table.
///
/// The category table must already exist.
pub fn create_budget_alert_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS budget_alert (
            id INTEGER PRIMARY KEY,
            category_id INTEGER NOT NULL,
            threshold TEXT NOT NULL,
            message TEXT NOT NULL,
            FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE CASCADE
        )",
        (),
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<BudgetAlert, rusqlite::Error> {
    let id = row.get(0)?;
    let category_id = row.get(1)?;
    let raw_threshold: String = row.get(2)?;
    let threshold = Decimal::from_str(&raw_threshold)
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(error)))?;
    let message = row.get(3)?;

    Ok(BudgetAlert {
        id,
        category_id,
        threshold,
        message,
    })
}
