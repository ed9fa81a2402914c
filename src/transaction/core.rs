//! Defines the core data models and database queries for transactions.

use std::{collections::HashMap, fmt::Display, str::FromStr};

use rusqlite::{
    Connection, Params, Row,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, Type, ValueRef},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    database_id::{CategoryId, TransactionId},
    db::map_category_error,
    tag::TagName,
};

// ============================================================================
// MODELS
// ============================================================================

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// Money coming in, e.g. wages.
    Income,
    /// Money going out, e.g. rent.
    Expense,
}

impl TransactionType {
    /// The name used for the type in the database, JSON and CSV.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "Income" => Ok(TransactionType::Income),
            "Expense" => Ok(TransactionType::Expense),
            other => Err(FromSqlError::Other(
                format!("invalid transaction type \"{other}\"").into(),
            )),
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// A short text description of what the transaction was for.
    pub title: String,
    /// The amount of money spent or earned in this transaction.
    pub amount: Decimal,
    /// When the transaction happened.
    pub date: Date,
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The ID of the category the transaction belongs to.
    pub category_id: Option<CategoryId>,
    /// Free-form labels, in the order they were given.
    pub tags: Vec<TagName>,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        title: &str,
        amount: Decimal,
        date: Date,
        transaction_type: TransactionType,
    ) -> TransactionBuilder {
        TransactionBuilder {
            title: title.to_owned(),
            amount,
            date,
            transaction_type,
            category_id: None,
            tags: Vec::new(),
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// The amount is not validated here. Endpoints reject zero amounts before a
/// builder reaches the database.
///
/// # Examples
///
/// ```ignore
/// use rust_decimal_macros::dec;
/// use time::macros::date;
///
/// use crate::transaction::{Transaction, TransactionType};
///
/// let builder = Transaction::build(
///         "Weekly groceries",
///         dec!(85.40),
///         date!(2025 - 01 - 15),
///         TransactionType::Expense,
///     )
///     .category_id(Some(2))
///     .tags(vec![TagName::new_unchecked("food")]);
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// A short text description of the transaction.
    pub title: String,

    /// The monetary amount of the transaction.
    ///
    /// The direction of the money is given by `transaction_type`, so this is
    /// normally a positive number.
    pub amount: Decimal,

    /// The date when the transaction occurred.
    pub date: Date,

    /// Whether the transaction is income or an expense.
    pub transaction_type: TransactionType,

    /// The category of the transaction, e.g. "Groceries", "Transport", "Rent".
    pub category_id: Option<CategoryId>,

    /// Free-form labels for the transaction.
    pub tags: Vec<TagName>,
}

impl TransactionBuilder {
    /// Set the category id for the transaction.
    pub fn category_id(mut self, category_id: Option<CategoryId>) -> Self {
        self.category_id = category_id;
        self
    }

    /// Set the tags for the transaction.
    pub fn tags(mut self, tags: Vec<TagName>) -> Self {
        self.tags = tags;
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

const SELECT_TRANSACTION: &str =
    "SELECT id, title, amount, date, type, category_id FROM \"transaction\"";

/// Create a new transaction and its tags in the database from a builder.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidCategory] if the category ID does not refer to a real category,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let sql_transaction = connection.unchecked_transaction()?;

    let mut transaction = sql_transaction
        .prepare(
            "INSERT INTO \"transaction\" (title, amount, date, type, category_id)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, title, amount, date, type, category_id",
        )?
        .query_row(
            (
                &builder.title,
                builder.amount.to_string(),
                builder.date,
                builder.transaction_type,
                builder.category_id,
            ),
            map_transaction_row,
        )
        .map_err(|error| map_category_error(error, builder.category_id))?;

    insert_tags(transaction.id, &builder.tags, &sql_transaction)?;
    sql_transaction.commit()?;

    transaction.tags = builder.tags;

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let mut transaction = connection
        .prepare(&format!("{SELECT_TRANSACTION} WHERE id = :id"))?
        .query_row(&[(":id", &id)], map_transaction_row)?;

    transaction.tags = get_tags(id, connection)?;

    Ok(transaction)
}

/// Retrieve every transaction ordered by ID.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    query_transactions("", (), connection)
}

/// Retrieve the transactions in a category ordered by ID.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn get_transactions_by_category(
    category_id: CategoryId,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    query_transactions(
        "WHERE category_id = :category_id",
        &[(":category_id", &category_id)],
        connection,
    )
}

/// Retrieve the transactions that have exactly the tag `tag`, ordered by ID.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn get_transactions_by_tag(
    tag: &str,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    query_transactions(
        "WHERE id IN (SELECT transaction_id FROM transaction_tag WHERE tag = :tag)",
        &[(":tag", &tag)],
        connection,
    )
}

/// Replace every field of the transaction `id` with the values in `builder`.
///
/// # Errors
/// This function will return a:
/// - [Error::UpdateMissingTransaction] if `id` does not refer to a transaction,
/// - [Error::InvalidCategory] if the category ID does not refer to a real category,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_transaction(
    id: TransactionId,
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let sql_transaction = connection.unchecked_transaction()?;

    let rows_affected = sql_transaction
        .execute(
            "UPDATE \"transaction\"
             SET title = ?1, amount = ?2, date = ?3, type = ?4, category_id = ?5
             WHERE id = ?6",
            (
                &builder.title,
                builder.amount.to_string(),
                builder.date,
                builder.transaction_type,
                builder.category_id,
                id,
            ),
        )
        .map_err(|error| map_category_error(error, builder.category_id))?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingTransaction);
    }

    replace_tags(id, &builder.tags, &sql_transaction)?;
    sql_transaction.commit()?;

    get_transaction(id, connection)
}

/// Replace the tags on the transaction `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a transaction,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn set_transaction_tags(
    id: TransactionId,
    tags: &[TagName],
    connection: &Connection,
) -> Result<Transaction, Error> {
    let sql_transaction = connection.unchecked_transaction()?;

    let exists: bool = sql_transaction.query_row(
        "SELECT EXISTS(SELECT 1 FROM \"transaction\" WHERE id = ?1)",
        [id],
        |row| row.get(0),
    )?;

    if !exists {
        return Err(Error::NotFound);
    }

    replace_tags(id, tags, &sql_transaction)?;
    sql_transaction.commit()?;

    get_transaction(id, connection)
}

/// Delete the transaction `id` along with its tags.
///
/// # Errors
/// This function will return a:
/// - [Error::DeleteMissingTransaction] if `id` does not refer to a transaction,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<(), Error> {
    let rows_affected =
        connection.execute("DELETE FROM \"transaction\" WHERE id = :id", &[(":id", &id)])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingTransaction);
    }

    Ok(())
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
#[cfg(test)]
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction and transaction tag tables in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_tables(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                amount TEXT NOT NULL,
                date TEXT NOT NULL,
                type TEXT NOT NULL CHECK (type IN ('Income', 'Expense')),
                category_id INTEGER,
                FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE SET NULL
                )",
        (),
    )?;

    // Ensure the sequence starts at 1. `sqlite_sequence` has no unique key on
    // `name`, so only seed it once.
    connection.execute(
        "INSERT INTO sqlite_sequence (name, seq)
        SELECT 'transaction', 0
        WHERE NOT EXISTS (SELECT 1 FROM sqlite_sequence WHERE name = 'transaction')",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date_category ON \"transaction\"(date, category_id);",
        (),
    )?;

    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS transaction_tag (
            transaction_id INTEGER NOT NULL,
            position INTEGER NOT NULL,
            tag TEXT NOT NULL,
            PRIMARY KEY(transaction_id, position),
            FOREIGN KEY(transaction_id) REFERENCES \"transaction\"(id) ON UPDATE CASCADE ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_transaction_tag_tag ON transaction_tag(tag);",
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
///
/// The returned transaction has no tags, those live in a separate table.
fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let title = row.get(1)?;
    let raw_amount: String = row.get(2)?;
    let amount = Decimal::from_str(&raw_amount)
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(error)))?;
    let date = row.get(3)?;
    let transaction_type = row.get(4)?;
    let category_id = row.get(5)?;

    Ok(Transaction {
        id,
        title,
        amount,
        date,
        transaction_type,
        category_id,
        tags: Vec::new(),
    })
}

fn insert_tags(
    transaction_id: TransactionId,
    tags: &[TagName],
    connection: &Connection,
) -> Result<(), Error> {
    let mut statement = connection
        .prepare("INSERT INTO transaction_tag (transaction_id, position, tag) VALUES (?1, ?2, ?3)")?;

    for (position, tag) in tags.iter().enumerate() {
        statement.execute((transaction_id, position as i64, tag.as_ref()))?;
    }

    Ok(())
}

fn replace_tags(
    transaction_id: TransactionId,
    tags: &[TagName],
    connection: &Connection,
) -> Result<(), Error> {
    connection.execute(
        "DELETE FROM transaction_tag WHERE transaction_id = ?1",
        [transaction_id],
    )?;

    insert_tags(transaction_id, tags, connection)
}

fn get_tags(transaction_id: TransactionId, connection: &Connection) -> Result<Vec<TagName>, Error> {
    connection
        .prepare("SELECT tag FROM transaction_tag WHERE transaction_id = ?1 ORDER BY position ASC")?
        .query_map([transaction_id], |row| {
            let raw_tag: String = row.get(0)?;
            Ok(TagName::new_unchecked(&raw_tag))
        })?
        .collect::<Result<Vec<_>, rusqlite::Error>>()
        .map_err(|error| error.into())
}

/// Select the transactions matching `filter` and attach their tags.
///
/// `filter` is either empty or a `WHERE` clause over the transaction table,
/// and is reused to select the tags so that both queries see the same rows.
fn query_transactions<P: Params + Copy>(
    filter: &str,
    params: P,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let mut transactions = connection
        .prepare(&format!("{SELECT_TRANSACTION} {filter} ORDER BY id ASC"))?
        .query_map(params, map_transaction_row)?
        .collect::<Result<Vec<_>, rusqlite::Error>>()?;

    if transactions.is_empty() {
        return Ok(transactions);
    }

    let mut tags_by_transaction: HashMap<TransactionId, Vec<TagName>> = HashMap::new();
    let mut statement = connection.prepare(&format!(
        "SELECT transaction_id, tag FROM transaction_tag
         WHERE transaction_id IN (SELECT id FROM \"transaction\" {filter})
         ORDER BY transaction_id ASC, position ASC"
    ))?;
    let rows = statement.query_map(params, |row| {
        let transaction_id: TransactionId = row.get(0)?;
        let raw_tag: String = row.get(1)?;
        Ok((transaction_id, TagName::new_unchecked(&raw_tag)))
    })?;

    for row in rows {
        let (transaction_id, tag) = row?;
        tags_by_transaction
            .entry(transaction_id)
            .or_default()
            .push(tag);
    }

    for transaction in transactions.iter_mut() {
        if let Some(tags) = tags_by_transaction.remove(&transaction.id) {
            transaction.tags = tags;
        }
    }

    Ok(transactions)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use rust_decimal_macros::dec;
    use time::macros::date;

    use crate::{
        Error,
        category::{CategoryName, create_category},
        db::initialize,
        tag::TagName,
        transaction::{
            Transaction, TransactionType, count_transactions, create_transaction,
            delete_transaction, get_all_transactions, get_transaction,
            get_transactions_by_category, get_transactions_by_tag, set_transaction_tags,
            update_transaction,
        },
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn tags(raw: &[&str]) -> Vec<TagName> {
        raw.iter().map(|tag| TagName::new_unchecked(tag)).collect()
    }

    #[test]
    fn create_succeeds() {
        let conn = get_test_connection();
        let amount = dec!(12.30);

        let result = create_transaction(
            Transaction::build("Lunch", amount, date!(2025 - 10 - 05), TransactionType::Expense)
                .tags(tags(&["food", "work"])),
            &conn,
        );

        match result {
            Ok(transaction) => {
                assert_eq!(transaction.amount, amount);
                assert_eq!(transaction.title, "Lunch");
                assert_eq!(transaction.tags, tags(&["food", "work"]));
            }
            Err(error) => panic!("Unexpected error: {error}"),
        }
    }

    #[test]
    fn create_preserves_decimal_precision() {
        let conn = get_test_connection();
        let created = create_transaction(
            Transaction::build("Coffee", dec!(4.05), date!(2025 - 10 - 05), TransactionType::Expense),
            &conn,
        )
        .unwrap();

        let fetched = get_transaction(created.id, &conn).unwrap();

        assert_eq!(fetched.amount, dec!(4.05));
        assert_eq!(fetched, created);
    }

    #[test]
    fn create_fails_on_invalid_category_id() {
        let conn = get_test_connection();
        let category_id = Some(42);

        let result = create_transaction(
            Transaction::build("", dec!(123.45), date!(2025 - 10 - 04), TransactionType::Expense)
                .category_id(category_id),
            &conn,
        );

        assert_eq!(result, Err(Error::InvalidCategory(category_id)));
        assert_eq!(count_transactions(&conn), Ok(0));
    }

    #[test]
    fn get_all_returns_transactions_in_id_order_with_tags() {
        let conn = get_test_connection();
        let first = create_transaction(
            Transaction::build("Pay", dec!(2000), date!(2024 - 01 - 05), TransactionType::Income)
                .tags(tags(&["salary"])),
            &conn,
        )
        .unwrap();
        let second = create_transaction(
            Transaction::build("Rent", dec!(500), date!(2024 - 01 - 10), TransactionType::Expense),
            &conn,
        )
        .unwrap();

        let got = get_all_transactions(&conn).expect("Could not get transactions");

        assert_eq!(got, vec![first, second]);
    }

    #[test]
    fn get_by_category_only_returns_matching_transactions() {
        let conn = get_test_connection();
        let food = create_category(CategoryName::new_unchecked("Food"), &conn).unwrap();
        let want = create_transaction(
            Transaction::build("Apples", dec!(3), date!(2024 - 01 - 05), TransactionType::Expense)
                .category_id(Some(food.id)),
            &conn,
        )
        .unwrap();
        create_transaction(
            Transaction::build("Bus", dec!(2), date!(2024 - 01 - 05), TransactionType::Expense),
            &conn,
        )
        .unwrap();

        let got = get_transactions_by_category(food.id, &conn).unwrap();

        assert_eq!(got, vec![want]);
    }

    #[test]
    fn get_by_tag_matches_exact_tag() {
        let conn = get_test_connection();
        let want = create_transaction(
            Transaction::build("Dinner", dec!(40), date!(2024 - 03 - 01), TransactionType::Expense)
                .tags(tags(&["date night", "food"])),
            &conn,
        )
        .unwrap();
        create_transaction(
            Transaction::build("Snacks", dec!(5), date!(2024 - 03 - 02), TransactionType::Expense)
                .tags(tags(&["Food"])),
            &conn,
        )
        .unwrap();

        let got = get_transactions_by_tag("food", &conn).unwrap();

        assert_eq!(got, vec![want]);
    }

    #[test]
    fn update_replaces_all_fields() {
        let conn = get_test_connection();
        let created = create_transaction(
            Transaction::build("Test", dec!(100), date!(2024 - 01 - 01), TransactionType::Expense)
                .tags(tags(&["old"])),
            &conn,
        )
        .unwrap();

        let updated = update_transaction(
            created.id,
            Transaction::build("Updated", dec!(200), date!(2024 - 02 - 02), TransactionType::Income)
                .tags(tags(&["new", "tags"])),
            &conn,
        )
        .expect("Could not update transaction");

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Updated");
        assert_eq!(updated.amount, dec!(200));
        assert_eq!(updated.date, date!(2024 - 02 - 02));
        assert_eq!(updated.transaction_type, TransactionType::Income);
        assert_eq!(updated.tags, tags(&["new", "tags"]));
    }

    #[test]
    fn update_missing_transaction_fails() {
        let conn = get_test_connection();

        let result = update_transaction(
            999,
            Transaction::build("Nope", dec!(1), date!(2024 - 01 - 01), TransactionType::Income),
            &conn,
        );

        assert_eq!(result, Err(Error::UpdateMissingTransaction));
    }

    #[test]
    fn set_tags_replaces_existing_tags() {
        let conn = get_test_connection();
        let created = create_transaction(
            Transaction::build("Gym", dec!(60), date!(2024 - 01 - 01), TransactionType::Expense)
                .tags(tags(&["health"])),
            &conn,
        )
        .unwrap();

        let got = set_transaction_tags(created.id, &tags(&["fitness", "monthly"]), &conn).unwrap();

        assert_eq!(got.tags, tags(&["fitness", "monthly"]));
        assert!(get_transactions_by_tag("health", &conn).unwrap().is_empty());
    }

    #[test]
    fn set_tags_on_missing_transaction_returns_not_found() {
        let conn = get_test_connection();

        let result = set_transaction_tags(1, &tags(&["a"]), &conn);

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn delete_removes_transaction_and_tags() {
        let conn = get_test_connection();
        let created = create_transaction(
            Transaction::build("Gym", dec!(60), date!(2024 - 01 - 01), TransactionType::Expense)
                .tags(tags(&["health"])),
            &conn,
        )
        .unwrap();

        delete_transaction(created.id, &conn).expect("Could not delete transaction");

        assert_eq!(get_transaction(created.id, &conn), Err(Error::NotFound));
        assert!(get_transactions_by_tag("health", &conn).unwrap().is_empty());
    }

    #[test]
    fn delete_missing_transaction_fails() {
        let conn = get_test_connection();

        assert_eq!(
            delete_transaction(1, &conn),
            Err(Error::DeleteMissingTransaction)
        );
    }

    #[test]
    fn get_count() {
        let conn = get_test_connection();
        let today = date!(2025 - 10 - 05);
        let want_count = 20;
        for i in 1..=want_count {
            create_transaction(
                Transaction::build("", i.into(), today, TransactionType::Expense),
                &conn,
            )
            .expect("Could not create transaction");
        }

        let got_count = count_transactions(&conn).expect("Could not get count");

        assert_eq!(want_count, got_count);
    }
}
