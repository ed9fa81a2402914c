//! Defines the endpoint for creating a new transaction.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::IntoResponse,
};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    AppState, Error,
    database_id::CategoryId,
    db::lock_connection,
    tag::TagName,
    transaction::{Transaction, TransactionBuilder, TransactionType, core::create_transaction},
};

/// The state needed to read, create and modify transactions.
#[derive(Debug, Clone)]
pub struct TransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The largest magnitude accepted for a transaction amount.
///
/// Summing more rows of this size than SQLite can hold still fits in a
/// [Decimal].
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// The request body for creating or updating a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionData {
    /// Text detailing the transaction.
    pub title: String,
    /// The value of the transaction, must not be zero or larger than
    /// [MAX_AMOUNT] in magnitude.
    pub amount: Decimal,
    /// The date when the transaction ocurred.
    pub date: Date,
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The category to file the transaction under.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// Labels to attach to the transaction.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl TransactionData {
    /// Validate the request and convert it into a [TransactionBuilder].
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if the amount is zero or larger than
    /// [MAX_AMOUNT] in magnitude, or [Error::EmptyTagName] if any tag is empty.
    pub fn into_builder(self) -> Result<TransactionBuilder, Error> {
        if self.amount.is_zero() || self.amount.abs() > Decimal::from(MAX_AMOUNT) {
            return Err(Error::InvalidAmount);
        }

        let tags = TagName::parse_all(&self.tags)?;

        Ok(
            Transaction::build(&self.title, self.amount, self.date, self.transaction_type)
                .category_id(self.category_id)
                .tags(tags),
        )
    }
}

/// A route handler for creating a new transaction, responds with the new
/// transaction and 201 Created.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    Json(data): Json<TransactionData>,
) -> Result<impl IntoResponse, Error> {
    let builder = data.into_builder()?;

    let connection = lock_connection(&state.db_connection)?;
    let transaction = create_transaction(builder, &connection)?;
    tracing::debug!("Created transaction {}", transaction.id);

    Ok((StatusCode::CREATED, Json(transaction)))
}
