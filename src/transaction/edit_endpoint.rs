//! Defines the endpoint for updating a transaction.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    Error,
    database_id::TransactionId,
    db::lock_connection,
    transaction::{Transaction, TransactionData, TransactionState, core::update_transaction},
};

/// A route handler for replacing every field of a transaction, responds with
/// the updated transaction.
pub async fn edit_transaction_endpoint(
    State(state): State<TransactionState>,
    Path(transaction_id): Path<TransactionId>,
    Json(data): Json<TransactionData>,
) -> Result<Json<Transaction>, Error> {
    let builder = data.into_builder()?;

    let connection = lock_connection(&state.db_connection)?;

    update_transaction(transaction_id, builder, &connection).map(Json)
}
