use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    database_id::TransactionId,
    db::lock_connection,
    transaction::{TransactionState, core::delete_transaction},
};

/// The response body for a successful deletion.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeletedResponse {
    /// Confirms which transaction was deleted.
    pub message: String,
}

/// A route handler for deleting a transaction.
pub async fn delete_transaction_endpoint(
    State(state): State<TransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Json<DeletedResponse>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    delete_transaction(transaction_id, &connection)?;
    tracing::debug!("Deleted transaction {transaction_id}");

    Ok(Json(DeletedResponse {
        message: format!("Transaction with ID {transaction_id} deleted successfully."),
    }))
}

#[cfg(test)]
mod delete_transaction_endpoint_tests {
    use axum::http::StatusCode;

    use crate::{
        endpoints::{self, format_endpoint},
        test_utils::{create_test_transaction, get_test_server},
        transaction::TransactionType,
    };

    use super::DeletedResponse;

    #[tokio::test]
    async fn deletes_transaction() {
        let server = get_test_server();
        let created = create_test_transaction(
            &server,
            "Test",
            "1.23",
            "2025-10-26",
            TransactionType::Expense,
        )
        .await;
        let path = format_endpoint(endpoints::TRANSACTION, created.id);

        let response = server.delete(&path).await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(
            response.json::<DeletedResponse>().message,
            format!("Transaction with ID {} deleted successfully.", created.id)
        );
        assert_eq!(server.get(&path).await.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn deleting_missing_transaction_returns_not_found() {
        let server = get_test_server();

        let response = server
            .delete(&format_endpoint(endpoints::TRANSACTION, 999))
            .await;

        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }
}
