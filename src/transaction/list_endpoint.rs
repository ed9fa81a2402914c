//! Endpoints for reading transactions.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    Error,
    category::get_category,
    database_id::{CategoryId, TransactionId},
    db::lock_connection,
    transaction::{
        Transaction, TransactionState,
        core::{get_all_transactions, get_transaction, get_transactions_by_category},
    },
};

/// List every transaction ordered by ID.
pub async fn get_transactions_endpoint(
    State(state): State<TransactionState>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    get_all_transactions(&connection).map(Json)
}

/// Get a single transaction by its ID.
pub async fn get_transaction_endpoint(
    State(state): State<TransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Json<Transaction>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    get_transaction(transaction_id, &connection).map(Json)
}

/// List the transactions filed under a category.
///
/// Responds with 404 if the category does not exist, so that a typo in the ID
/// is not mistaken for an empty category.
pub async fn get_category_transactions_endpoint(
    State(state): State<TransactionState>,
    Path(category_id): Path<CategoryId>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    match get_category(category_id, &connection) {
        Ok(_) => {}
        Err(Error::NotFound) => return Err(Error::CategoryNotFound(category_id)),
        Err(error) => return Err(error),
    }

    get_transactions_by_category(category_id, &connection).map(Json)
}

#[cfg(test)]
mod list_transaction_endpoint_tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::{
        category::Category,
        endpoints::{self, format_endpoint},
        test_utils::{create_test_transaction, get_test_server},
        transaction::{Transaction, TransactionType},
    };

    #[tokio::test]
    async fn get_transactions_returns_all_transactions() {
        let server = get_test_server();
        let first =
            create_test_transaction(&server, "a", "1", "2024-01-01", TransactionType::Income).await;
        let second =
            create_test_transaction(&server, "b", "2", "2024-01-02", TransactionType::Expense)
                .await;

        let transactions = server
            .get(endpoints::TRANSACTIONS)
            .await
            .json::<Vec<Transaction>>();

        assert_eq!(transactions, vec![first, second]);
    }

    #[tokio::test]
    async fn get_transaction_returns_not_found_for_missing_id() {
        let server = get_test_server();

        let response = server
            .get(&format_endpoint(endpoints::TRANSACTION, 7))
            .await;

        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn get_category_transactions_filters_by_category() {
        let server = get_test_server();
        let category = server
            .post(endpoints::CATEGORIES)
            .json(&json!({ "name": "Food" }))
            .await
            .json::<Category>();
        let in_category = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({
                "title": "Apples",
                "amount": "3.50",
                "date": "2024-01-01",
                "type": "Expense",
                "category_id": category.id
            }))
            .await
            .json::<Transaction>();
        create_test_transaction(&server, "Bus", "2", "2024-01-01", TransactionType::Expense).await;

        let transactions = server
            .get(&format_endpoint(
                endpoints::CATEGORY_TRANSACTIONS,
                category.id,
            ))
            .await
            .json::<Vec<Transaction>>();

        assert_eq!(transactions, vec![in_category]);
    }

    #[tokio::test]
    async fn get_category_transactions_for_missing_category_returns_not_found() {
        let server = get_test_server();

        let response = server
            .get(&format_endpoint(endpoints::CATEGORY_TRANSACTIONS, 3))
            .await;

        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }
}
