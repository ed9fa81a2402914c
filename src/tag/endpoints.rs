//! Endpoints for tagging transactions and looking transactions up by tag.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    Error,
    database_id::TransactionId,
    db::lock_connection,
    tag::{TagName, TagsData},
    transaction::{Transaction, TransactionState, get_transactions_by_tag, set_transaction_tags},
};

/// Replace the tags on a transaction, responds with the updated transaction.
pub async fn set_transaction_tags_endpoint(
    State(state): State<TransactionState>,
    Path(transaction_id): Path<TransactionId>,
    Json(data): Json<TagsData>,
) -> Result<Json<Transaction>, Error> {
    let tags = TagName::parse_all(&data.tags)?;

    let connection = lock_connection(&state.db_connection)?;

    set_transaction_tags(transaction_id, &tags, &connection).map(Json)
}

/// List the transactions that carry exactly the tag in the path.
///
/// The path tag is trimmed the same way stored tags are, so an empty tag is
/// rejected with [Error::EmptyTagName].
pub async fn get_tag_transactions_endpoint(
    State(state): State<TransactionState>,
    Path(tag): Path<String>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let tag = TagName::new(&tag)?;

    let connection = lock_connection(&state.db_connection)?;

    get_transactions_by_tag(tag.as_ref(), &connection).map(Json)
}

#[cfg(test)]
mod tag_endpoint_tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::{
        endpoints::{self, format_endpoint},
        tag::TagName,
        test_utils::{create_test_transaction, get_test_server},
        transaction::{Transaction, TransactionType},
    };

    fn transaction_tags_path(id: i64) -> String {
        format_endpoint(endpoints::TRANSACTION_TAGS, id)
    }

    fn tag_transactions_path(tag: &str) -> String {
        endpoints::TAG_TRANSACTIONS.replace("{tag}", tag)
    }

    #[tokio::test]
    async fn set_tags_replaces_tags() {
        let server = get_test_server();
        let created =
            create_test_transaction(&server, "Cinema", "20", "2024-05-01", TransactionType::Expense)
                .await;

        let response = server
            .put(&transaction_tags_path(created.id))
            .json(&json!({ "tags": ["fun", "weekend"] }))
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(
            response.json::<Transaction>().tags,
            vec![
                TagName::new_unchecked("fun"),
                TagName::new_unchecked("weekend")
            ]
        );
    }

    #[tokio::test]
    async fn set_tags_on_missing_transaction_returns_not_found() {
        let server = get_test_server();

        let response = server
            .put(&transaction_tags_path(5))
            .json(&json!({ "tags": ["fun"] }))
            .await;

        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn set_empty_tag_returns_bad_request() {
        let server = get_test_server();
        let created =
            create_test_transaction(&server, "Cinema", "20", "2024-05-01", TransactionType::Expense)
                .await;

        let response = server
            .put(&transaction_tags_path(created.id))
            .json(&json!({ "tags": [""] }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_tag_transactions_returns_tagged_transactions() {
        let server = get_test_server();
        let tagged =
            create_test_transaction(&server, "Cinema", "20", "2024-05-01", TransactionType::Expense)
                .await;
        create_test_transaction(&server, "Rent", "900", "2024-05-01", TransactionType::Expense)
            .await;
        let tagged = server
            .put(&transaction_tags_path(tagged.id))
            .json(&json!({ "tags": ["fun"] }))
            .await
            .json::<Transaction>();

        let transactions = server
            .get(&tag_transactions_path("fun"))
            .await
            .json::<Vec<Transaction>>();

        assert_eq!(transactions, vec![tagged]);
    }

    #[tokio::test]
    async fn get_tag_transactions_trims_path_tag() {
        let server = get_test_server();
        let created =
            create_test_transaction(&server, "Market", "35", "2024-05-02", TransactionType::Expense)
                .await;
        let tagged = server
            .put(&transaction_tags_path(created.id))
            .json(&json!({ "tags": [" food "] }))
            .await
            .json::<Transaction>();

        let transactions = server
            .get(&tag_transactions_path("%20food%20"))
            .await
            .json::<Vec<Transaction>>();

        assert_eq!(transactions, vec![tagged]);
    }

    #[tokio::test]
    async fn get_blank_tag_transactions_returns_bad_request() {
        let server = get_test_server();

        let response = server.get(&tag_transactions_path("%20")).await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }
}
