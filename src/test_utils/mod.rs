#![allow(missing_docs)]

pub(crate) mod http;

use axum_test::TestServer;
use rusqlite::Connection;
use serde_json::json;

use crate::{
    AppState, build_router, endpoints,
    transaction::{Transaction, TransactionType},
};

pub(crate) use http::{assert_content_type, get_header};

/// Create a test server over a fresh in-memory database.
#[track_caller]
pub(crate) fn get_test_server() -> TestServer {
    let connection = Connection::open_in_memory().expect("Could not open database in memory.");
    let state = AppState::new(connection).expect("Could not initialize database.");

    TestServer::try_new(build_router(state)).expect("Could not create test server.")
}

/// Create a transaction with no category or tags through the API.
pub(crate) async fn create_test_transaction(
    server: &TestServer,
    title: &str,
    amount: &str,
    date: &str,
    transaction_type: TransactionType,
) -> Transaction {
    let response = server
        .post(endpoints::TRANSACTIONS)
        .json(&json!({
            "title": title,
            "amount": amount,
            "date": date,
            "type": transaction_type,
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Transaction>()
}
