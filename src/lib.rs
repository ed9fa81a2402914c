//! A JSON API for tracking personal finances.
//!
//! Transactions, categories, tags and budget alerts are stored in SQLite and
//! served over HTTP. Reports such as the current balance, monthly and yearly
//! summaries, spending by category and budget status are computed on demand
//! from a snapshot of the stored transactions.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod budget_alert;
mod category;
mod database_id;
mod db;
mod endpoints;
mod error;
mod logging;
mod not_found;
mod report;
mod routing;
mod tag;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use budget_alert::{BudgetAlert, BudgetAlertData, create_budget_alert, get_all_budget_alerts};
pub use category::{Category, CategoryName, create_category, get_all_categories};
pub use database_id::{BudgetAlertId, CategoryId, DatabaseId, TransactionId};
pub use db::initialize as initialize_db;
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use report::{
    BudgetStatus, CategorySpending, PeriodSummary, TransactionFilter, budget_status,
    current_balance, filter_transactions, grouped_spending, period_summary, search_transactions,
};
pub use routing::build_router;
pub use tag::TagName;
pub use transaction::{
    Transaction, TransactionBuilder, TransactionType, create_transaction, get_all_transactions,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate_signal) => {
                terminate_signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
