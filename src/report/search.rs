//! Endpoints for searching transactions by title and filtering by amount or type.

use axum::{
    Json,
    extract::{Query, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use time::Date;

use crate::{
    Error,
    db::lock_connection,
    report::{
        ReportState,
        aggregation::{TransactionFilter, filter_transactions, search_transactions},
    },
    transaction::{Transaction, TransactionType, get_all_transactions},
};

/// The query parameters for the search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    /// The text to look for in transaction titles. Matching is case-sensitive.
    pub keyword: String,
    /// Exclude transactions before this date.
    pub start_date: Option<Date>,
    /// Exclude transactions after this date.
    pub end_date: Option<Date>,
}

/// The query parameters for the filter endpoint.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FilterQuery {
    /// Exclude transactions with a smaller amount.
    pub min_amount: Option<Decimal>,
    /// Exclude transactions with a larger amount.
    pub max_amount: Option<Decimal>,
    /// Only include transactions of this type.
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
}

impl From<FilterQuery> for TransactionFilter {
    fn from(query: FilterQuery) -> Self {
        Self {
            min_amount: query.min_amount,
            max_amount: query.max_amount,
            transaction_type: query.transaction_type,
        }
    }
}

/// List the transactions whose title contains the keyword.
pub async fn search_transactions_endpoint(
    State(state): State<ReportState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let transactions = {
        let connection = lock_connection(&state.db_connection)?;
        get_all_transactions(&connection)?
    };

    Ok(Json(search_transactions(
        &transactions,
        &query.keyword,
        query.start_date,
        query.end_date,
    )))
}

/// List the transactions within an amount range and/or of a given type.
pub async fn filter_transactions_endpoint(
    State(state): State<ReportState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let transactions = {
        let connection = lock_connection(&state.db_connection)?;
        get_all_transactions(&connection)?
    };

    Ok(Json(filter_transactions(&transactions, &query.into())))
}
