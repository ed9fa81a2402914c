//! Endpoints for the balance, period summaries and spending by category.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, Query, State},
};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, Month};

use crate::{
    AppState, Error,
    category::get_all_categories,
    db::lock_connection,
    report::aggregation::{
        CategorySpending, PeriodSummary, current_balance, grouped_spending, period_summary,
    },
    transaction::get_all_transactions,
};

/// The state needed for the report endpoints.
#[derive(Debug, Clone)]
pub struct ReportState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ReportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The response body for the balance endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceResponse {
    /// Total income minus total expenses.
    pub balance: Decimal,
}

/// The response body for the monthly summary endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// The month formatted as "YYYY-MM".
    pub month: String,
    /// The sum of income amounts.
    pub income: Decimal,
    /// The sum of expense amounts.
    pub expenses: Decimal,
    /// Income minus expenses.
    pub savings: Decimal,
}

/// The response body for the yearly summary endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlySummary {
    /// The calendar year.
    pub year: i32,
    /// The sum of income amounts.
    pub income: Decimal,
    /// The sum of expense amounts.
    pub expenses: Decimal,
    /// Income minus expenses.
    pub savings: Decimal,
}

/// The date range for the spending report, both ends inclusive.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SpendingQuery {
    /// The first day to include.
    pub start_date: Date,
    /// The last day to include.
    pub end_date: Date,
}

/// The response body for the spending report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingReport {
    /// Spending per category, ordered by category ID with uncategorized spending last.
    pub categories: Vec<CategorySpending>,
}

/// Get the current balance over every transaction.
pub async fn get_balance_endpoint(
    State(state): State<ReportState>,
) -> Result<Json<BalanceResponse>, Error> {
    let transactions = {
        let connection = lock_connection(&state.db_connection)?;
        get_all_transactions(&connection)?
    };

    Ok(Json(BalanceResponse {
        balance: current_balance(&transactions),
    }))
}

/// Get the income, expenses and savings for a single month.
///
/// Responds with 400 if `month` is not from 1 to 12.
pub async fn get_monthly_summary_endpoint(
    State(state): State<ReportState>,
    Path((year, month_number)): Path<(i32, u8)>,
) -> Result<Json<MonthlySummary>, Error> {
    let month = Month::try_from(month_number).map_err(|_| Error::InvalidMonth(month_number))?;

    let transactions = {
        let connection = lock_connection(&state.db_connection)?;
        get_all_transactions(&connection)?
    };

    let PeriodSummary {
        income,
        expenses,
        savings,
    } = period_summary(&transactions, year, Some(month));

    Ok(Json(MonthlySummary {
        month: format!("{year:04}-{month_number:02}"),
        income,
        expenses,
        savings,
    }))
}

/// Get the income, expenses and savings for a whole year.
pub async fn get_yearly_summary_endpoint(
    State(state): State<ReportState>,
    Path(year): Path<i32>,
) -> Result<Json<YearlySummary>, Error> {
    let transactions = {
        let connection = lock_connection(&state.db_connection)?;
        get_all_transactions(&connection)?
    };

    let PeriodSummary {
        income,
        expenses,
        savings,
    } = period_summary(&transactions, year, None);

    Ok(Json(YearlySummary {
        year,
        income,
        expenses,
        savings,
    }))
}

/// Get the expenses in a date range grouped by category.
pub async fn get_spending_report_endpoint(
    State(state): State<ReportState>,
    Query(query): Query<SpendingQuery>,
) -> Result<Json<SpendingReport>, Error> {
    let (transactions, categories) = {
        let connection = lock_connection(&state.db_connection)?;
        (
            get_all_transactions(&connection)?,
            get_all_categories(&connection)?,
        )
    };

    Ok(Json(SpendingReport {
        categories: grouped_spending(
            &transactions,
            &categories,
            query.start_date,
            query.end_date,
        ),
    }))
}
