//! Budget alert creation, listing and status endpoints.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::IntoResponse,
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    budget_alert::{BudgetAlert, BudgetAlertData, create_budget_alert, get_all_budget_alerts},
    db::lock_connection,
    report::{BudgetStatus, budget_status},
    transaction::get_all_transactions,
};

/// The state needed for the budget alert endpoints.
#[derive(Debug, Clone)]
pub struct BudgetAlertState {
    /// The database connection shared by every request.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for BudgetAlertState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The response body for the budget status endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatusResponse {
    /// One status per alert, ordered by alert ID.
    pub alerts: Vec<BudgetStatus>,
}

/// Create a budget alert, responding with the new alert and 201 Created.
pub async fn create_budget_alert_endpoint(
    State(state): State<BudgetAlertState>,
    Json(data): Json<BudgetAlertData>,
) -> Result<impl IntoResponse, Error> {
    let connection = lock_connection(&state.db_connection)?;
    let alert = create_budget_alert(data, &connection)?;
    tracing::debug!(
        "Created budget alert {} for category {}",
        alert.id,
        alert.category_id
    );

    Ok((StatusCode::CREATED, Json(alert)))
}

/// List every budget alert.
pub async fn get_budget_alerts_endpoint(
    State(state): State<BudgetAlertState>,
) -> Result<Json<Vec<BudgetAlert>>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    get_all_budget_alerts(&connection).map(Json)
}

/// Show how much has been spent in each alert's category.
pub async fn get_budget_status_endpoint(
    State(state): State<BudgetAlertState>,
) -> Result<Json<BudgetStatusResponse>, Error> {
    let (alerts, transactions) = {
        let connection = lock_connection(&state.db_connection)?;
        (
            get_all_budget_alerts(&connection)?,
            get_all_transactions(&connection)?,
        )
    };

    Ok(Json(BudgetStatusResponse {
        alerts: budget_status(&alerts, &transactions),
    }))
}
