//! Budget alerts: spending thresholds per category, checked on demand.

mod db;
mod domain;
mod endpoints;

pub use db::{create_budget_alert, create_budget_alert_table, get_all_budget_alerts};
pub use domain::{BudgetAlert, BudgetAlertData};
pub use endpoints::{
    create_budget_alert_endpoint, get_budget_alerts_endpoint, get_budget_status_endpoint,
};
