//! Budget alert domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::database_id::{BudgetAlertId, CategoryId};

/// A spending threshold for a category.
///
/// Alerts are only ever compared against spending on demand, see
/// [crate::report::budget_status].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetAlert {
    /// The ID of the alert.
    pub id: BudgetAlertId,
    /// The category whose expenses are tracked.
    pub category_id: CategoryId,
    /// The amount of spending the alert is set for.
    pub threshold: Decimal,
    /// A note to show alongside the alert.
    pub message: String,
}

/// The request body for creating a budget alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetAlertData {
    /// The category whose expenses are tracked.
    pub category_id: CategoryId,
    /// The amount of spending the alert is set for.
    pub threshold: Decimal,
    /// A note to show alongside the alert.
    #[serde(default)]
    pub message: String,
}
