//! The API endpoints URIs.
//!
//! Endpoints that take a parameter, e.g., '/api/transactions/{transaction_id}',
//! use axum's `{name}` path syntax.

/// The route to list and create transactions.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route to access a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to replace the tags on a transaction.
pub const TRANSACTION_TAGS: &str = "/api/transactions/{transaction_id}/tags";
/// The route to list the transactions with a tag.
pub const TAG_TRANSACTIONS: &str = "/api/tags/{tag}/transactions";
/// The route to list and create categories.
pub const CATEGORIES: &str = "/api/categories";
/// The route to list the transactions in a category.
pub const CATEGORY_TRANSACTIONS: &str = "/api/categories/{category_id}/transactions";
/// The route to list and create budget alerts.
pub const BUDGET_ALERTS: &str = "/api/budget_alerts";
/// The route to compare budget alerts against spending.
pub const BUDGET_STATUS: &str = "/api/budget_alerts/status";
/// The route for the current balance.
pub const BALANCE: &str = "/api/balance";
/// The route for the income, expenses and savings in a month.
pub const MONTHLY_SUMMARY: &str = "/api/summary/monthly/{year}/{month}";
/// The route for the income, expenses and savings in a year.
pub const YEARLY_SUMMARY: &str = "/api/summary/yearly/{year}";
/// The route for spending grouped by category.
pub const SPENDING_REPORT: &str = "/api/reports/spending";
/// The route to download all transactions as CSV.
pub const EXPORT_CSV: &str = "/api/reports/transactions.csv";
/// The route to search transactions by title.
pub const SEARCH: &str = "/api/search";
/// The route to filter transactions by amount and type.
pub const FILTER: &str = "/api/filter";

/// Replace the first parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/transactions/{transaction_id}',
/// '{transaction_id}' is the parameter.
///
/// Paths with more than one parameter can be filled in by calling this
/// function once per parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
#[cfg(test)]
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
