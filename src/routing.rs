//! Application router configuration.

use axum::{
    Router,
    routing::{get, put},
};

use crate::{
    AppState,
    budget_alert::{
        create_budget_alert_endpoint, get_budget_alerts_endpoint, get_budget_status_endpoint,
    },
    category::{create_category_endpoint, get_categories_endpoint},
    endpoints,
    not_found::get_404_not_found,
    report::{
        export_transactions_endpoint, filter_transactions_endpoint, get_balance_endpoint,
        get_monthly_summary_endpoint, get_spending_report_endpoint, get_yearly_summary_endpoint,
        search_transactions_endpoint,
    },
    tag::{get_tag_transactions_endpoint, set_transaction_tags_endpoint},
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        get_category_transactions_endpoint, get_transaction_endpoint, get_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let transaction_routes = Router::new()
        .route(
            endpoints::TRANSACTIONS,
            get(get_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            get(get_transaction_endpoint)
                .put(edit_transaction_endpoint)
                .delete(delete_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION_TAGS,
            put(set_transaction_tags_endpoint),
        )
        .route(
            endpoints::TAG_TRANSACTIONS,
            get(get_tag_transactions_endpoint),
        );

    let category_routes = Router::new()
        .route(
            endpoints::CATEGORIES,
            get(get_categories_endpoint).post(create_category_endpoint),
        )
        .route(
            endpoints::CATEGORY_TRANSACTIONS,
            get(get_category_transactions_endpoint),
        )
        .route(
            endpoints::BUDGET_ALERTS,
            get(get_budget_alerts_endpoint).post(create_budget_alert_endpoint),
        )
        .route(endpoints::BUDGET_STATUS, get(get_budget_status_endpoint));

    let report_routes = Router::new()
        .route(endpoints::BALANCE, get(get_balance_endpoint))
        .route(
            endpoints::MONTHLY_SUMMARY,
            get(get_monthly_summary_endpoint),
        )
        .route(endpoints::YEARLY_SUMMARY, get(get_yearly_summary_endpoint))
        .route(
            endpoints::SPENDING_REPORT,
            get(get_spending_report_endpoint),
        )
        .route(endpoints::EXPORT_CSV, get(export_transactions_endpoint))
        .route(endpoints::SEARCH, get(search_transactions_endpoint))
        .route(endpoints::FILTER, get(filter_transactions_endpoint));

    transaction_routes
        .merge(category_routes)
        .merge(report_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}
