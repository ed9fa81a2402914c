//! Reports derived from the stored transactions.
//!
//! The calculations live in [aggregation] and work on plain slices. The
//! endpoints load a snapshot of the database, release the lock and then hand
//! the snapshot to the aggregation functions.

pub mod aggregation;
mod export;
mod search;
mod summary;

pub use aggregation::{
    BudgetStatus, CategorySpending, PeriodSummary, TransactionFilter, budget_status,
    current_balance, filter_transactions, grouped_spending, period_summary, search_transactions,
};
pub use export::{export_transactions_endpoint, transactions_to_csv};
pub use search::{filter_transactions_endpoint, search_transactions_endpoint};
pub use summary::{
    ReportState, get_balance_endpoint, get_monthly_summary_endpoint,
    get_spending_report_endpoint, get_yearly_summary_endpoint,
};
