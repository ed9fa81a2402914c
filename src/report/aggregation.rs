//! Aggregation of transaction snapshots into balances, summaries and reports.
//!
//! Every function here is pure: callers load the transactions (and categories
//! or alerts) from the database and pass them in as slices. None of these
//! functions fail. Empty inputs produce zero totals or empty lists.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, Month};

use crate::{
    budget_alert::BudgetAlert,
    category::Category,
    database_id::{BudgetAlertId, CategoryId},
    transaction::{Transaction, TransactionType},
};

/// The label for spending whose category ID does not match any category.
pub const UNKNOWN_CATEGORY_LABEL: &str = "Unknown";

/// The label for spending that has no category.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// Income, expenses and savings over a year or a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// The sum of income amounts.
    pub income: Decimal,
    /// The sum of expense amounts.
    pub expenses: Decimal,
    /// Income minus expenses.
    pub savings: Decimal,
}

/// The total spent in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySpending {
    /// The category the expenses were filed under, `None` for uncategorized expenses.
    pub category_id: Option<CategoryId>,
    /// The name of the category, or a placeholder label if it has none.
    pub category_name: String,
    /// The sum of the expense amounts.
    pub total: Decimal,
}

/// How much has been spent against a budget alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetStatus {
    /// The alert this status is for.
    pub budget_alert_id: BudgetAlertId,
    /// The category the alert tracks.
    pub category_id: CategoryId,
    /// The threshold set on the alert.
    pub threshold: Decimal,
    /// The sum of all expenses in the category.
    pub spent: Decimal,
}

/// Optional constraints on transactions' amount and type.
///
/// Bounds are inclusive and unset fields match everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransactionFilter {
    /// The smallest amount to include.
    pub min_amount: Option<Decimal>,
    /// The largest amount to include.
    pub max_amount: Option<Decimal>,
    /// Only include transactions of this type.
    pub transaction_type: Option<TransactionType>,
}

impl TransactionFilter {
    fn matches(&self, transaction: &Transaction) -> bool {
        self.min_amount
            .is_none_or(|min_amount| transaction.amount >= min_amount)
            && self
                .max_amount
                .is_none_or(|max_amount| transaction.amount <= max_amount)
            && self
                .transaction_type
                .is_none_or(|transaction_type| transaction.transaction_type == transaction_type)
    }
}

/// Total income minus total expenses over all of `transactions`.
///
/// Sums saturate at [Decimal::MAX] and [Decimal::MIN] instead of overflowing.
pub fn current_balance(transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .fold(Decimal::ZERO, |balance, transaction| {
            match transaction.transaction_type {
                TransactionType::Income => balance.saturating_add(transaction.amount),
                TransactionType::Expense => balance.saturating_sub(transaction.amount),
            }
        })
}

/// Sum income and expenses for the transactions dated in `year`, and in
/// `month` too if it is given.
pub fn period_summary(
    transactions: &[Transaction],
    year: i32,
    month: Option<Month>,
) -> PeriodSummary {
    let mut summary = PeriodSummary::default();

    let in_period = |date: Date| {
        date.year() == year && month.is_none_or(|month| date.month() == month)
    };

    for transaction in transactions.iter().filter(|t| in_period(t.date)) {
        match transaction.transaction_type {
            TransactionType::Income => {
                summary.income = summary.income.saturating_add(transaction.amount)
            }
            TransactionType::Expense => {
                summary.expenses = summary.expenses.saturating_add(transaction.amount)
            }
        }
    }

    summary.savings = summary.income.saturating_sub(summary.expenses);

    summary
}

/// Group the expenses dated from `start_date` to `end_date` (inclusive) by
/// category and sum each group.
///
/// Groups are ordered by category ID with uncategorized expenses last.
/// Category IDs that are not in `categories` are labelled
/// [UNKNOWN_CATEGORY_LABEL] rather than dropped, so the totals always add up
/// to the expenses in the date range.
///
/// Returns an empty list if `start_date` is after `end_date`.
pub fn grouped_spending(
    transactions: &[Transaction],
    categories: &[Category],
    start_date: Date,
    end_date: Date,
) -> Vec<CategorySpending> {
    if start_date > end_date {
        return Vec::new();
    }

    let mut totals_by_category: BTreeMap<CategoryId, Decimal> = BTreeMap::new();
    let mut uncategorized_total: Option<Decimal> = None;

    for transaction in transactions.iter().filter(|t| {
        t.transaction_type == TransactionType::Expense && (start_date..=end_date).contains(&t.date)
    }) {
        let total = match transaction.category_id {
            Some(category_id) => totals_by_category.entry(category_id).or_default(),
            None => uncategorized_total.get_or_insert_default(),
        };

        *total = total.saturating_add(transaction.amount);
    }

    let category_names: HashMap<CategoryId, &str> = categories
        .iter()
        .map(|category| (category.id, category.name.as_ref()))
        .collect();

    let mut spending: Vec<CategorySpending> = totals_by_category
        .into_iter()
        .map(|(category_id, total)| CategorySpending {
            category_id: Some(category_id),
            category_name: category_names
                .get(&category_id)
                .copied()
                .unwrap_or(UNKNOWN_CATEGORY_LABEL)
                .to_owned(),
            total,
        })
        .collect();

    if let Some(total) = uncategorized_total {
        spending.push(CategorySpending {
            category_id: None,
            category_name: UNCATEGORIZED_LABEL.to_owned(),
            total,
        });
    }

    spending
}

/// Compare each alert against all of the expenses ever filed under its
/// category. Statuses are in the same order as `alerts`.
pub fn budget_status(alerts: &[BudgetAlert], transactions: &[Transaction]) -> Vec<BudgetStatus> {
    let mut spent_by_category: HashMap<CategoryId, Decimal> = HashMap::new();

    for transaction in transactions
        .iter()
        .filter(|t| t.transaction_type == TransactionType::Expense)
    {
        if let Some(category_id) = transaction.category_id {
            let spent = spent_by_category.entry(category_id).or_default();
            *spent = spent.saturating_add(transaction.amount);
        }
    }

    alerts
        .iter()
        .map(|alert| BudgetStatus {
            budget_alert_id: alert.id,
            category_id: alert.category_id,
            threshold: alert.threshold,
            spent: spent_by_category
                .get(&alert.category_id)
                .copied()
                .unwrap_or_default(),
        })
        .collect()
}

/// Keep the transactions that satisfy every constraint in `filter`, in their
/// original order.
pub fn filter_transactions(
    transactions: &[Transaction],
    filter: &TransactionFilter,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|transaction| filter.matches(transaction))
        .cloned()
        .collect()
}

/// Keep the transactions whose title contains `keyword` and that are dated
/// within the optional, inclusive date bounds.
///
/// The match is case-sensitive and an empty keyword matches every title.
pub fn search_transactions(
    transactions: &[Transaction],
    keyword: &str,
    start_date: Option<Date>,
    end_date: Option<Date>,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|transaction| {
            transaction.title.contains(keyword)
                && start_date.is_none_or(|start_date| transaction.date >= start_date)
                && end_date.is_none_or(|end_date| transaction.date <= end_date)
        })
        .cloned()
        .collect()
}
