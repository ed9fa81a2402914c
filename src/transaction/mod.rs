//! Transaction management for the finance tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - Database functions for storing, querying, and managing transactions
//! - Route handlers for the transaction CRUD endpoints

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod list_endpoint;

pub use core::{
    Transaction, TransactionBuilder, TransactionType, create_transaction,
    create_transaction_tables, get_all_transactions, get_transactions_by_tag, set_transaction_tags,
};
pub use create_endpoint::{
    MAX_AMOUNT, TransactionData, TransactionState, create_transaction_endpoint,
};
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use list_endpoint::{
    get_category_transactions_endpoint, get_transaction_endpoint, get_transactions_endpoint,
};

#[cfg(test)]
pub use core::{
    count_transactions, delete_transaction, get_transaction, get_transactions_by_category,
    update_transaction,
};
