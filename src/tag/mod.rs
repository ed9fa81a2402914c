//! Free-form tags for labelling transactions.

mod domain;
mod endpoints;

pub use domain::{TagName, TagsData};
pub use endpoints::{get_tag_transactions_endpoint, set_transaction_tags_endpoint};
