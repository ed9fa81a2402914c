//! Exporting every transaction as a CSV file.

use axum::{
    extract::State,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::IntoResponse,
};
use csv::Writer;

use crate::{
    Error,
    db::lock_connection,
    report::ReportState,
    transaction::{Transaction, get_all_transactions},
};

const CSV_HEADER: [&str; 7] = [
    "Id",
    "Title",
    "Amount",
    "Date",
    "Type",
    "CategoryId",
    "Tags",
];

/// Separates tags within the tags column.
const TAG_SEPARATOR: &str = ";";

/// Download every transaction ordered by ID as `transactions.csv`.
pub async fn export_transactions_endpoint(
    State(state): State<ReportState>,
) -> Result<impl IntoResponse, Error> {
    let transactions = {
        let connection = lock_connection(&state.db_connection)?;
        get_all_transactions(&connection)?
    };

    let body = transactions_to_csv(&transactions)?;

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                CONTENT_DISPOSITION,
                "attachment; filename=\"transactions.csv\"",
            ),
        ],
        body,
    ))
}

/// Write `transactions` as CSV text with a header row.
///
/// Transactions without a category have an empty category ID and tags are
/// joined with semicolons. Fields containing commas, quotes or newlines are
/// quoted.
///
/// # Errors
/// Returns [Error::CsvError] if a record could not be written.
pub fn transactions_to_csv(transactions: &[Transaction]) -> Result<String, Error> {
    let mut writer = Writer::from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;

    for transaction in transactions {
        let tags = transaction
            .tags
            .iter()
            .map(|tag| tag.as_ref())
            .collect::<Vec<_>>()
            .join(TAG_SEPARATOR);

        writer.write_record([
            transaction.id.to_string(),
            transaction.title.clone(),
            transaction.amount.to_string(),
            transaction.date.to_string(),
            transaction.transaction_type.to_string(),
            transaction
                .category_id
                .map(|category_id| category_id.to_string())
                .unwrap_or_default(),
            tags,
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|error| Error::CsvError(error.to_string()))?;

    String::from_utf8(bytes).map_err(|error| Error::CsvError(error.to_string()))
}
