//! Defines the app level error type and its conversion to JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::database_id::CategoryId;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A transaction was created or updated with an amount of zero, or with
    /// a magnitude above [crate::transaction::MAX_AMOUNT].
    #[error("amount must be non-zero and at most {max} in magnitude", max = crate::transaction::MAX_AMOUNT)]
    InvalidAmount,

    /// A month number outside of 1 to 12 was requested.
    #[error("{0} is not a valid month, expected a number from 1 to 12")]
    InvalidMonth(u8),

    /// An empty string was used to create a category name.
    #[error("category name cannot be empty")]
    EmptyCategoryName,

    /// An empty string was used as a tag.
    #[error("tag cannot be empty")]
    EmptyTagName,

    /// The category ID used to create a transaction or budget alert did not
    /// match a valid category.
    #[error("the category ID {0:?} does not refer to a valid category")]
    InvalidCategory(Option<CategoryId>),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// A category looked up by ID does not exist.
    #[error("could not find a category with the ID {0}")]
    CategoryNotFound(CategoryId),

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the database")]
    UpdateMissingTransaction,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// The transactions could not be written as CSV.
    #[error("could not write CSV: {0}")]
    CsvError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Error::CsvError(value.to_string())
    }
}

/// The JSON body sent to the client when a request fails.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// A human readable description of what went wrong.
    pub error: String,
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidAmount
            | Error::InvalidMonth(_)
            | Error::EmptyCategoryName
            | Error::EmptyTagName
            | Error::InvalidCategory(_) => StatusCode::BAD_REQUEST,
            Error::NotFound
            | Error::CategoryNotFound(_)
            | Error::UpdateMissingTransaction
            | Error::DeleteMissingTransaction => StatusCode::NOT_FOUND,
            Error::DatabaseLockError | Error::SqlError(_) | Error::CsvError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let message = match self {
            // These errors are not intended to be shown to the client.
            Error::SqlError(_) | Error::CsvError(_) => {
                tracing::error!("An unexpected error occurred: {}", self);
                "An unexpected error occurred, check the server logs for more details.".to_owned()
            }
            Error::DatabaseLockError => {
                tracing::error!("{}", self);
                "An unexpected error occurred, check the server logs for more details.".to_owned()
            }
            error => error.to_string(),
        };

        (status_code, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod error_response_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::Error;

    #[test]
    fn client_errors_map_to_bad_request() {
        for error in [
            Error::InvalidAmount,
            Error::InvalidMonth(13),
            Error::EmptyCategoryName,
            Error::EmptyTagName,
            Error::InvalidCategory(Some(3)),
        ] {
            assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn missing_resources_map_to_not_found() {
        for error in [
            Error::NotFound,
            Error::CategoryNotFound(1),
            Error::UpdateMissingTransaction,
            Error::DeleteMissingTransaction,
        ] {
            assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn sql_error_maps_to_internal_server_error() {
        let error = Error::SqlError(rusqlite::Error::InvalidQuery);

        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn no_rows_converts_to_not_found() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();

        assert_eq!(error, Error::NotFound);
    }
}
