//! Defines the app level error type and its conversions to JSON error bodies,
//! rendered HTML pages and alerts.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{alert::Alert, internal_server_error::InternalServerError, not_found::NotFoundError};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The `year` and `month` parameters did not name a valid calendar month.
    ///
    /// Callers should pass in the raw text that failed to parse.
    #[error("invalid month \"{0}\"")]
    InvalidMonth(String),

    /// The amount text could not be read as a whole, non-negative number.
    #[error("invalid amount \"{0}\", expected a whole number such as 12000 or +12000")]
    InvalidAmount(String),

    /// The request body was missing, malformed or had the wrong fields.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update an expense that does not exist.
    #[error("tried to update an expense that is not in the database")]
    UpdateMissingExpense,

    /// Tried to delete an expense that does not exist.
    #[error("tried to delete an expense that is not in the database")]
    DeleteMissingExpense,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
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

/// The JSON body sent with every error response from the JSON API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// A message describing what went wrong.
    pub error: String,
}

impl Error {
    /// The HTTP status code that best describes the error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidMonth(_) | Error::InvalidAmount(_) | Error::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::NotFound | Error::UpdateMissingExpense | Error::DeleteMissingExpense => {
                StatusCode::NOT_FOUND
            }
            Error::SqlError(_) | Error::DatabaseLockError | Error::InvalidTimezoneError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Convert the error into a full HTML error page.
    pub fn into_page_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }

    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let status_code = self.status_code();
        let alert = match self {
            Error::InvalidAmount(text) => Alert::Error {
                message: "Invalid amount".to_owned(),
                details: format!(
                    "\"{text}\" is not a whole number. Enter an amount such as 12000, \
                    or +12000 for income."
                ),
            },
            Error::InvalidRequest(details) => Alert::Error {
                message: "Invalid expense".to_owned(),
                details,
            },
            Error::InvalidMonth(month) => Alert::Error {
                message: "Invalid month".to_owned(),
                details: format!("\"{month}\" is not a valid month."),
            },
            Error::UpdateMissingExpense => Alert::Error {
                message: "Could not update expense".to_owned(),
                details: "The expense could not be found.".to_owned(),
            },
            Error::NotFound | Error::DeleteMissingExpense => Alert::Error {
                message: "Could not delete expense".to_owned(),
                details: "The expense could not be found. \
                    Try refreshing the page to see if the expense has already been deleted."
                    .to_owned(),
            },
            Error::InvalidTimezoneError(timezone) => Alert::Error {
                message: "Invalid Timezone Settings".to_owned(),
                details: format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            },
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details:
                        "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                }
            }
        };

        (status_code, alert.into_html()).into_response()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let message = if status_code == StatusCode::INTERNAL_SERVER_ERROR {
            // Internal details are for the server logs only.
            tracing::error!("An unexpected error occurred: {}", self);
            "an unexpected error occurred, check the server logs for more details".to_owned()
        } else {
            self.to_string()
        };

        (status_code, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::test_utils::parse_json_body;

    use super::{Error, ErrorBody};

    async fn read_body(error: Error) -> (StatusCode, ErrorBody) {
        let response = error.into_response();
        let status = response.status();

        (status, parse_json_body(response).await)
    }

    #[test]
    fn no_rows_maps_to_not_found() {
        assert_eq!(Error::from(rusqlite::Error::QueryReturnedNoRows), Error::NotFound);
    }

    #[tokio::test]
    async fn validation_errors_are_bad_requests() {
        let (status, body) = read_body(Error::InvalidMonth("2024-13".to_owned())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "invalid month \"2024-13\"");
    }

    #[tokio::test]
    async fn missing_records_are_not_found() {
        let (status, _) = read_body(Error::DeleteMissingExpense).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn internal_errors_hide_details() {
        let (status, body) = read_body(Error::DatabaseLockError).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.error.contains("lock"));
    }
}
