use std::future::Future;

use crate::{
    Error,
    database_id::ExpenseId,
    expense::{Expense, ExpenseBuilder, MonthSummary},
    month::MonthScope,
};

/// The errors a client may see when talking to the expenses API.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request could not be sent or the response could not be read.
    #[error("could not reach the expenses API: {0}")]
    Transport(#[from] reqwest::Error),

    /// The expense does not exist, it may already have been deleted.
    #[error("the expense could not be found")]
    NotFound,

    /// The request was rejected as invalid.
    #[error("the request was rejected: {0}")]
    Rejected(String),

    /// The server failed to handle the request.
    #[error("the expenses API failed with status {status}: {message}")]
    Server {
        /// The HTTP status code of the response.
        status: u16,
        /// The error message sent by the server.
        message: String,
    },
}

impl From<Error> for ClientError {
    fn from(error: Error) -> Self {
        match error {
            Error::NotFound | Error::UpdateMissingExpense | Error::DeleteMissingExpense => {
                ClientError::NotFound
            }
            Error::InvalidMonth(_) | Error::InvalidAmount(_) | Error::InvalidRequest(_) => {
                ClientError::Rejected(error.to_string())
            }
            error => ClientError::Server {
                status: error.status_code().as_u16(),
                message: error.to_string(),
            },
        }
    }
}

/// The operations of the expenses JSON API.
///
/// Implemented over HTTP by [HttpExpensesApi](super::HttpExpensesApi) and
/// in-process by [LocalExpensesApi](super::LocalExpensesApi).
pub trait ExpensesApi {
    /// The records dated within `scope`, in ID order.
    fn list(&self, scope: MonthScope)
    -> impl Future<Output = Result<Vec<Expense>, ClientError>> + Send;

    /// The spending and income totals for `scope`.
    fn summary(
        &self,
        scope: MonthScope,
    ) -> impl Future<Output = Result<MonthSummary, ClientError>> + Send;

    /// Store a new record, returning it with its assigned ID.
    fn create(
        &self,
        expense: ExpenseBuilder,
    ) -> impl Future<Output = Result<Expense, ClientError>> + Send;

    /// Replace every field of the record with the ID `expense.id`.
    fn update(
        &self,
        expense: Expense,
    ) -> impl Future<Output = Result<Expense, ClientError>> + Send;

    /// Delete the record with the ID `id`, returning the deleted record.
    fn delete(&self, id: ExpenseId) -> impl Future<Output = Result<Expense, ClientError>> + Send;
}
