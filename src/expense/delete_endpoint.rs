use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use axum_htmx::HX_TRIGGER;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    alert::Alert,
    database_id::ExpenseId,
    expense::{EXPENSES_CHANGED_EVENT, Expense, ExpenseStore},
};

/// The JSON body naming the expense to delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteExpenseRequest {
    /// The ID of the expense to delete.
    pub id: ExpenseId,
}

/// A route handler for deleting the expense named by the `id` in the JSON body.
///
/// Responds with the deleted record, or 404 Not Found if there is no such
/// expense.
pub async fn delete_expense_endpoint(
    State(store): State<ExpenseStore>,
    body: Result<Json<DeleteExpenseRequest>, JsonRejection>,
) -> Result<Json<Expense>, Error> {
    let Json(DeleteExpenseRequest { id }) =
        body.map_err(|rejection| Error::InvalidRequest(rejection.body_text()))?;

    store
        .delete(id)
        .inspect_err(|error| tracing::error!("Could not delete expense {id}: {error}"))
        .map(Json)
}

/// A route handler for deleting an expense from the expenses page, responds
/// with an alert.
///
/// A successful delete also triggers [EXPENSES_CHANGED_EVENT] so the month
/// panel reloads.
pub async fn delete_expense_row_endpoint(
    State(store): State<ExpenseStore>,
    Path(expense_id): Path<ExpenseId>,
) -> Response {
    match store.delete(expense_id) {
        Ok(expense) => (
            [(HX_TRIGGER, EXPENSES_CHANGED_EVENT)],
            Alert::SuccessSimple {
                message: format!("Deleted \"{}\"", expense.title),
            },
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Could not delete expense {expense_id}: {error}");
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Json,
        extract::{Path, State},
        http::StatusCode,
    };
    use time::macros::date;

    use crate::{
        Error,
        expense::{EXPENSES_CHANGED_EVENT, Expense},
        month::MonthScope,
        test_utils::{assert_status, get_header, get_test_store},
    };

    use super::{DeleteExpenseRequest, delete_expense_endpoint, delete_expense_row_endpoint};

    #[tokio::test]
    async fn deletes_expense() {
        let store = get_test_store();
        let expense = store
            .create(Expense::build(date!(2024 - 05 - 10), "Lunch", 12_000))
            .unwrap();

        let Json(deleted) = delete_expense_endpoint(
            State(store.clone()),
            Ok(Json(DeleteExpenseRequest { id: expense.id })),
        )
        .await
        .unwrap();

        assert_eq!(deleted, expense);
        assert_eq!(store.list(MonthScope::new(2024, 5).unwrap()), Ok(vec![]));
    }

    #[tokio::test]
    async fn delete_missing_expense_is_not_found() {
        let store = get_test_store();

        let result =
            delete_expense_endpoint(State(store), Ok(Json(DeleteExpenseRequest { id: 42 }))).await;

        assert_eq!(
            result.map(|Json(expense)| expense),
            Err(Error::DeleteMissingExpense)
        );
    }

    #[tokio::test]
    async fn row_delete_triggers_refresh() {
        let store = get_test_store();
        let expense = store
            .create(Expense::build(date!(2024 - 05 - 10), "Lunch", 12_000))
            .unwrap();

        let response = delete_expense_row_endpoint(State(store), Path(expense.id)).await;

        assert_status(&response, StatusCode::OK);
        assert_eq!(get_header(&response, "hx-trigger"), EXPENSES_CHANGED_EVENT);
    }

    #[tokio::test]
    async fn row_delete_of_missing_expense_shows_alert() {
        let store = get_test_store();

        let response = delete_expense_row_endpoint(State(store), Path(42)).await;

        assert_status(&response, StatusCode::NOT_FOUND);
        assert!(response.headers().get("hx-trigger").is_none());
    }
}
