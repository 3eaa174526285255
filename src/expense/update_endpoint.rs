use axum::{Json, extract::State, extract::rejection::JsonRejection};

use crate::{
    Error,
    expense::{Expense, ExpenseStore},
};

/// A route handler for replacing the fields of the expense named by the `id`
/// in the JSON body.
///
/// Responds with 404 Not Found if there is no such expense.
pub async fn update_expense_endpoint(
    State(store): State<ExpenseStore>,
    body: Result<Json<Expense>, JsonRejection>,
) -> Result<Json<Expense>, Error> {
    let Json(expense) = body.map_err(|rejection| Error::InvalidRequest(rejection.body_text()))?;

    store
        .update(&expense)
        .inspect_err(|error| tracing::error!("Could not update expense {}: {error}", expense.id))
        .map(Json)
}
