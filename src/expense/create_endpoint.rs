use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};

use crate::{
    Error,
    expense::{Expense, ExpenseBuilder, ExpenseStore},
};

/// A route handler for creating an expense from a JSON body.
///
/// Responds with 201 Created and the stored record, including its new ID.
pub async fn create_expense_endpoint(
    State(store): State<ExpenseStore>,
    body: Result<Json<ExpenseBuilder>, JsonRejection>,
) -> Result<(StatusCode, Json<Expense>), Error> {
    let Json(builder) = body.map_err(|rejection| Error::InvalidRequest(rejection.body_text()))?;

    let expense = store
        .create(builder)
        .inspect_err(|error| tracing::error!("Could not create expense: {error}"))?;

    Ok((StatusCode::CREATED, Json(expense)))
}

#[cfg(test)]
mod tests {
    use axum::{Json, extract::State, http::StatusCode};
    use time::macros::date;

    use crate::{
        expense::{Category, Expense},
        month::MonthScope,
        test_utils::get_test_store,
    };

    use super::create_expense_endpoint;

    #[tokio::test]
    async fn creates_expense() {
        let store = get_test_store();
        let builder = Expense::build(date!(2024 - 05 - 10), "Lunch", 12_000)
            .category(Category::Food)
            .income(false);

        let (status, Json(expense)) =
            create_expense_endpoint(State(store.clone()), Ok(Json(builder)))
                .await
                .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(expense.title, "Lunch");
        assert_eq!(expense.amount, 12_000);
        assert_eq!(
            store.list(MonthScope::new(2024, 5).unwrap()).unwrap(),
            vec![expense]
        );
    }
}
