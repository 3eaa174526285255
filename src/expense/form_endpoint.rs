use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{Form, FormRejection};
use axum_htmx::HX_TRIGGER;

use crate::{
    Error,
    alert::Alert,
    expense::{EXPENSES_CHANGED_EVENT, ExpenseForm, ExpenseStore},
    html::format_amount,
};

/// A route handler for creating an expense from the inline form, responds
/// with an alert.
///
/// A successful create also triggers [EXPENSES_CHANGED_EVENT] so the month
/// panel reloads.
pub async fn create_expense_from_form_endpoint(
    State(store): State<ExpenseStore>,
    form: Result<Form<ExpenseForm>, FormRejection>,
) -> Response {
    let builder = match form
        .map_err(|rejection| Error::InvalidRequest(rejection.to_string()))
        .and_then(|Form(form)| form.into_builder())
    {
        Ok(builder) => builder,
        Err(error) => return error.into_alert_response(),
    };

    match store.create(builder) {
        Ok(expense) => (
            StatusCode::CREATED,
            [(HX_TRIGGER, EXPENSES_CHANGED_EVENT)],
            Alert::Success {
                message: format!("Added \"{}\"", expense.title),
                details: format!(
                    "{} {} in {}",
                    if expense.income { "Income of" } else { "Spent" },
                    format_amount(expense.amount),
                    expense.category.label()
                ),
            },
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Could not create expense from form: {error}");
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{extract::State, http::StatusCode};
    use axum_extra::extract::Form;
    use time::macros::date;

    use crate::{
        expense::{Category, EXPENSES_CHANGED_EVENT, ExpenseForm},
        month::MonthScope,
        test_utils::{assert_status, get_header, get_test_store},
    };

    use super::create_expense_from_form_endpoint;

    fn form(amount: &str) -> ExpenseForm {
        ExpenseForm {
            date: "2024-05-25".to_owned(),
            title: "Salary".to_owned(),
            amount: amount.to_owned(),
            category: Category::Etc,
        }
    }

    #[tokio::test]
    async fn creates_income_from_plus_prefix() {
        let store = get_test_store();

        let response =
            create_expense_from_form_endpoint(State(store.clone()), Ok(Form(form("+700000"))))
                .await;

        assert_status(&response, StatusCode::CREATED);
        assert_eq!(get_header(&response, "hx-trigger"), EXPENSES_CHANGED_EVENT);
        let expenses = store.list(MonthScope::new(2024, 5).unwrap()).unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].date, date!(2024 - 05 - 25));
        assert_eq!(expenses[0].amount, 700_000);
        assert!(expenses[0].income);
    }

    #[tokio::test]
    async fn invalid_amount_shows_alert_and_stores_nothing() {
        let store = get_test_store();

        let response =
            create_expense_from_form_endpoint(State(store.clone()), Ok(Form(form("lots")))).await;

        assert_status(&response, StatusCode::BAD_REQUEST);
        assert!(response.headers().get("hx-trigger").is_none());
        assert_eq!(store.list(MonthScope::new(2024, 5).unwrap()), Ok(vec![]));
    }
}
