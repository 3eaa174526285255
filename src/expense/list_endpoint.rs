use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    Error,
    expense::{Expense, ExpenseStore},
    month::MonthQuery,
};

/// A route handler for listing the expenses of the month given by the `year`
/// and `month` query parameters, in ID order.
///
/// Responds with 400 Bad Request if either parameter is missing or malformed.
pub async fn list_expenses_endpoint(
    State(store): State<ExpenseStore>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<Expense>>, Error> {
    let scope = query.scope()?;

    store
        .list(scope)
        .inspect_err(|error| tracing::error!("Could not list expenses for {scope}: {error}"))
        .map(Json)
}

#[cfg(test)]
mod tests {
    use axum::{
        Json,
        extract::{Query, State},
    };
    use time::macros::date;

    use crate::{Error, expense::Expense, month::MonthQuery, test_utils::get_test_store};

    use super::list_expenses_endpoint;

    fn query(year: &str, month: &str) -> Query<MonthQuery> {
        Query(MonthQuery {
            year: Some(year.to_owned()),
            month: Some(month.to_owned()),
        })
    }

    #[tokio::test]
    async fn lists_records_in_month() {
        let store = get_test_store();
        let lunch = store
            .create(Expense::build(date!(2024 - 05 - 10), "Lunch", 12_000))
            .unwrap();
        store
            .create(Expense::build(date!(2024 - 06 - 10), "June", 1))
            .unwrap();

        let Json(got) = list_expenses_endpoint(State(store), query("2024", "5"))
            .await
            .unwrap();

        assert_eq!(got, vec![lunch]);
    }

    #[tokio::test]
    async fn empty_month_lists_nothing() {
        let store = get_test_store();

        let Json(got) = list_expenses_endpoint(State(store), query("2024", "2"))
            .await
            .unwrap();

        assert!(got.is_empty());
    }

    #[tokio::test]
    async fn rejects_malformed_month() {
        let store = get_test_store();

        let result = list_expenses_endpoint(State(store), query("2024", "13")).await;

        assert_eq!(
            result.map(|Json(expenses)| expenses),
            Err(Error::InvalidMonth("2024-13".to_owned()))
        );
    }

    #[tokio::test]
    async fn rejects_missing_month() {
        let store = get_test_store();

        let result = list_expenses_endpoint(State(store), Query(MonthQuery::default())).await;

        assert!(matches!(result, Err(Error::InvalidMonth(_))));
    }
}
