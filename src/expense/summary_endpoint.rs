use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    Error,
    expense::{ExpenseStore, MonthSummary},
    month::MonthQuery,
};

/// A route handler for the spending and income totals of the month given by
/// the `year` and `month` query parameters.
///
/// Responds with 400 Bad Request if either parameter is missing or malformed.
pub async fn get_month_summary_endpoint(
    State(store): State<ExpenseStore>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<MonthSummary>, Error> {
    let scope = query.scope()?;

    store
        .summary(scope)
        .inspect_err(|error| tracing::error!("Could not sum expenses for {scope}: {error}"))
        .map(Json)
}
