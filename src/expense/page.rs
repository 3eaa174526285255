//! Route handlers for the server-rendered expenses page.

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use time::Date;

use crate::{
    AppState, Error,
    client::{Action, MonthData, ViewState, reduce},
    endpoints,
    expense::{ExpenseStore, expenses_page_view, month_panel_view},
    month::{MonthQuery, MonthScope},
    timezone::local_today,
};

/// The state needed to render the expenses page.
#[derive(Debug, Clone)]
pub struct ExpensesPageState {
    store: ExpenseStore,
    local_timezone: String,
}

impl FromRef<AppState> for ExpensesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: ExpenseStore::from_ref(state),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Load the selected month into a fresh [ViewState].
fn load_view_state(store: &ExpenseStore, scope: MonthScope) -> Result<ViewState, Error> {
    let (summary, expenses) = store.month(scope)?;

    Ok(reduce(
        &ViewState::new(scope),
        Action::Loaded(MonthData {
            scope,
            summary,
            expenses,
        }),
    ))
}

fn render_page(state: &ExpensesPageState, scope: MonthScope, today: Date) -> Response {
    match load_view_state(&state.store, scope) {
        Ok(view_state) => expenses_page_view(&view_state, today).into_response(),
        Err(error) => {
            tracing::error!("Could not load expenses for {scope}: {error}");
            error.into_page_response()
        }
    }
}

/// Display the expenses page for the month in the query, or the current
/// month if no month is given.
///
/// A malformed month redirects to the current month.
pub async fn get_expenses_page(
    State(state): State<ExpensesPageState>,
    Query(query): Query<MonthQuery>,
) -> Response {
    let today = match local_today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_page_response(),
    };

    if query.is_empty() {
        return render_page(&state, MonthScope::containing(today), today);
    }

    match query.scope() {
        Ok(scope) => render_page(&state, scope, today),
        Err(error) => {
            tracing::warn!("Redirecting request for {query:?}: {error}");
            Redirect::to(endpoints::ROOT).into_response()
        }
    }
}

/// Render the month panel for the month in the query.
///
/// Used by the page to reload the panel after a change.
pub async fn get_month_panel(
    State(state): State<ExpensesPageState>,
    Query(query): Query<MonthQuery>,
) -> Response {
    let result = local_today(&state.local_timezone).and_then(|today| {
        let scope = query.scope()?;
        let view_state = load_view_state(&state.store, scope)?;

        Ok(month_panel_view(&view_state, today))
    });

    match result {
        Ok(panel) => panel.into_response(),
        Err(error) => {
            tracing::error!("Could not render month panel for {query:?}: {error}");
            error.into_alert_response()
        }
    }
}
