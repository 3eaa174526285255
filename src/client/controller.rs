use crate::{
    database_id::ExpenseId,
    expense::{Expense, ExpenseBuilder},
    month::MonthScope,
};

use super::{Action, ClientError, ExpensesApi, MonthData, Step, ViewState, reduce};

/// Keeps a [ViewState] in step with the expenses API.
///
/// Fetch failures are logged and leave the state as it was. Mutation errors
/// are returned to the caller.
#[derive(Debug)]
pub struct Controller<A> {
    api: A,
    state: ViewState,
}

impl<A: ExpensesApi> Controller<A> {
    /// Create a controller showing `current`. Call [Controller::refresh] to
    /// load its data.
    pub fn new(api: A, current: MonthScope) -> Self {
        Self {
            api,
            state: ViewState::new(current),
        }
    }

    /// The state currently shown.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// The API the controller talks to.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Apply `action` to the current state.
    pub fn dispatch(&mut self, action: Action) {
        self.state = reduce(&self.state, action);
    }

    /// Fetch the totals and listing for `scope` concurrently.
    ///
    /// The result is returned as an action rather than applied, so a fetch
    /// that finishes after the user has moved on is discarded when dispatched.
    pub async fn fetch(&self, scope: MonthScope) -> Action {
        let (summary, expenses) = tokio::join!(self.api.summary(scope), self.api.list(scope));

        match (summary, expenses) {
            (Ok(summary), Ok(expenses)) => Action::Loaded(MonthData {
                scope,
                summary,
                expenses,
            }),
            (Err(error), _) | (_, Err(error)) => {
                tracing::error!("Could not fetch expenses for {scope}: {error}");
                Action::FetchFailed(scope)
            }
        }
    }

    /// Fetch and show the data for the selected month.
    pub async fn refresh(&mut self) {
        let action = self.fetch(self.state.current()).await;
        self.dispatch(action);
    }

    /// Move one month and load it.
    pub async fn navigate(&mut self, step: Step) {
        self.dispatch(Action::Navigate(step));

        if self.state.needs_fetch() {
            self.refresh().await;
        }
    }

    /// Store a new record and reload the selected month.
    ///
    /// # Errors
    /// Returns the API error if the record could not be stored. The state is
    /// left unchanged in that case.
    pub async fn create(&mut self, expense: ExpenseBuilder) -> Result<Expense, ClientError> {
        let expense = self.api.create(expense).await?;
        self.reload_after_mutation().await;

        Ok(expense)
    }

    /// Replace a stored record and reload the selected month.
    ///
    /// # Errors
    /// Returns the API error if the record could not be updated.
    pub async fn update(&mut self, expense: Expense) -> Result<Expense, ClientError> {
        let expense = self.api.update(expense).await?;
        self.reload_after_mutation().await;

        Ok(expense)
    }

    /// Delete a stored record and reload the selected month.
    ///
    /// # Errors
    /// Returns the API error if the record could not be deleted.
    pub async fn delete(&mut self, id: ExpenseId) -> Result<Expense, ClientError> {
        let expense = self.api.delete(id).await?;
        self.reload_after_mutation().await;

        Ok(expense)
    }

    async fn reload_after_mutation(&mut self) {
        self.dispatch(Action::Mutated);
        self.refresh().await;
    }
}
