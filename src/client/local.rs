use crate::{
    database_id::ExpenseId,
    expense::{Expense, ExpenseBuilder, ExpenseStore, MonthSummary},
    month::MonthScope,
};

use super::{ClientError, ExpensesApi};

/// Runs expenses API operations directly against an [ExpenseStore], without
/// going through HTTP.
#[derive(Debug, Clone)]
pub struct LocalExpensesApi {
    store: ExpenseStore,
}

impl LocalExpensesApi {
    /// Create an API over `store`.
    pub fn new(store: ExpenseStore) -> Self {
        Self { store }
    }
}

impl ExpensesApi for LocalExpensesApi {
    async fn list(&self, scope: MonthScope) -> Result<Vec<Expense>, ClientError> {
        Ok(self.store.list(scope)?)
    }

    async fn summary(&self, scope: MonthScope) -> Result<MonthSummary, ClientError> {
        Ok(self.store.summary(scope)?)
    }

    async fn create(&self, expense: ExpenseBuilder) -> Result<Expense, ClientError> {
        Ok(self.store.create(expense)?)
    }

    async fn update(&self, expense: Expense) -> Result<Expense, ClientError> {
        Ok(self.store.update(&expense)?)
    }

    async fn delete(&self, id: ExpenseId) -> Result<Expense, ClientError> {
        Ok(self.store.delete(id)?)
    }
}
