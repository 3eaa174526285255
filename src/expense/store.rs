//! The shared access point for expense records used by route handlers and the
//! in-process client.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    cache::{CacheTag, ExpenseCache},
    database_id::ExpenseId,
    db::lock_connection,
    expense::{
        Expense, ExpenseBuilder, MonthSummary, create_expense, delete_expense,
        get_expenses_in_month, get_month_summary, update_expense,
    },
    month::{MonthBound, MonthScope},
};

/// Reads and writes expenses while keeping the month listing cache fresh.
///
/// The database lock is held while the cache is filled or invalidated, so a
/// listing can never be cached after a mutation that should have dropped it.
#[derive(Debug, Clone)]
pub struct ExpenseStore {
    db_connection: Arc<Mutex<Connection>>,
    month_bound: MonthBound,
    cache: Arc<ExpenseCache>,
}

impl FromRef<AppState> for ExpenseStore {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            month_bound: state.month_bound,
            cache: state.expense_cache.clone(),
        }
    }
}

impl ExpenseStore {
    /// Create a store over an initialized database connection.
    pub fn new(
        db_connection: Arc<Mutex<Connection>>,
        month_bound: MonthBound,
        cache: Arc<ExpenseCache>,
    ) -> Self {
        Self {
            db_connection,
            month_bound,
            cache,
        }
    }

    /// The policy used to pick the end of a month's date range.
    pub fn month_bound(&self) -> MonthBound {
        self.month_bound
    }

    /// The expenses dated within `scope`, in ID order.
    ///
    /// # Errors
    /// Returns an error if the database lock is poisoned or the query fails.
    pub fn list(&self, scope: MonthScope) -> Result<Vec<Expense>, Error> {
        let connection = lock_connection(&self.db_connection)?;

        self.list_with(scope, &connection)
    }

    fn list_with(&self, scope: MonthScope, connection: &Connection) -> Result<Vec<Expense>, Error> {
        let key = (scope, self.month_bound);

        if let Some(expenses) = self.cache.get(&key) {
            tracing::debug!("Serving expenses for {scope} from cache");
            return Ok(expenses);
        }

        let expenses = get_expenses_in_month(scope, self.month_bound, connection)?;
        // Any year/month can be requested, so empty months are not cached.
        if !expenses.is_empty() {
            self.cache.insert(key, CacheTag::Expenses, expenses.clone());
        }

        Ok(expenses)
    }

    /// The spending and income totals for `scope`.
    ///
    /// # Errors
    /// Returns an error if the database lock is poisoned or the query fails.
    pub fn summary(&self, scope: MonthScope) -> Result<MonthSummary, Error> {
        let connection = lock_connection(&self.db_connection)?;

        get_month_summary(scope, self.month_bound, &connection)
    }

    /// The listing and totals for `scope`, read under one lock.
    ///
    /// # Errors
    /// Returns an error if the database lock is poisoned or a query fails.
    pub fn month(&self, scope: MonthScope) -> Result<(MonthSummary, Vec<Expense>), Error> {
        let connection = lock_connection(&self.db_connection)?;
        let summary = get_month_summary(scope, self.month_bound, &connection)?;
        let expenses = self.list_with(scope, &connection)?;

        Ok((summary, expenses))
    }

    /// Store a new expense.
    ///
    /// # Errors
    /// Returns an error if the database lock is poisoned or the insert fails.
    pub fn create(&self, builder: ExpenseBuilder) -> Result<Expense, Error> {
        let connection = lock_connection(&self.db_connection)?;
        let expense = create_expense(builder, &connection)?;
        self.cache.invalidate(CacheTag::Expenses);

        tracing::info!("Created expense {}", expense.id);

        Ok(expense)
    }

    /// Replace the stored expense with the ID `expense.id`.
    ///
    /// # Errors
    /// Returns [Error::UpdateMissingExpense] if there is no such expense, or
    /// another error if the database lock is poisoned or the update fails.
    pub fn update(&self, expense: &Expense) -> Result<Expense, Error> {
        let connection = lock_connection(&self.db_connection)?;
        let expense = update_expense(expense, &connection)?;
        self.cache.invalidate(CacheTag::Expenses);

        tracing::info!("Updated expense {}", expense.id);

        Ok(expense)
    }

    /// Delete the expense with the ID `id`, returning the deleted record.
    ///
    /// # Errors
    /// Returns [Error::DeleteMissingExpense] if there is no such expense, or
    /// another error if the database lock is poisoned or the delete fails.
    pub fn delete(&self, id: ExpenseId) -> Result<Expense, Error> {
        let connection = lock_connection(&self.db_connection)?;
        let expense = delete_expense(id, &connection)?;
        self.cache.invalidate(CacheTag::Expenses);

        tracing::info!("Deleted expense {}", expense.id);

        Ok(expense)
    }
}
