//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, cache::{EXPENSE_CACHE_CAPACITY, ExpenseCache}, db::initialize, month::MonthBound};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Asia/Seoul".
    pub local_timezone: String,

    /// How the last day of a month's date range is chosen.
    pub month_bound: MonthBound,

    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,

    /// Cached month listings, shared by every handler.
    pub expense_cache: Arc<ExpenseCache>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Asia/Seoul".
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(
        db_connection: Connection,
        local_timezone: &str,
        month_bound: MonthBound,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;

        Ok(Self {
            local_timezone: local_timezone.to_owned(),
            month_bound,
            db_connection: Arc::new(Mutex::new(db_connection)),
            expense_cache: Arc::new(ExpenseCache::new(EXPENSE_CACHE_CAPACITY)),
        })
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::month::MonthBound;

    use super::AppState;

    #[test]
    fn new_creates_tables() {
        let state = AppState::new(
            Connection::open_in_memory().unwrap(),
            "Asia/Seoul",
            MonthBound::LiteralDay31,
        )
        .unwrap();

        let connection = state.db_connection.lock().unwrap();
        let table_count: u32 = connection
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'expense'",
                [],
                |row| row.get(0),
            )
            .unwrap();

        assert_eq!(table_count, 1);
        assert_eq!(state.month_bound, MonthBound::LiteralDay31);
        assert_eq!(state.local_timezone, "Asia/Seoul");
    }
}
