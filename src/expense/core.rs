//! Defines the core data models and database queries for expenses.

use rusqlite::{Connection, Row, types::Type};
use serde::{Deserialize, Serialize};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    Error,
    database_id::ExpenseId,
    expense::Category,
    month::{MonthBound, MonthScope},
};

// ============================================================================
// MODELS
// ============================================================================

/// A single spending or income record.
///
/// To create a new `Expense`, use [Expense::build].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID of the record, assigned by the database.
    pub id: ExpenseId,
    /// The calendar day the money moved.
    #[serde(with = "calendar_date")]
    pub date: Date,
    /// A free-form description, e.g. "Lunch".
    pub title: String,
    /// What the money was spent on.
    pub category: Category,
    /// The amount of money in whole currency units.
    pub amount: u64,
    /// `true` if money was earned, `false` if it was spent.
    pub income: bool,
}

impl Expense {
    /// Create a new expense.
    ///
    /// Shortcut for [ExpenseBuilder] for discoverability.
    pub fn build(date: Date, title: &str, amount: u64) -> ExpenseBuilder {
        ExpenseBuilder {
            date,
            title: title.to_owned(),
            category: Category::default(),
            amount,
            income: false,
        }
    }
}

/// The fields of an expense that has not been stored yet.
///
/// This is also the request body for creating an expense, so every field is
/// required on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseBuilder {
    /// The calendar day the money moved.
    #[serde(with = "calendar_date")]
    pub date: Date,
    /// A free-form description, e.g. "Lunch".
    pub title: String,
    /// What the money was spent on.
    pub category: Category,
    /// The amount of money in whole currency units.
    pub amount: u64,
    /// `true` if money was earned, `false` if it was spent.
    pub income: bool,
}

impl ExpenseBuilder {
    /// Set the category for the expense.
    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Mark the expense as income (`true`) or spending (`false`).
    pub fn income(mut self, income: bool) -> Self {
        self.income = income;
        self
    }
}

/// The largest amount the database can store.
pub const MAX_AMOUNT: u64 = i64::MAX as u64;

// ============================================================================
// DATE FORMAT
// ============================================================================

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parse a calendar date from "YYYY-MM-DD" text.
///
/// Full timestamps such as "2024-05-10T00:00:00.000Z" are also accepted and
/// reduced to their date part.
///
/// # Errors
/// Returns [Error::InvalidRequest] if the text is not a valid date.
pub fn parse_calendar_date(text: &str) -> Result<Date, Error> {
    let date_text = text
        .trim()
        .split_once('T')
        .map_or(text.trim(), |(date, _)| date);

    Date::parse(date_text, DATE_FORMAT)
        .map_err(|error| Error::InvalidRequest(format!("invalid date \"{text}\": {error}")))
}

/// Format a date as "YYYY-MM-DD".
pub fn format_calendar_date(date: Date) -> String {
    date.format(DATE_FORMAT).unwrap_or_else(|_| date.to_string())
}

/// Serde support for dates in the "YYYY-MM-DD" wire format.
pub mod calendar_date {
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};
    use time::Date;

    use super::{format_calendar_date, parse_calendar_date};

    /// Serialize `date` as "YYYY-MM-DD".
    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_calendar_date(*date))
    }

    /// Deserialize a date from "YYYY-MM-DD" or a full timestamp.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let text = String::deserialize(deserializer)?;

        parse_calendar_date(&text).map_err(D::Error::custom)
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Convert `amount` to the integer type SQLite stores.
fn amount_to_sql(amount: u64) -> Result<i64, Error> {
    i64::try_from(amount).map_err(|_| Error::InvalidAmount(amount.to_string()))
}

/// Convert a stored amount read from `column` back to an unsigned amount.
pub(crate) fn amount_from_sql(amount: i64, column: usize) -> Result<u64, rusqlite::Error> {
    u64::try_from(amount).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(column, Type::Integer, Box::new(error))
    })
}

/// Create a new expense in the database from a builder.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidAmount] if the amount is too large to store,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_expense(builder: ExpenseBuilder, connection: &Connection) -> Result<Expense, Error> {
    let amount = amount_to_sql(builder.amount)?;

    let expense = connection
        .prepare(
            "INSERT INTO expense (date, title, category, amount, income)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, date, title, category, amount, income",
        )?
        .query_row(
            (
                builder.date,
                builder.title,
                builder.category,
                amount,
                builder.income,
            ),
            map_expense_row,
        )?;

    Ok(expense)
}

/// Retrieve an expense from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare("SELECT id, date, title, category, amount, income FROM expense WHERE id = :id")?
        .query_row(&[(":id", &id)], map_expense_row)?;

    Ok(expense)
}

/// Replace every field of the expense with the ID `expense.id`.
///
/// Returns the stored record.
///
/// # Errors
/// This function will return a:
/// - [Error::UpdateMissingExpense] if no expense has the ID `expense.id`,
/// - [Error::InvalidAmount] if the amount is too large to store,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_expense(expense: &Expense, connection: &Connection) -> Result<Expense, Error> {
    let amount = amount_to_sql(expense.amount)?;

    connection
        .prepare(
            "UPDATE expense
             SET date = ?1, title = ?2, category = ?3, amount = ?4, income = ?5
             WHERE id = ?6
             RETURNING id, date, title, category, amount, income",
        )?
        .query_row(
            (
                expense.date,
                &expense.title,
                expense.category,
                amount,
                expense.income,
                expense.id,
            ),
            map_expense_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::UpdateMissingExpense,
            error => error.into(),
        })
}

/// Delete the expense with the ID `id`.
///
/// Returns the deleted record.
///
/// # Errors
/// This function will return a:
/// - [Error::DeleteMissingExpense] if no expense has the ID `id`,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    connection
        .prepare(
            "DELETE FROM expense WHERE id = :id
             RETURNING id, date, title, category, amount, income",
        )?
        .query_row(&[(":id", &id)], map_expense_row)
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::DeleteMissingExpense,
            error => error.into(),
        })
}

/// Get the expenses dated within `scope` under the `bound` policy, in ID order.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn get_expenses_in_month(
    scope: MonthScope,
    bound: MonthBound,
    connection: &Connection,
) -> Result<Vec<Expense>, Error> {
    let range = scope.date_range(bound);

    connection
        .prepare(
            "SELECT id, date, title, category, amount, income FROM expense
             WHERE date >= :start AND date < :end
             ORDER BY id ASC",
        )?
        .query_map(
            &[(":start", &range.start), (":end", &range.end)],
            map_expense_row,
        )?
        .map(|maybe_expense| maybe_expense.map_err(Error::from))
        .collect()
}

/// Get the total number of expenses in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
#[cfg(test)]
pub fn count_expenses(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM expense;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Create the expense table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                title TEXT NOT NULL,
                category TEXT NOT NULL
                    CHECK (category IN ('FOOD', 'TRANSPORTATION', 'CULTURE', 'SHOPPING', 'ETC')),
                amount INTEGER NOT NULL CHECK (amount >= 0),
                income INTEGER NOT NULL CHECK (income IN (0, 1))
                )",
        (),
    )?;

    // Month queries filter on date.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_expense_date ON expense(date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to an Expense.
pub fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let date = row.get(1)?;
    let title = row.get(2)?;
    let category = row.get(3)?;
    let amount = amount_from_sql(row.get(4)?, 4)?;
    let income = row.get(5)?;

    Ok(Expense {
        id,
        date,
        title,
        category,
        amount,
        income,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod serde_tests {
    use time::macros::date;

    use crate::{
        Error,
        expense::{Category, Expense, ExpenseBuilder, parse_calendar_date},
    };

    #[test]
    fn serializes_date_as_calendar_day() {
        let expense = Expense {
            id: 1,
            date: date!(2024 - 05 - 10),
            title: "Lunch".to_owned(),
            category: Category::Food,
            amount: 12_000,
            income: false,
        };

        let json = serde_json::to_value(&expense).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "date": "2024-05-10",
                "title": "Lunch",
                "category": "FOOD",
                "amount": 12000,
                "income": false
            })
        );
    }

    #[test]
    fn accepts_timestamps_for_dates() {
        let builder: ExpenseBuilder = serde_json::from_value(serde_json::json!({
            "date": "2024-05-10T00:00:00.000Z",
            "title": "Lunch",
            "category": "FOOD",
            "amount": 12000,
            "income": false
        }))
        .unwrap();

        assert_eq!(builder.date, date!(2024 - 05 - 10));
    }

    #[test]
    fn rejects_missing_fields() {
        let result = serde_json::from_value::<ExpenseBuilder>(serde_json::json!({
            "date": "2024-05-10",
            "title": "Lunch",
            "amount": 12000,
            "income": false
        }));

        assert!(result.is_err());
    }

    #[test]
    fn rejects_negative_amounts() {
        let result = serde_json::from_value::<ExpenseBuilder>(serde_json::json!({
            "date": "2024-05-10",
            "title": "Lunch",
            "category": "FOOD",
            "amount": -5,
            "income": false
        }));

        assert!(result.is_err());
    }

    #[test]
    fn parse_rejects_invalid_dates() {
        assert!(matches!(
            parse_calendar_date("2024-02-30"),
            Err(Error::InvalidRequest(_))
        ));
    }
}
