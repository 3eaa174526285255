//! Month totals of spending and income.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    expense::core::amount_from_sql,
    month::{DateRange, MonthBound, MonthScope},
};

/// The totals of spending and income for one month.
///
/// The wire names are `expenses` and `income`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MonthSummary {
    /// The sum of amounts of the records with `income = false`.
    #[serde(rename = "expenses")]
    pub expense_total: u64,
    /// The sum of amounts of the records with `income = true`.
    #[serde(rename = "income")]
    pub income_total: u64,
}

impl MonthSummary {
    /// Income minus spending.
    pub fn net_total(self) -> i64 {
        let income = i64::try_from(self.income_total).unwrap_or(i64::MAX);
        let expenses = i64::try_from(self.expense_total).unwrap_or(i64::MAX);

        income.saturating_sub(expenses)
    }
}

/// Sum the spending and income dated within `scope` under the `bound` policy.
///
/// Both totals are zero for a month with no records.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn get_month_summary(
    scope: MonthScope,
    bound: MonthBound,
    connection: &Connection,
) -> Result<MonthSummary, Error> {
    let range = scope.date_range(bound);

    Ok(MonthSummary {
        expense_total: sum_amounts(range, false, connection)?,
        income_total: sum_amounts(range, true, connection)?,
    })
}

/// Add up the amounts in Rust since SQLite's `SUM` fails past `i64::MAX`.
///
/// The total saturates at `u64::MAX`.
fn sum_amounts(range: DateRange, income: bool, connection: &Connection) -> Result<u64, Error> {
    let mut statement = connection.prepare(
        "SELECT amount FROM expense
         WHERE income = :income AND date >= :start AND date < :end",
    )?;
    let amounts = statement.query_map(
        rusqlite::named_params! {
            ":income": income,
            ":start": range.start,
            ":end": range.end,
        },
        |row| amount_from_sql(row.get(0)?, 0),
    )?;

    let mut total: u64 = 0;
    for amount in amounts {
        total = total.saturating_add(amount?);
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        db::initialize,
        expense::{Category, Expense, MAX_AMOUNT, create_expense, get_expenses_in_month},
        month::{MonthBound, MonthScope},
    };

    use super::{MonthSummary, get_month_summary};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn empty_month_has_zero_totals() {
        let conn = get_test_connection();

        let summary = get_month_summary(
            MonthScope::new(2024, 5).unwrap(),
            MonthBound::Calendar,
            &conn,
        )
        .unwrap();

        assert_eq!(summary, MonthSummary::default());
    }

    #[test]
    fn sums_spending_and_income_separately() {
        let conn = get_test_connection();
        create_expense(Expense::build(date!(2024 - 05 - 10), "Lunch", 1_000), &conn).unwrap();
        create_expense(Expense::build(date!(2024 - 05 - 11), "Bus", 2_000), &conn).unwrap();
        create_expense(
            Expense::build(date!(2024 - 05 - 25), "Salary", 700_000).income(true),
            &conn,
        )
        .unwrap();
        create_expense(Expense::build(date!(2024 - 06 - 01), "June", 9_999), &conn).unwrap();

        let summary = get_month_summary(
            MonthScope::new(2024, 5).unwrap(),
            MonthBound::Calendar,
            &conn,
        )
        .unwrap();

        assert_eq!(
            summary,
            MonthSummary {
                expense_total: 3_000,
                income_total: 700_000
            }
        );
        assert_eq!(summary.net_total(), 697_000);
    }

    #[test]
    fn totals_past_largest_stored_amount() {
        let conn = get_test_connection();
        create_expense(
            Expense::build(date!(2024 - 05 - 10), "Deposit", MAX_AMOUNT),
            &conn,
        )
        .unwrap();
        create_expense(Expense::build(date!(2024 - 05 - 11), "Gum", 1), &conn).unwrap();

        let summary = get_month_summary(
            MonthScope::new(2024, 5).unwrap(),
            MonthBound::Calendar,
            &conn,
        )
        .expect("Could not sum amounts past i64::MAX");

        assert_eq!(summary.expense_total, MAX_AMOUNT + 1);
        assert_eq!(summary.income_total, 0);
        assert_eq!(summary.net_total(), -i64::MAX);
    }

    #[test]
    fn totals_partition_the_month_listing() {
        let conn = get_test_connection();
        let may = MonthScope::new(2024, 5).unwrap();
        for (day, amount, income) in [
            (1, 4_500, false),
            (3, 250_000, true),
            (3, 12_000, false),
            (17, 90_000, true),
            (31, 8_800, false),
        ] {
            create_expense(
                Expense::build(date!(2024 - 05 - 01).replace_day(day).unwrap(), "", amount)
                    .category(Category::Shopping)
                    .income(income),
                &conn,
            )
            .unwrap();
        }
        create_expense(Expense::build(date!(2024 - 04 - 30), "", 77), &conn).unwrap();

        for bound in [MonthBound::Calendar, MonthBound::LiteralDay31] {
            let summary = get_month_summary(may, bound, &conn).unwrap();
            let listing = get_expenses_in_month(may, bound, &conn).unwrap();
            let (income, spending): (Vec<_>, Vec<_>) =
                listing.iter().partition(|expense| expense.income);

            assert_eq!(income.len() + spending.len(), listing.len());
            assert_eq!(
                summary.income_total,
                income.iter().map(|expense| expense.amount).sum::<u64>()
            );
            assert_eq!(
                summary.expense_total,
                spending.iter().map(|expense| expense.amount).sum::<u64>()
            );
            assert_eq!(
                summary.expense_total + summary.income_total,
                listing.iter().map(|expense| expense.amount).sum::<u64>()
            );
        }
    }

    #[test]
    fn serializes_with_wire_names() {
        let summary = MonthSummary {
            expense_total: 3_000,
            income_total: 700_000,
        };

        assert_eq!(
            serde_json::to_value(summary).unwrap(),
            serde_json::json!({"expenses": 3000, "income": 700000})
        );
    }

    #[test]
    fn net_total_is_negative_when_overspent() {
        let summary = MonthSummary {
            expense_total: 5_000,
            income_total: 1_000,
        };

        assert_eq!(summary.net_total(), -4_000);
    }
}
