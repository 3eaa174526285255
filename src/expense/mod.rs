//! Expense management for the tracker.
//!
//! This module contains everything related to expenses:
//! - The `Expense` model and `ExpenseBuilder` for creating records
//! - Database functions for storing and querying records by month
//! - The JSON API handlers and the server-rendered expenses page

mod category;
mod core;
mod create_endpoint;
mod delete_endpoint;
mod form;
mod form_endpoint;
mod list_endpoint;
mod page;
mod store;
mod summary;
mod summary_endpoint;
mod update_endpoint;
mod view;

pub use category::Category;
pub use core::{
    Expense, ExpenseBuilder, MAX_AMOUNT, calendar_date, create_expense, create_expense_table,
    delete_expense, format_calendar_date, get_expense, get_expenses_in_month, map_expense_row,
    parse_calendar_date, update_expense,
};
pub use create_endpoint::create_expense_endpoint;
pub use delete_endpoint::{DeleteExpenseRequest, delete_expense_endpoint, delete_expense_row_endpoint};
pub use form::{ExpenseForm, ParsedAmount, expense_form_view, parse_amount_text};
pub use form_endpoint::create_expense_from_form_endpoint;
pub use list_endpoint::list_expenses_endpoint;
pub use page::{ExpensesPageState, get_expenses_page, get_month_panel};
pub use store::ExpenseStore;
pub use summary::{MonthSummary, get_month_summary};
pub use summary_endpoint::get_month_summary_endpoint;
pub use update_endpoint::update_expense_endpoint;
pub use view::{expenses_page_view, month_panel_view};

#[cfg(test)]
pub use core::count_expenses;

/// The htmx event sent with responses that change the stored expenses.
pub const EXPENSES_CHANGED_EVENT: &str = "expenses-changed";
