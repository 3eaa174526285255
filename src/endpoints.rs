//! The API endpoints URIs.
//!
//! Endpoints that take a parameter, e.g. `{expense_id}`, can be formatted with
//! [format_endpoint].

use crate::month::MonthScope;

/// The monthly expenses page.
pub const ROOT: &str = "/";
/// The JSON collection of expense records, scoped by `year` and `month` for reads.
pub const EXPENSES_API: &str = "/expenses";
/// The JSON totals of expenses and income for a month.
pub const EXPENSE_INFOS_API: &str = "/expenses/infos";
/// The HTML fragment holding a month's totals, creation form and expense list.
pub const MONTH_PANEL: &str = "/expenses/panel";
/// The form submission route for creating an expense from the page.
pub const EXPENSE_FORM: &str = "/expenses/form";
/// The route for deleting an expense from the page.
pub const DELETE_EXPENSE: &str = "/expenses/{expense_id}";
/// The page shown after an unexpected error.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The prefix for static assets.
pub const STATIC: &str = "/static";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// If `endpoint_path` does not contain a parameter, it is returned unchanged.
///
/// # Examples
/// ```
/// use expense_tracker::endpoints::format_endpoint;
///
/// assert_eq!(format_endpoint("/expenses/{expense_id}", 42), "/expenses/42");
/// assert_eq!(format_endpoint("/expenses", 42), "/expenses");
/// ```
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    match (endpoint_path.find('{'), endpoint_path.find('}')) {
        (Some(start), Some(end)) if start < end => format!(
            "{}{}{}",
            &endpoint_path[..start],
            id,
            &endpoint_path[end + 1..]
        ),
        _ => endpoint_path.to_owned(),
    }
}

/// Append the query parameters selecting `scope` to `endpoint_path`.
pub fn with_month_query(endpoint_path: &str, scope: MonthScope) -> String {
    format!("{endpoint_path}?{}", scope.to_query_string())
}
