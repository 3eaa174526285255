//! A client for browsing expenses month by month.
//!
//! [ViewState] and [reduce] hold the view logic, [Controller] drives them
//! against any [ExpensesApi].

mod api;
mod controller;
mod http;
mod local;
mod state;

pub use api::{ClientError, ExpensesApi};
pub use controller::Controller;
pub use http::HttpExpensesApi;
pub use local::LocalExpensesApi;
pub use state::{Action, MonthData, Step, ViewState, reduce};
