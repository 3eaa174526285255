#![allow(missing_docs)]

pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;

pub(crate) use form::{assert_form_input, assert_hx_endpoint, must_get_form};
pub(crate) use html::{assert_valid_html, parse_html_document, parse_html_fragment};
pub(crate) use http::{assert_status, get_header, parse_json_body};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::{AppState, expense::ExpenseStore, month::MonthBound};

/// An [AppState] over a fresh in-memory database.
pub(crate) fn get_test_app_state() -> AppState {
    let connection = Connection::open_in_memory().expect("Could not open database in memory.");

    AppState::new(connection, "Etc/UTC", MonthBound::Calendar)
        .expect("Could not initialize app state.")
}

/// An [ExpenseStore] over a fresh in-memory database.
pub(crate) fn get_test_store() -> ExpenseStore {
    ExpenseStore::from_ref(&get_test_app_state())
}
