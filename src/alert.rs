//! Alert messages shown to the user after a form submission or row action.
//!
//! Alerts are swapped into the `#alert-container` element of the base page
//! layout.

use axum::response::{Html, IntoResponse, Response};
use maud::{Markup, html};

/// An alert message and its styling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    /// A success message with extra details.
    Success { message: String, details: String },
    /// A success message with no details.
    SuccessSimple { message: String },
    /// An error message with extra details.
    Error { message: String, details: String },
}

impl Alert {
    /// Render the alert as HTML.
    pub fn into_html(self) -> Markup {
        let (container_style, message, details) = match self {
            Alert::Success { message, details } => (SUCCESS_STYLE, message, details),
            Alert::SuccessSimple { message } => (SUCCESS_STYLE, message, String::new()),
            Alert::Error { message, details } => (ERROR_STYLE, message, details),
        };

        html! {
            div
                role="alert"
                class=(container_style)
            {
                div class="flex items-start justify-between gap-4"
                {
                    div
                    {
                        p class="font-medium" { (message) }

                        @if !details.is_empty() {
                            p class="text-sm" { (details) }
                        }
                    }

                    button
                        type="button"
                        aria-label="Dismiss"
                        class="font-bold"
                        onclick="this.closest('[role=alert]').remove()"
                    {
                        "×"
                    }
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        Html(self.into_html().into_string()).into_response()
    }
}

const SUCCESS_STYLE: &str = "p-4 mb-4 rounded border text-green-800 bg-green-50 \
    border-green-300 dark:bg-gray-800 dark:text-green-400 dark:border-green-800";

const ERROR_STYLE: &str = "p-4 mb-4 rounded border text-red-800 bg-red-50 \
    border-red-300 dark:bg-gray-800 dark:text-red-400 dark:border-red-800";
