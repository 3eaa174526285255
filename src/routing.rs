//! Application router configuration.

use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState, endpoints,
    expense::{
        create_expense_endpoint, create_expense_from_form_endpoint, delete_expense_endpoint,
        delete_expense_row_endpoint, get_expenses_page, get_month_panel,
        get_month_summary_endpoint, list_expenses_endpoint, update_expense_endpoint,
    },
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_expenses_page))
        .route(endpoints::MONTH_PANEL, get(get_month_panel))
        .route(
            endpoints::EXPENSE_FORM,
            post(create_expense_from_form_endpoint),
        )
        .route(
            endpoints::DELETE_EXPENSE,
            delete(delete_expense_row_endpoint),
        )
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let api_routes = Router::new()
        .route(
            endpoints::EXPENSES_API,
            get(list_expenses_endpoint)
                .post(create_expense_endpoint)
                .put(update_expense_endpoint)
                .delete(delete_expense_endpoint),
        )
        .route(
            endpoints::EXPENSE_INFOS_API,
            get(get_month_summary_endpoint),
        );

    page_routes
        .merge(api_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_htmx::HX_TRIGGER;
    use axum_test::TestServer;
    use serde_json::json;

    use crate::{
        endpoints::{self, format_endpoint},
        error::ErrorBody,
        expense::{EXPENSES_CHANGED_EVENT, Expense, MonthSummary},
        test_utils::get_test_app_state,
    };

    use super::build_router;

    fn get_test_server() -> TestServer {
        TestServer::try_new(build_router(get_test_app_state())).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let server = get_test_server();

        server
            .get("/no/such/page")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn json_api_handles_crud() {
        let server = get_test_server();

        let response = server
            .post(endpoints::EXPENSES_API)
            .json(&json!({
                "date": "2024-05-10",
                "title": "Lunch",
                "category": "FOOD",
                "amount": 12000,
                "income": false,
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let lunch: Expense = response.json();

        let expenses: Vec<Expense> = server
            .get(endpoints::EXPENSES_API)
            .add_query_param("year", "2024")
            .add_query_param("month", "5")
            .await
            .json();
        assert_eq!(expenses, vec![lunch.clone()]);

        let dinner: Expense = server
            .put(endpoints::EXPENSES_API)
            .json(&Expense {
                title: "Dinner".to_owned(),
                ..lunch.clone()
            })
            .await
            .json();
        assert_eq!(dinner.title, "Dinner");

        let summary: MonthSummary = server
            .get(endpoints::EXPENSE_INFOS_API)
            .add_query_param("year", "2024")
            .add_query_param("month", "5")
            .await
            .json();
        assert_eq!(summary.expense_total, 12_000);

        server
            .delete(endpoints::EXPENSES_API)
            .json(&json!({ "id": lunch.id }))
            .await
            .assert_json(&dinner);

        server
            .delete(endpoints::EXPENSES_API)
            .json(&json!({ "id": lunch.id }))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_month_is_bad_request() {
        let server = get_test_server();

        let response = server
            .get(endpoints::EXPENSE_INFOS_API)
            .add_query_param("year", "2024")
            .add_query_param("month", "13")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorBody = response.json();
        assert_eq!(body.error, "invalid month \"2024-13\"");
    }

    #[tokio::test]
    async fn form_and_row_delete_trigger_refresh() {
        let server = get_test_server();

        let response = server
            .post(endpoints::EXPENSE_FORM)
            .form(&[
                ("date", "2024-05-25"),
                ("title", "Salary"),
                ("amount", "+700000"),
                ("category", "ETC"),
            ])
            .await;
        response.assert_status(StatusCode::CREATED);
        assert_eq!(response.header(HX_TRIGGER), EXPENSES_CHANGED_EVENT);

        let expenses: Vec<Expense> = server
            .get(endpoints::EXPENSES_API)
            .add_query_param("year", "2024")
            .add_query_param("month", "5")
            .await
            .json();
        assert_eq!(expenses.len(), 1);
        assert!(expenses[0].income);

        let response = server
            .delete(&format_endpoint(endpoints::DELETE_EXPENSE, expenses[0].id))
            .await;
        response.assert_status_ok();
        assert_eq!(response.header(HX_TRIGGER), EXPENSES_CHANGED_EVENT);
    }

    #[tokio::test]
    async fn root_serves_page() {
        let server = get_test_server();

        let response = server
            .get(endpoints::ROOT)
            .add_query_param("year", "2024")
            .add_query_param("month", "5")
            .await;

        response.assert_status_ok();
        assert!(response.text().contains("May 2024"));
    }
}
