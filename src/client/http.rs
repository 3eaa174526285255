use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    database_id::ExpenseId,
    endpoints,
    error::ErrorBody,
    expense::{DeleteExpenseRequest, Expense, ExpenseBuilder, MonthSummary},
    month::{MonthQuery, MonthScope},
};

use super::{ClientError, ExpensesApi};

/// Talks to the expenses JSON API of a running server.
#[derive(Debug, Clone)]
pub struct HttpExpensesApi {
    client: Client,
    base_url: String,
}

impl HttpExpensesApi {
    /// Create a client for the server at `base_url`, e.g. "http://127.0.0.1:3000".
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client that sends its requests with `client`.
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
    let response = request.send().await?;
    let status = response.status();

    if status.is_success() {
        return Ok(response.json().await?);
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status.to_string(),
    };
    tracing::warn!("Expenses API responded with {status}: {message}");

    Err(match status {
        StatusCode::NOT_FOUND => ClientError::NotFound,
        StatusCode::BAD_REQUEST => ClientError::Rejected(message),
        status => ClientError::Server {
            status: status.as_u16(),
            message,
        },
    })
}

impl ExpensesApi for HttpExpensesApi {
    async fn list(&self, scope: MonthScope) -> Result<Vec<Expense>, ClientError> {
        send(
            self.client
                .get(self.url(endpoints::EXPENSES_API))
                .query(&MonthQuery::from(scope)),
        )
        .await
    }

    async fn summary(&self, scope: MonthScope) -> Result<MonthSummary, ClientError> {
        send(
            self.client
                .get(self.url(endpoints::EXPENSE_INFOS_API))
                .query(&MonthQuery::from(scope)),
        )
        .await
    }

    async fn create(&self, expense: ExpenseBuilder) -> Result<Expense, ClientError> {
        send(
            self.client
                .post(self.url(endpoints::EXPENSES_API))
                .json(&expense),
        )
        .await
    }

    async fn update(&self, expense: Expense) -> Result<Expense, ClientError> {
        send(
            self.client
                .put(self.url(endpoints::EXPENSES_API))
                .json(&expense),
        )
        .await
    }

    async fn delete(&self, id: ExpenseId) -> Result<Expense, ClientError> {
        send(
            self.client
                .delete(self.url(endpoints::EXPENSES_API))
                .json(&DeleteExpenseRequest { id }),
        )
        .await
    }
}
