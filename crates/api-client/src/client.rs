//! HTTP client for the back-office API.
//!
//! Split in two layers: [`BankApiClient`] can only reach the unauthenticated
//! endpoints, and [`ApiSession`] (produced by a successful login) carries the
//! bearer token for everything else.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use crate::error::{ApiClientError, ErrorBody};
use crate::types::{
    AccountList, CustomerList, CustomerQuery, DashboardStats, ExpenseList, ExpenseQuery, Health,
    LoanList, LoginRequest, LoginResponse, SessionUser, TransactionPage, TransactionQuery,
};
use bankops_core::CustomerId;

/// Client for the unauthenticated surface of the back-office API.
///
/// Cheap to clone; the HTTP connection pool is shared.
#[derive(Clone)]
pub struct BankApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    base_url: Url,
}

impl BankApiClient {
    /// Create a new client for the API at `base_url`.
    ///
    /// `timeout` applies to every request made through this client and any
    /// session derived from it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::InvalidBaseUrl`] if `base_url` does not
    /// parse, or [`ApiClientError::Http`] if the HTTP client fails to build.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiClientError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiClientError::InvalidBaseUrl(format!("{base_url}: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(ClientInner { http, base_url }),
        })
    }

    /// `GET /api/health` - liveness probe, no auth required.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server is unhealthy
    /// enough to answer with a non-2xx status.
    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<Health, ApiClientError> {
        let url = self.inner.endpoint("/api/health")?;
        let response = self.inner.http.get(url).send().await?;
        handle_response(response).await
    }

    /// `POST /api/auth/login` - exchange credentials for a bearer session.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::Unauthorized`] if the credentials are
    /// rejected, or other variants for transport/parse failures.
    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<ApiSession, ApiClientError> {
        let url = self.inner.endpoint("/api/auth/login")?;
        let body = LoginRequest {
            username,
            password: password.expose_secret(),
        };

        let response = self.inner.http.post(url).json(&body).send().await?;
        let login: LoginResponse = handle_response(response).await?;

        tracing::debug!(username, role = %login.user.role, "login succeeded");

        let bearer = HeaderValue::from_str(&format!("Bearer {}", login.token))
            .map_err(|e| ApiClientError::Parse(format!("token not header-safe: {e}")))?;

        Ok(ApiSession {
            inner: Arc::clone(&self.inner),
            bearer,
            user: login.user,
        })
    }
}

/// An authenticated session against the back-office API.
///
/// Owns the bearer token from login; every authenticated endpoint method
/// lives here so a probe cannot reach one without logging in first.
#[derive(Clone)]
pub struct ApiSession {
    inner: Arc<ClientInner>,
    bearer: HeaderValue,
    user: SessionUser,
}

impl ApiSession {
    /// The user this session authenticated as.
    #[must_use]
    pub const fn user(&self) -> &SessionUser {
        &self.user
    }

    /// `GET /api/customers?search=&page=&limit=`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx response.
    #[instrument(skip(self))]
    pub async fn customers(&self, query: &CustomerQuery) -> Result<CustomerList, ApiClientError> {
        self.get_json("/api/customers", Some(query)).await
    }

    /// `GET /api/accounts?customerId=`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx response.
    #[instrument(skip(self))]
    pub async fn accounts(&self, customer_id: CustomerId) -> Result<AccountList, ApiClientError> {
        self.get_json("/api/accounts", Some(&[("customerId", customer_id.as_i64())]))
            .await
    }

    /// `GET /api/loans`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx response.
    #[instrument(skip(self))]
    pub async fn loans(&self) -> Result<LoanList, ApiClientError> {
        self.get_json::<LoanList, ()>("/api/loans", None).await
    }

    /// `GET /api/transactions?page=&limit=&search=`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx response.
    #[instrument(skip(self))]
    pub async fn transactions(
        &self,
        query: &TransactionQuery,
    ) -> Result<TransactionPage, ApiClientError> {
        self.get_json("/api/transactions", Some(query)).await
    }

    /// `GET /api/expenses?search=&category=`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx response.
    #[instrument(skip(self))]
    pub async fn expenses(&self, query: &ExpenseQuery) -> Result<ExpenseList, ApiClientError> {
        self.get_json("/api/expenses", Some(query)).await
    }

    /// `GET /api/dashboard/stats`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx response.
    #[instrument(skip(self))]
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ApiClientError> {
        self.get_json::<DashboardStats, ()>("/api/dashboard/stats", None)
            .await
    }

    /// Issue an authenticated GET and decode the JSON body.
    async fn get_json<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<T, ApiClientError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.inner.endpoint(path)?;
        let mut request = self
            .inner
            .http
            .get(url)
            .header(AUTHORIZATION, self.bearer.clone());

        if let Some(query) = query {
            request = request.query(query);
        }

        let response = request.send().await?;
        handle_response(response).await
    }
}

impl ClientInner {
    /// Join an endpoint path onto the base URL.
    fn endpoint(&self, path: &str) -> Result<Url, ApiClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiClientError::InvalidBaseUrl(format!("{path}: {e}")))
    }
}

/// Decode a 2xx body, or map an error status to a typed error.
async fn handle_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiClientError> {
    let status = response.status();

    if status.is_success() {
        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| ApiClientError::Parse(format!("failed to parse response: {e}")))
    } else {
        Err(handle_error_status(status, response).await)
    }
}

/// Build the error for a non-2xx response.
async fn handle_error_status(
    status: reqwest::StatusCode,
    response: reqwest::Response,
) -> ApiClientError {
    let message = match response.text().await {
        Ok(body) => ErrorBody::extract(&body),
        Err(e) => return ApiClientError::Http(e),
    };

    if status == reqwest::StatusCode::UNAUTHORIZED {
        return ApiClientError::Unauthorized(message);
    }

    ApiClientError::Api {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client() -> BankApiClient {
        BankApiClient::new("http://localhost:5000", Duration::from_secs(30)).unwrap()
    }

    #[test]
    fn test_new_rejects_garbage_base_url() {
        let result = BankApiClient::new("not a url", Duration::from_secs(1));
        assert!(matches!(result, Err(ApiClientError::InvalidBaseUrl(_))));
    }

    #[test]
    fn test_endpoint_join() {
        let client = client();
        let url = client.inner.endpoint("/api/health").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/health");
    }

    #[test]
    fn test_endpoint_join_with_base_path() {
        // Trailing slash on the base keeps any mount prefix intact
        let client = BankApiClient::new("http://bank.internal/", Duration::from_secs(5)).unwrap();
        let url = client.inner.endpoint("/api/loans").unwrap();
        assert_eq!(url.as_str(), "http://bank.internal/api/loans");
    }

    #[test]
    fn test_client_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<BankApiClient>();
        assert_clone::<ApiSession>();
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BankApiClient>();
        assert_send_sync::<ApiSession>();
    }
}
