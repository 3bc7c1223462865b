//! HTTP client for the campaign platform API.

use crate::error::{ApiError, Result};
use crate::submit::SubmitOutcome;
use mailflow_core::ApiConfig;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Client for the campaign platform API.
///
/// Holds a shared `reqwest` client, the API base URL, and an optional
/// bearer token. Endpoint bindings live in the sibling modules as
/// `impl ApiClient` blocks.
pub struct ApiClient {
    http: Client,
    base_url: String,
    api_token: Option<String>,
}

impl ApiClient {
    /// Create a new client for the given base URL with a 30 second timeout.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    /// Create a new client with a custom request timeout.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Internal(format!("failed to create HTTP client: {e}")))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            http,
            base_url,
            api_token: None,
        })
    }

    /// Create a client from an [`ApiConfig`] section.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let mut client =
            Self::with_timeout(&config.base_url, Duration::from_secs(config.timeout_secs))?;
        client.api_token = config.api_token.clone();
        Ok(client)
    }

    /// Set the bearer token used for authentication.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Get the configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// GET a JSON resource.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.authed(self.http.get(self.url(path))).send().await?;
        let response = Self::check_status(path, response).await?;
        Self::decode(path, response).await
    }

    /// POST a JSON body and decode a JSON response.
    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .authed(self.http.post(self.url(path)))
            .json(body)
            .send()
            .await?;
        let response = Self::check_status(path, response).await?;
        Self::decode(path, response).await
    }

    /// PUT a JSON body and decode a JSON response.
    pub(crate) async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .authed(self.http.put(self.url(path)))
            .json(body)
            .send()
            .await?;
        let response = Self::check_status(path, response).await?;
        Self::decode(path, response).await
    }

    /// DELETE a resource, discarding any response body.
    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let response = self.authed(self.http.delete(self.url(path))).send().await?;
        Self::check_status(path, response).await?;
        Ok(())
    }

    /// Submit a long-running job.
    ///
    /// The server may answer synchronously with the terminal payload or
    /// asynchronously with a processing acknowledgment; the caller gets the
    /// decoded [`SubmitOutcome`]. A client-generated idempotency key guards
    /// against duplicate submissions on retried requests.
    pub(crate) async fn submit_job<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<SubmitOutcome<T>> {
        let idempotency_key = uuid::Uuid::new_v4().to_string();
        let response = self
            .authed(self.http.post(self.url(path)))
            .header("idempotency-key", &idempotency_key)
            .json(body)
            .send()
            .await?;
        let response = Self::check_status(path, response).await?;

        let outcome: SubmitOutcome<T> = Self::decode(path, response).await?;
        if let SubmitOutcome::Processing(ack) = &outcome {
            tracing::info!(
                endpoint = path,
                token = %ack.token,
                "job accepted for asynchronous processing"
            );
        }
        Ok(outcome)
    }

    /// Map non-success statuses to errors, passing successful responses through.
    async fn check_status(endpoint: &str, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(ApiError::Unauthorized { message });
        }

        Err(ApiError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(endpoint: &str, response: Response) -> Result<T> {
        response.json().await.map_err(|e| ApiError::Parse {
            endpoint: endpoint.to_string(),
            message: format!("failed to parse response: {e}"),
        })
    }
}
