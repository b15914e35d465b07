//! HTTP client for the Shopfront REST API.
//!
//! Wraps `reqwest` with status mapping, bearer-token handling and typed
//! response deserialization. Resource endpoints live in sibling modules as
//! additional `impl ShopfrontClient` blocks.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shopfront_core::AppConfig;

use crate::error::ClientError;

/// Client for the Shopfront REST API.
///
/// Cheap to clone; clones share the underlying connection pool. Use
/// [`ShopfrontClient::new`] with loaded configuration or
/// [`ShopfrontClient::with_base_url`] to point at a mock server in tests.
#[derive(Clone)]
pub struct ShopfrontClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl std::fmt::Debug for ShopfrontClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopfrontClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[redacted]"))
            .finish_non_exhaustive()
    }
}

impl ShopfrontClient {
    /// Creates a client from application configuration, attaching the
    /// configured API token when present.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if the API
    /// URL does not parse.
    pub fn new(config: &AppConfig) -> Result<Self, ClientError> {
        let client = Self::with_base_url(
            &config.api_url,
            config.request_timeout_secs,
            &config.user_agent,
        )?;
        Ok(match &config.api_token {
            Some(token) => client.with_token(token),
            None => client,
        })
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Url::parse(base_url).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            token: None,
        })
    }

    /// Returns a copy of this client that sends `token` as a bearer
    /// credential on every request.
    #[must_use]
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_owned());
        self
    }

    #[must_use]
    pub fn has_session(&self) -> bool {
        self.token.is_some()
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins `path` (which must start with `/`) onto the base URL.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let request = self.client.request(method, url);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let url = self.url(path);
        let mut request = self.request(Method::GET, &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        Self::read_json(request, &url, "GET").await
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let request = self.request(Method::POST, &url).json(body);
        Self::read_json(request, &url, "POST").await
    }

    pub(crate) async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let request = self.request(Method::PUT, &url).json(body);
        Self::read_json(request, &url, "PUT").await
    }

    /// Sends a request whose response body is ignored.
    pub(crate) async fn send_discarding<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ClientError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        let mut request = self.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        Self::check_status(response, &url)?;
        Ok(())
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ClientError> {
        self.send_discarding::<()>(Method::DELETE, path, None).await
    }

    /// Posts a prepared multipart form and parses the JSON reply.
    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ClientError> {
        let url = self.url(path);
        let request = self.request(Method::POST, &url).multipart(form);
        Self::read_json(request, &url, "POST").await
    }

    /// Sends `request`, asserts a 2xx status and parses the body as `T`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotFound`] on HTTP 404.
    /// - [`ClientError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the body does not match `T`.
    async fn read_json<T: DeserializeOwned>(
        request: RequestBuilder,
        url: &str,
        method: &str,
    ) -> Result<T, ClientError> {
        let response = request.send().await?;
        let response = Self::check_status(response, url)?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
            context: format!("{method} {url}"),
            source: e,
        })
    }

    fn check_status(response: Response, url: &str) -> Result<Response, ClientError> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound {
                url: url.to_owned(),
            });
        }
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }
        Ok(response)
    }
}
