//! HTTP transport seam.
//!
//! The client owns its transport explicitly so tests can swap in a
//! scripted one. There is no process-wide client.

use async_trait::async_trait;
use std::time::Duration;
use tgbot_core::error::TgError;

/// Status and raw body of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues the two kinds of request the Bot API needs.
///
/// Implementations must be safe to share between tasks. Non-2xx statuses
/// are returned as responses, not errors: the Bot API reports failures in
/// the JSON body.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `url` with the given query parameters.
    async fn get(
        &self,
        url: &str,
        query: &[(&str, String)],
        timeout: Duration,
    ) -> Result<HttpResponse, TgError>;

    /// POST `form` to `url` as `application/x-www-form-urlencoded`.
    async fn post_form(
        &self,
        url: &str,
        form: &[(&str, String)],
        timeout: Duration,
    ) -> Result<HttpResponse, TgError>;
}

/// [`Transport`] backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse an existing client (and its connection pool).
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn finish(resp: reqwest::Response) -> Result<HttpResponse, TgError> {
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(transport_error)?;
        Ok(HttpResponse { status, body })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(
        &self,
        url: &str,
        query: &[(&str, String)],
        timeout: Duration,
    ) -> Result<HttpResponse, TgError> {
        let resp = self
            .client
            .get(url)
            .query(query)
            .timeout(timeout)
            .send()
            .await
            .map_err(transport_error)?;
        Self::finish(resp).await
    }

    async fn post_form(
        &self,
        url: &str,
        form: &[(&str, String)],
        timeout: Duration,
    ) -> Result<HttpResponse, TgError> {
        let resp = self
            .client
            .post(url)
            .form(form)
            .timeout(timeout)
            .send()
            .await
            .map_err(transport_error)?;
        Self::finish(resp).await
    }
}

// The request URL embeds the bot token, so it is stripped from the message.
fn transport_error(e: reqwest::Error) -> TgError {
    TgError::Transport(e.without_url().to_string())
}
