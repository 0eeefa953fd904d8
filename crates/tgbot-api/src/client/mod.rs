//! Bot API client.
//!
//! Builds `{api_url}/bot{token}/{method}` URLs, issues requests through the
//! owned [`Transport`], and decodes the `{ok, result}` envelope.

pub mod stream;


use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tgbot_core::{config::BotConfig, error::TgError};
use tracing::debug;

use crate::method::ApiMethod;
use crate::transport::{HttpResponse, ReqwestTransport, Transport};
use crate::types::{ApiResponse, SendMessageResponse, SentMessage, Update};

/// Longest slice of a non-JSON error body kept in [`TgError::Http`].
const MAX_ERROR_BODY: usize = 512;

/// Telegram Bot API client.
///
/// Cheap to clone; clones share the transport and its connection pool.
#[derive(Clone)]
pub struct BotApi {
    token: Arc<str>,
    api_url: String,
    transport: Arc<dyn Transport>,
    request_timeout: Duration,
    poll_interval: Duration,
    queue_capacity: usize,
    error_capacity: usize,
}

impl fmt::Debug for BotApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotApi")
            .field("token", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("request_timeout", &self.request_timeout)
            .field("poll_interval", &self.poll_interval)
            .finish_non_exhaustive()
    }
}

impl BotApi {
    /// Client with default settings and a `reqwest` transport.
    ///
    /// The token is not validated; a bad one surfaces as an API error.
    pub fn new(token: impl Into<String>) -> Self {
        Self::from_config(&BotConfig::with_token(token))
    }

    pub fn from_config(config: &BotConfig) -> Self {
        Self::with_transport(config, Arc::new(ReqwestTransport::new()))
    }

    /// Client that sends every request through `transport`.
    pub fn with_transport(config: &BotConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            token: Arc::from(config.bot_token.as_str()),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            transport,
            request_timeout: config.request_timeout(),
            poll_interval: config.poll_interval(),
            queue_capacity: config.queue_capacity.max(1),
            error_capacity: config.error_capacity.max(1),
        }
    }

    fn method_url(&self, method: ApiMethod) -> String {
        format!("{}/bot{}/{}", self.api_url, self.token, method)
    }

    /// Fetch updates with `update_id >= offset`, long-polling up to
    /// `timeout_secs` on the server side.
    pub async fn fetch_updates(
        &self,
        offset: i64,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, TgError> {
        let query = [
            ("offset", offset.to_string()),
            ("timeout", timeout_secs.to_string()),
        ];
        // The server may hold the request open for the whole long poll.
        let timeout = self
            .request_timeout
            .saturating_add(Duration::from_secs(timeout_secs));
        let resp = self
            .transport
            .get(&self.method_url(ApiMethod::GetUpdates), &query, timeout)
            .await?;
        let updates: Vec<Update> = decode(ApiMethod::GetUpdates, resp)?;
        debug!("getUpdates offset={offset}: {} update(s)", updates.len());
        Ok(updates)
    }

    /// Send a plain text message. Not idempotent: repeating the call sends
    /// the message again.
    pub async fn send_text_message(
        &self,
        chat_id: i64,
        text: &str,
    ) -> Result<SendMessageResponse, TgError> {
        let form = [("chat_id", chat_id.to_string()), ("text", text.to_string())];
        let resp = self
            .transport
            .post_form(
                &self.method_url(ApiMethod::SendMessage),
                &form,
                self.request_timeout,
            )
            .await?;
        let result: SentMessage = decode(ApiMethod::SendMessage, resp)?;
        debug!("sendMessage chat_id={chat_id}: message_id={}", result.message_id);
        Ok(SendMessageResponse { ok: true, result })
    }
}

/// Unwrap the `{ok, result}` envelope. `ok: false` is always an error.
fn decode<T: DeserializeOwned>(method: ApiMethod, resp: HttpResponse) -> Result<T, TgError> {
    let envelope: ApiResponse<T> = match serde_json::from_str(&resp.body) {
        Ok(envelope) => envelope,
        Err(_) if !resp.is_success() => {
            return Err(TgError::Http {
                status: resp.status,
                body: truncate(&resp.body, MAX_ERROR_BODY),
            })
        }
        Err(e) => return Err(TgError::Decode(e)),
    };

    if !envelope.ok {
        return Err(TgError::Api {
            code: envelope.error_code,
            description: envelope.description.unwrap_or_default(),
        });
    }

    envelope.result.ok_or_else(|| {
        TgError::Decode(<serde_json::Error as serde::de::Error>::custom(format!(
            "{method}: ok response without result"
        )))
    })
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}
