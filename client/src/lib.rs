//! HTTP client for the reminder plugin's creation endpoint.
//!
//! # Route
//!
//! `POST {server}/plugins/{plugin_id}/add` with a JSON [`ReminderRequest`] body.
//! The request carries the same options the host web client attaches to its
//! own calls:
//!
//! | Header | Value |
//! |--------|-------|
//! | `Authorization` | `Bearer <token>` (when a token is configured) |
//! | `X-Requested-With` | `XMLHttpRequest` |
//! | `Content-Type` | `application/json` |
//!
//! # Error Handling
//!
//! Non-2xx responses become [`EndpointError::Status`]. The plugin answers
//! failures with `{"error": "...", "details": "..."}` (or plain text for 401);
//! the message is pulled from that body and truncated. Callers going through
//! the composer never see these errors: see [`postreminder_core::Dispatch`].

use std::{fmt, time::Duration};

use futures_util::StreamExt;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use url::Url;

use postreminder_core::{CreationEndpoint, EndpointError};
use postreminder_types::{ReminderRequest, truncate_with_ellipsis};

const CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MAX_ERROR_BODY_BYTES: usize = 32 * 1024;
const MAX_ERROR_MESSAGE_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("server url {url:?} is invalid: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("plugin id must not be empty")]
    EmptyPluginId,
    #[error("token contains characters not allowed in a header")]
    InvalidToken,
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Where and how to reach the plugin.
#[derive(Clone)]
pub struct EndpointConfig {
    pub server_url: String,
    pub plugin_id: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

// Manual Debug impl to prevent leaking the token in logs.
impl fmt::Debug for EndpointConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointConfig")
            .field("server_url", &self.server_url)
            .field("plugin_id", &self.plugin_id)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Reminder creation over HTTP.
#[derive(Debug, Clone)]
pub struct HttpEndpoint {
    client: reqwest::Client,
    add_url: Url,
}

impl HttpEndpoint {
    pub fn new(config: &EndpointConfig) -> Result<Self, ClientError> {
        let add_url = add_url(&config.server_url, &config.plugin_id)?;

        let mut headers = HeaderMap::new();
        headers.insert("X-Requested-With", HeaderValue::from_static("XMLHttpRequest"));
        if let Some(token) = config.token.as_deref().filter(|t| !t.trim().is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
                .map_err(|_| ClientError::InvalidToken)?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::none())
            .default_headers(headers)
            .build()?;

        Ok(Self { client, add_url })
    }

    #[must_use]
    pub fn add_url(&self) -> &Url {
        &self.add_url
    }

    async fn post(&self, request: &ReminderRequest) -> Result<(), EndpointError> {
        let response = self
            .client
            .post(self.add_url.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| EndpointError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            debug!(%status, post_id = %request.post_id, "Creation endpoint accepted reminder");
            return Ok(());
        }

        let body = read_capped_error_body(response).await;
        Err(EndpointError::Status {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }
}

impl CreationEndpoint for HttpEndpoint {
    async fn create(&self, request: ReminderRequest) -> Result<(), EndpointError> {
        self.post(&request).await
    }
}

/// `{server}/plugins/{plugin_id}/add`, tolerating a trailing slash or a
/// subpath on the server url.
pub fn add_url(server_url: &str, plugin_id: &str) -> Result<Url, ClientError> {
    let plugin_id = plugin_id.trim();
    if plugin_id.is_empty() {
        return Err(ClientError::EmptyPluginId);
    }
    let mut base = server_url.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    let invalid = |source| ClientError::InvalidUrl {
        url: server_url.to_string(),
        source,
    };
    let base = Url::parse(&base).map_err(invalid)?;
    base.join(&format!("plugins/{plugin_id}/add"))
        .map_err(invalid)
}

async fn read_capped_error_body(response: reqwest::Response) -> String {
    let mut body = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let Ok(chunk) = chunk else { break };
        body.extend_from_slice(&chunk);
        if body.len() > MAX_ERROR_BODY_BYTES {
            body.truncate(MAX_ERROR_BODY_BYTES);
            break;
        }
    }
    String::from_utf8_lossy(&body).into_owned()
}

#[derive(Deserialize)]
struct PluginErrorBody {
    error: String,
    #[serde(default)]
    details: String,
}

/// Human-readable message from a plugin error body.
#[must_use]
pub fn error_message(body: &str) -> String {
    let message = match serde_json::from_str::<PluginErrorBody>(body) {
        Ok(parsed) if parsed.details.trim().is_empty() => parsed.error,
        Ok(parsed) => format!("{}: {}", parsed.error, parsed.details.trim()),
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.to_string(),
    };
    truncate_with_ellipsis(&message, MAX_ERROR_MESSAGE_CHARS)
}
