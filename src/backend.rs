//! HTTP client for the chat backend (POST /chat, GET /test).

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ChatError;

/// Body of `POST /chat`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub lang: String,
}

/// Expected body of a successful reply.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// One request/response exchange with the backend. Implementations block;
/// the widget runs them off the UI thread.
pub trait ChatBackend: Send + Sync {
    fn send(&self, request: &ChatRequest) -> Result<String, ChatError>;
}

/// Map a raw HTTP status and body to the reply text.
pub fn parse_reply(status: u16, body: &str) -> Result<String, ChatError> {
    if !(200..300).contains(&status) {
        return Err(ChatError::Http { status });
    }
    let parsed: ChatResponse =
        serde_json::from_str(body).map_err(|e| ChatError::MalformedResponse(e.to_string()))?;
    if parsed.response.is_empty() {
        return Err(ChatError::MalformedResponse("empty `response`".into()));
    }
    Ok(parsed.response)
}

pub struct HttpBackend {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpBackend {
    pub fn new(endpoint: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder().timeout(timeout).build()?;
        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Check the backend's `GET /test` route on the endpoint's origin.
    pub fn health_check(&self) -> bool {
        let url = match reqwest::Url::parse(&self.endpoint).and_then(|u| u.join("/test")) {
            Ok(u) => u,
            Err(_) => return false,
        };
        self.client
            .get(url)
            .send()
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }
}

impl ChatBackend for HttpBackend {
    fn send(&self, request: &ChatRequest) -> Result<String, ChatError> {
        debug!(endpoint = %self.endpoint, chars = request.message.chars().count(), "POST chat");
        let resp = self.client.post(&self.endpoint).json(request).send()?;
        let status = resp.status().as_u16();
        if !resp.status().is_success() {
            return Err(ChatError::Http { status });
        }
        let body = resp.text()?;
        parse_reply(status, &body)
    }
}
