use std::time::Duration;

use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{DocumentError, DocumentHandle, DocumentLoader, DocumentResult};

/// HTTP fetch settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FetchConfig {
    /// Connection timeout in seconds
    pub connect_timeout_seconds: u32,
    /// Request timeout in seconds, including reading the body
    pub request_timeout_seconds: u32,
    /// User agent to send (defaults to `typeless/<version>`)
    pub user_agent: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            connect_timeout_seconds: 30,
            request_timeout_seconds: 120,
            user_agent: None,
        }
    }
}

impl FetchConfig {
    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| concat!("typeless/", env!("CARGO_PKG_VERSION")).to_string())
    }
}

/// Loads documents over HTTP(S).
pub struct HttpLoader {
    client: Client,
}

impl HttpLoader {
    pub fn new(config: FetchConfig) -> DocumentResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(u64::from(config.connect_timeout_seconds)))
            .timeout(Duration::from_secs(u64::from(config.request_timeout_seconds)))
            .user_agent(config.user_agent())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl DocumentLoader for HttpLoader {
    async fn open(&self, address: &str) -> DocumentResult<Box<dyn DocumentHandle>> {
        let response = self.client.get(address).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DocumentError::Status {
                address: address.to_string(),
                status: status.as_u16(),
            });
        }
        debug!(address, status = status.as_u16(), "document response received");

        Ok(Box::new(HttpDocument {
            address: address.to_string(),
            response: Some(response),
            body: None,
            closed: false,
        }))
    }
}

/// A fetched page. The body is read on first access to its content.
pub struct HttpDocument {
    address: String,
    response: Option<Response>,
    body: Option<String>,
    closed: bool,
}

#[async_trait::async_trait]
impl DocumentHandle for HttpDocument {
    fn address(&self) -> &str {
        &self.address
    }

    async fn content(&mut self) -> DocumentResult<String> {
        if self.closed {
            return Err(DocumentError::Closed(self.address.clone()));
        }
        if let Some(response) = self.response.take() {
            self.body = Some(response.text().await?);
        }
        self.body
            .clone()
            .ok_or_else(|| DocumentError::Closed(self.address.clone()))
    }

    fn release(&mut self) {
        self.response = None;
        self.body = None;
        self.closed = true;
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Drop for HttpDocument {
    fn drop(&mut self) {
        if !self.closed {
            warn!(address = %self.address, "document dropped without being closed");
            self.release();
        }
    }
}
