//! Page transport
//!
//! The client sees the network as "GET a URL, get JSON back". The trait
//! keeps retrieval logic testable with a scripted transport.

use crate::config::MistConfig;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;

/// A single page request that failed and may succeed when repeated
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Response from {url} is not valid JSON: {message}")]
    Decode { url: String, message: String },
}

/// Fetches one JSON document per call
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<Value, TransportError>;
}

/// reqwest-backed transport
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &MistConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, url: &str) -> Result<Value, TransportError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();

        // The API answers unknown resources with 404 and a `{ "name": ... }`
        // body; hand that back as a page so pagination ends cleanly.
        if status == StatusCode::NOT_FOUND {
            let body = response.text().await.unwrap_or_default();
            return Ok(serde_json::from_str(&body)
                .unwrap_or_else(|_| serde_json::json!({ "name": "NotFoundError" })));
        }

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| TransportError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}
