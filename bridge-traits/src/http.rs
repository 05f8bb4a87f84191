//! HTTP Client Abstraction
//!
//! Provides the async request/response seam used by every provider connector.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;

use crate::error::{BridgeError, Result};

/// HTTP method types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

/// HTTP request builder
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Bytes>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn bearer_token(self, token: impl Into<String>) -> Self {
        self.header("Authorization", format!("Bearer {}", token.into()))
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        let json = serde_json::to_vec(body).map_err(|e| {
            BridgeError::OperationFailed(format!("JSON serialization failed: {}", e))
        })?;
        self.body = Some(Bytes::from(json));
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        Ok(self)
    }

    pub fn body(mut self, body: Bytes) -> Self {
        self.body = Some(body);
        self
    }
}

/// HTTP response
#[derive(Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Bytes,
}

impl HttpResponse {
    /// Parse response body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| {
            BridgeError::InvalidResponse(format!("JSON deserialization failed: {}", e))
        })
    }

    /// Body as text, replacing invalid UTF-8. Used for error messages.
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Check if response status is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Async HTTP client trait
///
/// Implementations own connection pooling and TLS. They
/// must not retry on their own: a failed request surfaces to the caller as a
/// [`BridgeError::Transport`], and a response with any status code is returned
/// as-is for the connector to interpret.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::http::{HttpClient, HttpRequest, HttpMethod};
///
/// async fn fetch_data(client: &dyn HttpClient) -> Result<String> {
///     let request = HttpRequest::new(HttpMethod::Get, "https://api.example.com/data")
///         .bearer_token("token");
///
///     let response = client.execute(request).await?;
///     Ok(response.text_lossy())
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Network connection fails
    /// - TLS validation fails
    /// - The client's own timeout, if configured, elapses
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}
