//! HTTP Client Implementation using Reqwest

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    http::{HttpClient, HttpMethod, HttpRequest, HttpResponse},
};
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Time allowed to establish a TCP/TLS connection
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Reqwest-based HTTP client implementation
///
/// Provides HTTP operations with:
/// - Connection pooling via reqwest
/// - TLS support by default (rustls)
///
/// Requests are sent exactly once. Any status code is handed back to the
/// caller; only failures to obtain a response become errors.
///
/// [`ReqwestHttpClient::new`] sets no overall request timeout, so a response
/// that never arrives keeps the caller (and the scheduler behind it) waiting.
/// Use [`ReqwestHttpClient::with_timeout`] to turn such a stall into a
/// `Transport` error instead.
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Create a new HTTP client without a request timeout
    pub fn new() -> Result<Self> {
        Self::build(None)
    }

    /// Create a new HTTP client that fails requests taking longer than `timeout`
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        Self::build(Some(timeout))
    }

    fn build(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .pool_max_idle_per_host(4)
            .user_agent(concat!("drive-sheets-sync/", env!("CARGO_PKG_VERSION")));

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| {
            BridgeError::NotAvailable(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Self { client })
    }

    /// Convert bridge HttpMethod to reqwest Method
    fn convert_method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
        }
    }

    /// Build reqwest request from bridge request
    fn build_request(&self, request: HttpRequest) -> reqwest::RequestBuilder {
        let method = Self::convert_method(request.method);
        let mut req = self.client.request(method, &request.url);

        for (key, value) in request.headers {
            req = req.header(key, value);
        }

        if let Some(body) = request.body {
            req = req.body(body);
        }

        req
    }

    fn classify(error: reqwest::Error) -> BridgeError {
        if error.is_timeout() {
            BridgeError::Transport("Request timed out".to_string())
        } else if error.is_connect() {
            BridgeError::Transport(format!("Connection failed: {}", error))
        } else {
            BridgeError::Transport(error.to_string())
        }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        debug!(method = ?request.method, url = %request.url, "Executing HTTP request");

        let response = self
            .build_request(request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "HTTP request failed");
                Self::classify(e)
            })?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|s| (k.to_string(), s.to_string())))
            .collect();

        let body = response.bytes().await.map_err(Self::classify)?;

        debug!(status, bytes = body.len(), "HTTP response received");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_http_client_creation() {
        assert!(ReqwestHttpClient::new().is_ok());
        assert!(ReqwestHttpClient::with_timeout(Duration::from_secs(5)).is_ok());
    }

    #[test]
    fn test_method_conversion() {
        assert_eq!(
            ReqwestHttpClient::convert_method(HttpMethod::Get),
            reqwest::Method::GET
        );
        assert_eq!(
            ReqwestHttpClient::convert_method(HttpMethod::Put),
            reqwest::Method::PUT
        );
        assert_eq!(
            ReqwestHttpClient::convert_method(HttpMethod::Post),
            reqwest::Method::POST
        );
    }

    /// Port that was just bound and released, so nothing listens on it
    fn closed_port() -> u16 {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    }

    /// Accepts connections but never writes a response
    async fn silent_server() -> (tokio::net::TcpListener, u16) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        (listener, port)
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        let client = ReqwestHttpClient::new().unwrap();
        let request = HttpRequest::new(
            HttpMethod::Get,
            format!("http://127.0.0.1:{}/", closed_port()),
        );

        let result = client.execute(request).await;
        assert!(matches!(result, Err(BridgeError::Transport(_))));
    }

    #[tokio::test]
    async fn test_configured_timeout_fails_stalled_request() {
        let (listener, port) = silent_server().await;
        let _accept = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
            drop(socket);
        });

        let client = ReqwestHttpClient::with_timeout(Duration::from_millis(200)).unwrap();
        let request = HttpRequest::new(HttpMethod::Get, format!("http://127.0.0.1:{}/", port));

        let result = client.execute(request).await;
        assert!(matches!(result, Err(BridgeError::Transport(msg)) if msg.contains("timed out")));
    }

    #[tokio::test]
    async fn test_default_client_waits_on_stalled_request() {
        let (listener, port) = silent_server().await;
        let _accept = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
            drop(socket);
        });

        let client = ReqwestHttpClient::new().unwrap();
        let request = HttpRequest::new(HttpMethod::Get, format!("http://127.0.0.1:{}/", port));

        let outcome =
            tokio::time::timeout(Duration::from_millis(500), client.execute(request)).await;
        assert!(outcome.is_err(), "request should still be pending");
    }
}
