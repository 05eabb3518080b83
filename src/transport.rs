//! Pluggable HTTP transport.
//!
//! The client never talks to the network directly. It hands a fully formed
//! [`HttpRequest`] to a [`Transport`] and classifies whatever
//! [`HttpResponse`] comes back. Swapping the transport redirects traffic,
//! injects timeouts, or replaces the network entirely in tests.

use crate::error::TransportError;
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use std::fmt::Debug;
use std::time::Duration;

/// An HTTP request described as plain data.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute URL, without the query string.
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Executes one HTTP exchange.
///
/// Implementations must return `Ok` for every response that was received,
/// whatever its status; classification is the client's job. `Err` is
/// reserved for exchanges that never completed.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    /// Send `request` and read the full response.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Default transport backed by [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a builder for configuring the transport.
    pub fn builder() -> ReqwestTransportBuilder {
        ReqwestTransportBuilder::new()
    }

    /// Wrap an already configured `reqwest` client.
    pub fn from_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self
            .http
            .request(request.method, &request.url)
            .headers(request.headers);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Builder for configuring a [`ReqwestTransport`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransportBuilder {
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    proxy: Option<String>,
    danger_accept_invalid_certs: bool,
    user_agent: Option<String>,
}

impl ReqwestTransportBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults:
    /// - No timeout
    /// - No proxy
    /// - `danger_accept_invalid_certs = false`
    /// - reqwest's default user agent
    pub fn new() -> Self {
        Self::default()
    }

    /// Total time allowed for one exchange, including reading the body.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Time allowed for establishing the connection.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Route all traffic through a proxy (e.g., "http://127.0.0.1:8080").
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Control whether to accept invalid TLS certificates (default: false).
    pub fn danger_accept_invalid_certs(mut self, value: bool) -> Self {
        self.danger_accept_invalid_certs = value;
        self
    }

    /// Override the user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the transport.
    ///
    /// # Errors
    /// Fails if the proxy URL is invalid or the TLS backend cannot be
    /// initialized.
    pub fn build(self) -> Result<ReqwestTransport, TransportError> {
        let mut builder = reqwest::Client::builder()
            .danger_accept_invalid_certs(self.danger_accept_invalid_certs);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }

        if let Some(proxy_url) = &self.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        Ok(ReqwestTransport {
            http: builder.build()?,
        })
    }
}
