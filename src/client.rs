//! Postmark async client implementation.

use crate::Result;
use crate::transport::{ReqwestTransport, Transport};
use std::fmt;
use std::time::Duration;

/// Default Postmark API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.postmarkapp.com";

/// Async client for the Postmark transactional email API.
///
/// Holds the base URL, the account/server token pair and the transport used
/// to execute requests. It carries no per-call state, so a single instance
/// can be shared across tasks (wrap it in an `Arc`).
///
/// `base_url` and `transport` are public so traffic can be redirected, for
/// instance to a local stand-in server in tests.
pub struct Client {
    /// API root that request paths are joined onto.
    pub base_url: String,
    /// Executes the HTTP exchanges.
    pub transport: Box<dyn Transport>,
    account_token: String,
    server_token: String,
}

impl Client {
    /// Create a builder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new client with the default endpoint and transport.
    ///
    /// Empty tokens are allowed, which is handy when pointing the client at a
    /// local test server.
    ///
    /// # Examples
    /// ```no_run
    /// # use postmark_client::Client;
    /// let client = Client::new("account-token", "server-token");
    /// assert_eq!(client.base_url, "https://api.postmarkapp.com");
    /// ```
    pub fn new(account_token: impl Into<String>, server_token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            transport: Box::new(ReqwestTransport::default()),
            account_token: account_token.into(),
            server_token: server_token.into(),
        }
    }

    /// Replace the transport.
    pub fn with_transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Box::new(transport);
        self
    }

    /// Replace the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub(crate) fn account_token(&self) -> &str {
        &self.account_token
    }

    pub(crate) fn server_token(&self) -> &str {
        &self.server_token
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("transport", &self.transport)
            .field("account_token", &"<redacted>")
            .field("server_token", &"<redacted>")
            .finish()
    }
}

/// Builder for configuring a Postmark client.
///
/// Start with [`Client::builder`] to override defaults.
#[derive(Default)]
pub struct ClientBuilder {
    account_token: String,
    server_token: String,
    base_url: Option<String>,
    transport: Option<Box<dyn Transport>>,
    timeout: Option<Duration>,
    proxy: Option<String>,
    danger_accept_invalid_certs: bool,
    user_agent: Option<String>,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults:
    /// - Empty account and server tokens
    /// - [`DEFAULT_BASE_URL`]
    /// - A [`ReqwestTransport`] without timeout or proxy
    pub fn new() -> Self {
        Self::default()
    }

    /// Account-level token, sent as `X-Postmark-Account-Token`.
    pub fn account_token(mut self, token: impl Into<String>) -> Self {
        self.account_token = token.into();
        self
    }

    /// Server-level token, sent as `X-Postmark-Server-Token`.
    pub fn server_token(mut self, token: impl Into<String>) -> Self {
        self.server_token = token.into();
        self
    }

    /// Override the API endpoint.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Use a custom transport.
    ///
    /// When set, `timeout`, `proxy`, `danger_accept_invalid_certs` and
    /// `user_agent` are ignored; configure the transport itself instead.
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Box::new(transport));
        self
    }

    /// Total time allowed per request on the default transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a proxy URL (e.g., "http://127.0.0.1:8080") on the default transport.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Control whether the default transport accepts invalid TLS certificates.
    pub fn danger_accept_invalid_certs(mut self, value: bool) -> Self {
        self.danger_accept_invalid_certs = value;
        self
    }

    /// Override the user agent of the default transport.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client.
    ///
    /// # Errors
    /// Returns [`Error::Transport`](crate::Error::Transport) if the default
    /// transport cannot be configured (e.g., an invalid proxy URL).
    ///
    /// # Examples
    /// ```no_run
    /// # use postmark_client::Client;
    /// # use std::time::Duration;
    /// # fn main() -> Result<(), postmark_client::Error> {
    /// let client = Client::builder()
    ///     .server_token("server-token")
    ///     .timeout(Duration::from_secs(10))
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(self) -> Result<Client> {
        let transport: Box<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => {
                let mut builder = ReqwestTransport::builder()
                    .danger_accept_invalid_certs(self.danger_accept_invalid_certs);
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                if let Some(proxy) = self.proxy {
                    builder = builder.proxy(proxy);
                }
                if let Some(user_agent) = self.user_agent {
                    builder = builder.user_agent(user_agent);
                }
                Box::new(builder.build()?)
            }
        };

        Ok(Client {
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            transport,
            account_token: self.account_token,
            server_token: self.server_token,
        })
    }
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("base_url", &self.base_url)
            .field("transport", &self.transport)
            .field("timeout", &self.timeout)
            .field("proxy", &self.proxy)
            .field("danger_accept_invalid_certs", &self.danger_accept_invalid_certs)
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn client_is_shareable() {
        assert_send_sync::<Client>();
    }

    #[test]
    fn new_uses_default_endpoint() {
        let client = Client::new("", "");
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
        assert_eq!(client.account_token(), "");
        assert_eq!(client.server_token(), "");
    }

    #[test]
    fn builder_overrides_defaults() {
        let client = Client::builder()
            .account_token("account")
            .server_token("server")
            .base_url("http://127.0.0.1:9000")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        assert_eq!(client.base_url, "http://127.0.0.1:9000");
        assert_eq!(client.account_token(), "account");
        assert_eq!(client.server_token(), "server");
    }

    #[test]
    fn builder_surfaces_transport_configuration_errors() {
        let err = Client::builder().proxy("http://[::1").build().unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn debug_redacts_tokens() {
        let client = Client::new("secret-account", "secret-server");
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("secret-account"));
        assert!(!rendered.contains("secret-server"));
        assert!(rendered.contains(DEFAULT_BASE_URL));
    }
}
