//! # Postmark Client
//! Asynchronous client for the Postmark transactional email HTTP API. Typed calls on [`Client`] become authenticated requests; responses come back as typed values or a small, matchable [`Error`] taxonomy.
//!
//! ## Audience and uses
//! For Rust services that send email through Postmark and want to branch on failures programmatically: configure with [`ClientBuilder`], send with [`Client::send_email`], or reach any endpoint through [`Client::do_request`] and [`Parameters`].
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime when using the default [`ReqwestTransport`]. Any other HTTP stack can be plugged in by implementing [`Transport`].
//!
//! ## Out of scope
//! No retries, backoff, or rate limiting: a failed call returns immediately and the caller owns any retry policy. Timeouts are a transport setting.
//!
//! ## Errors
//! A `422` whose body is `{"ErrorCode", "Message"}` becomes [`Error::Api`]. Every other non-2xx status becomes [`Error::Http`] with the status code and raw body. Failures before a response arrives are [`Error::Transport`], and a 2xx body that does not fit the requested type is [`Error::Decode`]. The crate-wide [`Result`] alias wraps these errors.
//!
//! ## Example
//! ```no_run
//! use postmark_client::{Client, Email, Error};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Error> {
//!     let client = Client::new("account-token", "server-token");
//!     let email = Email {
//!         from: "sender@example.com".into(),
//!         to: "receiver@example.com".into(),
//!         subject: "Hello".into(),
//!         text_body: Some("Hi there".into()),
//!         ..Default::default()
//!     };
//!
//!     match client.send_email(&email).await {
//!         Ok(sent) => println!("Sent: {}", sent.message_id),
//!         Err(Error::Api(api)) => println!("Rejected ({}): {}", api.error_code, api.message),
//!         Err(err) => return Err(err),
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod dispatch;
mod error;
mod models;
mod params;
mod transport;

pub use client::{Client, ClientBuilder, DEFAULT_BASE_URL};
pub use dispatch::{ACCOUNT_TOKEN_HEADER, SERVER_TOKEN_HEADER, classify, decode};
pub use error::{ApiError, Error, HttpError, TransportError};
pub use models::{Email, EmailResponse, Header};
pub use params::Parameters;
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, ReqwestTransportBuilder, Transport};

/// Result type alias for Postmark operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
