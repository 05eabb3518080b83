//! Request dispatch and response classification.
//!
//! Every API call funnels through [`Client::do_request`]: build the request
//! from [`Parameters`] and the client's credentials, run it through the
//! transport, then turn the response into exactly one outcome.
//!
//! Only `422 Unprocessable Entity` is eligible for the structured
//! [`ApiError`] decode. Postmark reserves that shape for validation-style
//! rejections, so auth failures and server errors always surface as
//! [`HttpError`] even if their body happens to look similar.

use crate::error::{ApiError, HttpError};
use crate::transport::{HttpRequest, HttpResponse};
use crate::{Client, Error, Parameters, Result};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;

/// Header carrying the account-level token.
pub const ACCOUNT_TOKEN_HEADER: &str = "X-Postmark-Account-Token";
/// Header carrying the server-level token.
pub const SERVER_TOKEN_HEADER: &str = "X-Postmark-Server-Token";

const JSON: &str = "application/json";

impl Client {
    /// Perform one request/response cycle and decode a successful body into `T`.
    ///
    /// # Errors
    /// - [`Error::Transport`] if no response was received
    /// - [`Error::Api`] for a 422 whose body is `{"ErrorCode", "Message"}`
    /// - [`Error::Http`] for any other non-2xx status
    /// - [`Error::Decode`] if a 2xx body does not match `T`
    ///
    /// # Examples
    /// ```no_run
    /// # use postmark_client::{Client, Parameters};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), postmark_client::Error> {
    /// let client = Client::new("", "server-token");
    /// let server: serde_json::Value = client.do_request(&Parameters::get("server")).await?;
    /// println!("{}", server["Name"]);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn do_request<T: DeserializeOwned>(&self, params: &Parameters) -> Result<T> {
        let response = self.dispatch(params).await?;
        decode(&response)
    }

    /// Like [`Client::do_request`] but discards the success body.
    pub async fn send(&self, params: &Parameters) -> Result<()> {
        self.dispatch(params).await.map(|_| ())
    }

    /// Execute `params` and return the classified raw response.
    async fn dispatch(&self, params: &Parameters) -> Result<HttpResponse> {
        let request = self.build_request(params)?;

        tracing::debug!(method = %request.method, url = %request.url, "dispatching request");

        let response = self.transport.execute(request).await?;

        tracing::debug!(status = response.status.as_u16(), "received response");

        classify(response)
    }

    fn build_request(&self, params: &Parameters) -> Result<HttpRequest> {
        Ok(HttpRequest {
            method: params.method.clone(),
            url: join_url(&self.base_url, &params.path),
            query: params.query.clone(),
            headers: self.headers(params)?,
            body: params.payload.clone(),
        })
    }

    /// Default headers followed by the per-call ones.
    fn headers(&self, params: &Parameters) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
        headers.insert(
            HeaderName::from_static("x-postmark-account-token"),
            token_value(ACCOUNT_TOKEN_HEADER, self.account_token())?,
        );
        headers.insert(
            HeaderName::from_static("x-postmark-server-token"),
            token_value(SERVER_TOKEN_HEADER, self.server_token())?,
        );

        for (name, value) in &params.headers {
            headers.insert(name.clone(), value.clone());
        }

        Ok(headers)
    }
}

fn token_value(name: &str, token: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(token).map_err(|_| Error::InvalidHeader {
        name: name.to_string(),
    })?;
    value.set_sensitive(true);
    Ok(value)
}

fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Map a raw response to success or to the matching error variant.
///
/// Returns the response unchanged for any 2xx status.
pub fn classify(response: HttpResponse) -> Result<HttpResponse> {
    let status = response.status;

    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::UNPROCESSABLE_ENTITY {
        match serde_json::from_slice::<ApiError>(&response.body) {
            Ok(api_error) => return Err(Error::Api(api_error)),
            Err(err) => {
                tracing::debug!("422 body is not a structured API error: {}", err);
            }
        }
    }

    Err(Error::Http(HttpError {
        status_code: status.as_u16(),
        body: response.text(),
    }))
}

/// Deserialize a successful response body into `T`.
///
/// An empty body is read as JSON `null`, so `()` and `Option<_>` targets
/// accept bodiless responses.
pub fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T> {
    let body: &[u8] = if response.body.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        &response.body
    };

    serde_json::from_slice(body).map_err(|err| {
        tracing::warn!("Http response decode error: {}", err);
        Error::Decode(err)
    })
}
