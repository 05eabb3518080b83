//! Email payloads and the endpoints that send them.

use crate::{Client, Parameters, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An outbound email.
///
/// Field names follow Postmark's wire format. Recipient fields take a
/// comma-separated list of addresses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Email {
    /// Sender address; must be a confirmed sender signature.
    pub from: String,
    /// Recipient addresses.
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bcc: Option<String>,
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    /// Custom headers added to the message.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<Header>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_opens: Option<bool>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

/// A custom email header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Header {
    pub name: String,
    pub value: String,
}

/// Result of submitting one email.
///
/// In a batch, each message gets its own entry; a non-zero `error_code`
/// means that particular message was rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EmailResponse {
    #[serde(default)]
    pub to: String,
    /// Submission timestamp as reported by the API.
    #[serde(default)]
    pub submitted_at: String,
    #[serde(rename = "MessageID", default)]
    pub message_id: String,
    pub error_code: i64,
    pub message: String,
}

impl Client {
    /// Send a single email.
    ///
    /// # Examples
    /// ```no_run
    /// # use postmark_client::{Client, Email};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), postmark_client::Error> {
    /// let client = Client::new("", "server-token");
    /// let email = Email {
    ///     from: "sender@example.com".into(),
    ///     to: "receiver@example.com".into(),
    ///     subject: "Hello".into(),
    ///     text_body: Some("Hi there".into()),
    ///     ..Default::default()
    /// };
    /// let sent = client.send_email(&email).await?;
    /// println!("{}", sent.message_id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn send_email(&self, email: &Email) -> Result<EmailResponse> {
        let params = Parameters::post("email").json(email)?;
        self.do_request(&params).await
    }

    /// Send up to 500 emails in one call.
    pub async fn send_email_batch(&self, emails: &[Email]) -> Result<Vec<EmailResponse>> {
        let params = Parameters::post("email/batch").json(emails)?;
        self.do_request(&params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_serializes_with_wire_names_and_skips_empty_fields() {
        let email = Email {
            from: "sender@example.com".to_string(),
            to: "receiver@example.com".to_string(),
            subject: "Hello".to_string(),
            html_body: Some("<b>Hi</b>".to_string()),
            headers: vec![Header {
                name: "X-Campaign".to_string(),
                value: "welcome".to_string(),
            }],
            ..Default::default()
        };

        let value = serde_json::to_value(&email).unwrap();
        assert_eq!(value["From"], "sender@example.com");
        assert_eq!(value["To"], "receiver@example.com");
        assert_eq!(value["HtmlBody"], "<b>Hi</b>");
        assert_eq!(value["Headers"][0]["Name"], "X-Campaign");
        assert!(value.get("Cc").is_none());
        assert!(value.get("TextBody").is_none());
        assert!(value.get("Metadata").is_none());
    }

    #[test]
    fn email_response_reads_message_id() {
        let response: EmailResponse = serde_json::from_str(
            r#"{
                "To": "receiver@example.com",
                "SubmittedAt": "2014-02-17T07:25:01.4178645-05:00",
                "MessageID": "0a129aee-e1cd-480d-b08d-4f48548ff48d",
                "ErrorCode": 0,
                "Message": "OK"
            }"#,
        )
        .unwrap();
        assert_eq!(response.message_id, "0a129aee-e1cd-480d-b08d-4f48548ff48d");
        assert_eq!(response.error_code, 0);
        assert_eq!(response.message, "OK");
    }
}
