//! MailerSend email API client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, instrument, warn};

use super::{DispatchError, DispatchReceipt, EmailAddress, EmailDispatcher, EmailMessage};
use crate::config::MailConfig;

const MESSAGE_ID_HEADER: &str = "x-message-id";

/// Sends messages through `POST {base_url}/v1/email`.
pub struct MailerSendClient {
    api_key: String,
    from: EmailAddress,
    from_name: String,
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl MailerSendClient {
    pub fn new(
        api_key: &str,
        from: EmailAddress,
        from_name: &str,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, DispatchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DispatchError::Client(e.to_string()))?;

        Ok(Self {
            api_key: api_key.to_string(),
            from,
            from_name: from_name.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            client,
        })
    }

    pub fn from_config(config: &MailConfig) -> Result<Self, DispatchError> {
        Self::new(
            &config.api_key,
            config.from_email.clone(),
            &config.from_name,
            &config.base_url,
            config.timeout,
        )
    }
}

#[derive(Serialize)]
struct Recipient<'a> {
    email: &'a str,
    name: &'a str,
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: Recipient<'a>,
    to: Vec<Recipient<'a>>,
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

#[async_trait]
impl EmailDispatcher for MailerSendClient {
    #[instrument(skip(self, message), fields(recipient_domain = %message.to.domain()))]
    async fn dispatch(&self, message: EmailMessage) -> Result<DispatchReceipt, DispatchError> {
        let body = SendEmailRequest {
            from: Recipient {
                email: self.from.as_str(),
                name: &self.from_name,
            },
            to: vec![Recipient {
                email: message.to.as_str(),
                name: &message.to_name,
            }],
            subject: &message.subject,
            html: &message.html,
            text: &message.text,
        };

        let response = self
            .client
            .post(format!("{}/v1/email", self.base_url))
            .bearer_auth(&self.api_key)
            .header("X-Requested-With", "XMLHttpRequest")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DispatchError::Timeout(self.timeout.as_secs())
                } else {
                    DispatchError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let details = serde_json::from_str::<serde_json::Value>(&raw)
                .unwrap_or(serde_json::Value::String(raw));
            warn!(status = status.as_u16(), "mailersend rejected message");
            return Err(DispatchError::Rejected {
                status: status.as_u16(),
                details,
            });
        }

        let message_id = response
            .headers()
            .get(MESSAGE_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        info!(
            status = status.as_u16(),
            message_id = message_id.as_deref().unwrap_or("-"),
            "email accepted by mailersend"
        );

        Ok(DispatchReceipt { message_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::RenderedEmail;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(base_url: &str) -> MailerSendClient {
        MailerSendClient::new(
            "test-key",
            EmailAddress::parse("advisor@school.example").unwrap(),
            "IB Math Advisor",
            base_url,
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn message() -> EmailMessage {
        EmailMessage::new(
            EmailAddress::parse("jane.doe@student.example").unwrap(),
            RenderedEmail {
                subject: "Your IB Math Course Recommendation".to_string(),
                html: "<p>AA HL</p>".to_string(),
                text: "AA HL".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn successful_send_returns_message_id() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/email"))
            .and(header("authorization", "Bearer test-key"))
            .and(header("x-requested-with", "XMLHttpRequest"))
            .and(body_partial_json(serde_json::json!({
                "from": {"email": "advisor@school.example", "name": "IB Math Advisor"},
                "to": [{"email": "jane.doe@student.example", "name": "jane.doe"}],
                "subject": "Your IB Math Course Recommendation",
                "html": "<p>AA HL</p>",
                "text": "AA HL"
            })))
            .respond_with(ResponseTemplate::new(202).insert_header("X-Message-Id", "msg-123"))
            .expect(1)
            .mount(&server)
            .await;

        let receipt = client(&server.uri()).dispatch(message()).await.unwrap();
        assert_eq!(receipt.message_id.as_deref(), Some("msg-123"));
    }

    #[tokio::test]
    async fn trailing_slash_in_base_url_is_ignored() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/email"))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        let receipt = client(&format!("{}/", server.uri()))
            .dispatch(message())
            .await
            .unwrap();
        assert_eq!(receipt.message_id, None);
    }

    #[tokio::test]
    async fn rejection_carries_status_and_json_details() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({
            "message": "The to.0.email must be a valid email address.",
            "errors": {"to.0.email": ["The to.0.email must be a valid email address."]}
        });
        Mock::given(method("POST"))
            .and(path("/v1/email"))
            .respond_with(ResponseTemplate::new(422).set_body_json(&error_body))
            .mount(&server)
            .await;

        let err = client(&server.uri()).dispatch(message()).await.unwrap_err();
        match err {
            DispatchError::Rejected { status, details } => {
                assert_eq!(status, 422);
                assert_eq!(details, error_body);
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_error_body_is_kept_as_text() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/email"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Unauthenticated."))
            .mount(&server)
            .await;

        let err = client(&server.uri()).dispatch(message()).await.unwrap_err();
        assert!(err.to_string().contains("HTTP 401"));
        match err {
            DispatchError::Rejected { status, details } => {
                assert_eq!(status, 401);
                assert_eq!(details, serde_json::json!("Unauthenticated."));
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_provider_is_a_transport_error() {
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let err = client(&uri).dispatch(message()).await.unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Transport(_) | DispatchError::Timeout(_)
        ));
    }
}
