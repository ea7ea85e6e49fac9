use std::sync::Mutex;

use async_trait::async_trait;

use super::{DispatchError, DispatchReceipt, EmailDispatcher, EmailMessage};

/// In-memory test double that keeps every message it is handed.
///
/// A dispatcher built with [`RecordingDispatcher::rejecting`] fails every send with
/// the given status instead.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    sent: Mutex<Vec<EmailMessage>>,
    reject_with: Option<(u16, serde_json::Value)>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(status: u16, details: serde_json::Value) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            reject_with: Some((status, details)),
        }
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        match self.sent.lock() {
            Ok(sent) => sent.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl EmailDispatcher for RecordingDispatcher {
    async fn dispatch(&self, message: EmailMessage) -> Result<DispatchReceipt, DispatchError> {
        if let Some((status, details)) = &self.reject_with {
            return Err(DispatchError::Rejected {
                status: *status,
                details: details.clone(),
            });
        }

        let mut sent = match self.sent.lock() {
            Ok(sent) => sent,
            Err(poisoned) => poisoned.into_inner(),
        };
        sent.push(message);

        Ok(DispatchReceipt {
            message_id: Some(format!("recorded-{}", sent.len())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::{EmailAddress, RenderedEmail};

    fn message() -> EmailMessage {
        EmailMessage::new(
            EmailAddress::parse("student@school.example").expect("valid"),
            RenderedEmail {
                subject: "Subject".to_string(),
                html: "<p>hi</p>".to_string(),
                text: "hi".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn keeps_messages_in_order() {
        let dispatcher = RecordingDispatcher::new();
        let first = dispatcher.dispatch(message()).await.expect("recorded");
        let second = dispatcher.dispatch(message()).await.expect("recorded");

        assert_eq!(first.message_id.as_deref(), Some("recorded-1"));
        assert_eq!(second.message_id.as_deref(), Some("recorded-2"));
        assert_eq!(dispatcher.sent().len(), 2);
        assert_eq!(dispatcher.sent()[0].to_name, "student");
    }

    #[tokio::test]
    async fn rejecting_dispatcher_records_nothing() {
        let dispatcher = RecordingDispatcher::rejecting(422, serde_json::json!({"message": "no"}));
        let err = dispatcher.dispatch(message()).await.expect_err("rejected");

        assert!(matches!(err, DispatchError::Rejected { status: 422, .. }));
        assert!(dispatcher.sent().is_empty());
    }
}
