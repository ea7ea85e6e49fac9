//! Outbound email: address validation, result rendering and delivery.

mod address;
mod mailersend;
mod recording;
mod template;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

pub use address::{EmailAddress, InvalidEmailAddress};
pub use mailersend::MailerSendClient;
pub use recording::RecordingDispatcher;
pub use template::{render_recommendation_email, RenderedEmail, RECOMMENDATION_SUBJECT};

/// One message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: EmailAddress,
    pub to_name: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

impl EmailMessage {
    /// Addresses `rendered` to `to`, naming the recipient after the address's local part.
    pub fn new(to: EmailAddress, rendered: RenderedEmail) -> Self {
        let to_name = to.local_part().to_string();
        Self {
            to,
            to_name,
            subject: rendered.subject,
            html: rendered.html,
            text: rendered.text,
        }
    }
}

/// Acknowledgement from the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DispatchReceipt {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
}

#[derive(Debug, Error)]
pub enum DispatchError {
    /// The provider answered with a non-success status.
    #[error("provider rejected the message (HTTP {status})")]
    Rejected {
        status: u16,
        details: serde_json::Value,
    },

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("network error: {0}")]
    Transport(String),

    #[error("invalid client configuration: {0}")]
    Client(String),
}

/// Delivery backend for rendered messages.
#[async_trait]
pub trait EmailDispatcher: Send + Sync {
    async fn dispatch(&self, message: EmailMessage) -> Result<DispatchReceipt, DispatchError>;
}
