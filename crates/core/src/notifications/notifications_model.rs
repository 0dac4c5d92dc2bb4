//! Email notification models.

use serde::{Deserialize, Serialize};

/// An outgoing email.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: Option<String>,
}

impl EmailMessage {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, html_body: String) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            html_body,
            text_body: None,
        }
    }

    pub fn with_text_body(mut self, body: String) -> Self {
        self.text_body = Some(body);
        self
    }
}

/// Outcome of a send attempt. Delivery problems are reported here rather
/// than as errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmailDelivery {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EmailDelivery {
    pub fn delivered(message_id: Option<String>) -> Self {
        Self {
            success: true,
            message_id,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message_id: None,
            error: Some(error.into()),
        }
    }
}

/// Connection settings for the email-delivery API.
#[derive(Debug, Clone, Default)]
pub struct EmailSettings {
    pub api_key: Option<String>,
    pub api_url: String,
    pub from: String,
}

/// Counters for one reminder run.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderRunReport {
    pub goal_reminders_sent: usize,
    pub weekly_summaries_sent: usize,
    pub failures: usize,
}
