//! Email delivery over a Resend-compatible HTTP API.

use async_trait::async_trait;
use log::{info, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::notifications_model::{EmailDelivery, EmailMessage, EmailSettings};
use super::notifications_traits::EmailSenderTrait;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    html: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: Option<String>,
}

pub struct ResendEmailSender {
    client: Client,
    settings: EmailSettings,
}

impl ResendEmailSender {
    pub fn new(settings: EmailSettings) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client, settings }
    }

    pub fn is_configured(&self) -> bool {
        self.settings
            .api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }

    fn endpoint(&self) -> String {
        format!("{}/emails", self.settings.api_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl EmailSenderTrait for ResendEmailSender {
    async fn send(&self, message: EmailMessage) -> EmailDelivery {
        let Some(api_key) = self.settings.api_key.as_deref().filter(|k| !k.trim().is_empty())
        else {
            warn!("Email API key not configured; skipping '{}'", message.subject);
            return EmailDelivery::failed("Email delivery is not configured");
        };

        let request = SendEmailRequest {
            from: &self.settings.from,
            to: vec![message.to.as_str()],
            subject: &message.subject,
            html: &message.html_body,
            text: message.text_body.as_deref(),
        };

        let response = match self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("Email request for '{}' failed: {}", message.subject, e);
                return EmailDelivery::failed(e.to_string());
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                "Email provider rejected '{}' with {}: {}",
                message.subject, status, body
            );
            return EmailDelivery::failed(format!("HTTP error: {status}"));
        }

        let id = match response.json::<SendEmailResponse>().await {
            Ok(parsed) => parsed.id,
            Err(e) => {
                warn!("Could not read email provider response: {}", e);
                None
            }
        };
        info!("Sent '{}' email", message.subject);
        EmailDelivery::delivered(id)
    }
}
