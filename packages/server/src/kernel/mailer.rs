use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{error, info};

use super::traits::BaseMailer;

/// HTTP mail-relay client.
///
/// Posts plain-text messages to a relay endpoint (any service accepting a
/// `{to, subject, body}` JSON payload). Delivery guarantees are the relay's
/// concern.
pub struct MailApiClient {
    client: Client,
    api_url: String,
    api_token: Option<String>,
}

#[derive(Debug, Serialize)]
struct MailMessage<'a> {
    to: &'a str,
    subject: &'a str,
    body: &'a str,
}

impl MailApiClient {
    pub fn new(api_url: String, api_token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_token,
        }
    }
}

#[async_trait]
impl BaseMailer for MailApiClient {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        let message = MailMessage { to, subject, body };

        let mut request = self.client.post(&self.api_url).json(&message);

        if let Some(token) = &self.api_token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        info!("Sending mail to: {}", to);

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await?;
            error!("Mail relay failed {}: {}", status, body);
            anyhow::bail!("Mail relay error {}: {}", status, body);
        }

        Ok(())
    }
}

/// Mailer for environments without a relay configured: logs the message and
/// reports success.
pub struct LogMailer;

#[async_trait]
impl BaseMailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, _body: &str) -> Result<()> {
        info!("Mail relay not configured; would send '{}' to {}", subject, to);
        Ok(())
    }
}
