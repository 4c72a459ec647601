use async_trait::async_trait;

use crate::application::ports::mailer::{EmailMessage, Mailer};

/// Delivers mail through a transactional-email HTTP API
/// (JSON POST with an optional bearer token).
pub struct HttpApiMailer {
    client: reqwest::Client,
    endpoint: String,
    api_token: Option<String>,
    from: String,
}

impl HttpApiMailer {
    pub fn new(endpoint: &str, api_token: Option<String>, from: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.to_string(),
            api_token,
            from: from.to_string(),
        }
    }
}

#[async_trait]
impl Mailer for HttpApiMailer {
    async fn send(&self, message: &EmailMessage) -> anyhow::Result<()> {
        let mut req = self.client.post(&self.endpoint).json(&serde_json::json!({
            "from": self.from,
            "to": message.to,
            "subject": message.subject,
            "text": message.body,
        }));
        if let Some(t) = &self.api_token {
            req = req.bearer_auth(t);
        }
        let resp = req
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("mail request failed: {e}"))?;
        if !resp.status().is_success() {
            anyhow::bail!("mail API returned status {}", resp.status());
        }
        Ok(())
    }
}

/// Used when no mail endpoint is configured; drops mail after logging it.
#[derive(Debug, Clone, Default)]
pub struct NoopMailer;

#[async_trait]
impl Mailer for NoopMailer {
    async fn send(&self, message: &EmailMessage) -> anyhow::Result<()> {
        tracing::debug!(to = %message.to, subject = %message.subject, "mail delivery disabled, dropping message");
        Ok(())
    }
}
