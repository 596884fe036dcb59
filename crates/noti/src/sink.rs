use anyhow::{Context, Result};
use tracing::info;

use crate::env::WEBHOOK_URL_VAR;

/// What happened to a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// No webhook configured; nothing was sent.
    Skipped,
    Sent,
    Failed(String),
}

/// Best-effort Discord webhook delivery. Never fails the run.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    client: reqwest::Client,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Non-2xx responses count as [`Delivery::Failed`], same as transport errors.
    pub async fn notify(&self, webhook_url: &str, message: &str) -> Delivery {
        if webhook_url.is_empty() {
            eprintln!(
                "⚠️ Discord Webhook URL is not configured. To receive notifications, set \
                 config.discord_build_noti_url in package.json or define {WEBHOOK_URL_VAR} \
                 environment variable."
            );
            return Delivery::Skipped;
        }

        match self.post_discord(webhook_url, message.trim()).await {
            Ok(()) => {
                info!("Discord notification delivered");
                Delivery::Sent
            }
            Err(err) => {
                let reason = format!("{err:#}");
                eprintln!("Failed to send Discord notification: {reason}");
                Delivery::Failed(reason)
            }
        }
    }

    async fn post_discord(&self, webhook_url: &str, content: &str) -> Result<()> {
        let payload = serde_json::json!({ "content": content });
        self.client
            .post(webhook_url)
            .json(&payload)
            .send()
            .await
            .with_context(|| "Sending Discord webhook")?
            .error_for_status()
            .with_context(|| "Discord API error")?;
        Ok(())
    }
}
