// src/services/notify.rs

//! Qmsg push notification delivery.
//!
//! Sends the run summary to the user's phone via the Qmsg relay. Disabled
//! when no key is configured; delivery failures are the caller's to log
//! and never abort a run.

use reqwest::Client;

use crate::error::Result;
use crate::models::Config;
use crate::utils::http;

const QMSG_ENDPOINT: &str = "https://qmsg.zendee.cn/send";

/// Qmsg push client.
pub struct Notifier {
    client: Client,
    key: String,
}

impl Notifier {
    /// Create a new notifier from the application configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: http::create_client(&config.portal)?,
            key: config.user.qmsg_key.clone(),
        })
    }

    /// Whether a push key is configured.
    pub fn is_enabled(&self) -> bool {
        !self.key.is_empty()
    }

    /// Send a push message. A no-op when no key is configured.
    pub async fn send(&self, text: &str) -> Result<()> {
        if !self.is_enabled() {
            log::debug!("No push key configured; skipping notification");
            return Ok(());
        }

        self.client
            .post(push_url(&self.key))
            .form(&[("msg", text)])
            .send()
            .await?
            .error_for_status()?;

        log::info!("Push notification sent");
        Ok(())
    }
}

fn push_url(key: &str) -> String {
    format!("{QMSG_ENDPOINT}/{key}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_url_embeds_key() {
        assert_eq!(push_url("abc123"), "https://qmsg.zendee.cn/send/abc123");
    }

    #[tokio::test]
    async fn send_without_key_is_a_noop() {
        let notifier = Notifier {
            client: Client::new(),
            key: String::new(),
        };
        assert!(!notifier.is_enabled());
        // No key, no request; must succeed without touching the network.
        assert!(notifier.send("summary").await.is_ok());
    }
}
