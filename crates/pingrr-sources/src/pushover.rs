use async_trait::async_trait;
use pingrr_config::PushoverConfig;
use reqwest::Client;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;
use crate::error::{check_status, SourceError};
use crate::traits::NotificationChannel;

const PUSHOVER_MESSAGES_URL: &str = "https://api.pushover.net/1/messages.json";

/// Pushover message limit; longer messages are rejected by the API
const MAX_MESSAGE_LEN: usize = 1024;

pub struct PushoverClient {
    client: Client,
    url: String,
    app_token: String,
    user_key: String,
}

impl PushoverClient {
    pub fn new(config: &PushoverConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| SourceError::from_reqwest("pushover", e))?;

        Ok(Self {
            client,
            url: PUSHOVER_MESSAGES_URL.to_string(),
            app_token: config.app_token.clone(),
            user_key: config.user_key.clone(),
        })
    }
}

/// Cut `message` to the Pushover limit on a character boundary
fn truncate_message(message: &str) -> &str {
    if message.len() <= MAX_MESSAGE_LEN {
        return message;
    }
    let mut end = MAX_MESSAGE_LEN;
    while !message.is_char_boundary(end) {
        end -= 1;
    }
    &message[..end]
}

#[async_trait]
impl NotificationChannel for PushoverClient {
    fn channel_name(&self) -> &str {
        "pushover"
    }

    async fn send(&self, message: &str, attributes: &BTreeMap<String, String>) -> Result<(), SourceError> {
        let mut form: Vec<(&str, &str)> = vec![
            ("token", self.app_token.as_str()),
            ("user", self.user_key.as_str()),
            ("message", truncate_message(message)),
        ];
        form.extend(attributes.iter().map(|(k, v)| (k.as_str(), v.as_str())));

        let response = self
            .client
            .post(&self.url)
            .form(&form)
            .send()
            .await
            .map_err(|e| SourceError::from_reqwest("pushover", e))?;
        check_status("pushover", response).await?;
        debug!(channel = "pushover", "Notification delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_message() {
        assert_eq!(truncate_message("short"), "short");

        let long = "é".repeat(MAX_MESSAGE_LEN);
        let truncated = truncate_message(&long);
        assert!(truncated.len() <= MAX_MESSAGE_LEN);
        assert!(truncated.chars().all(|c| c == 'é'));
    }
}
