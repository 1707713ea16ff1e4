use pingrr_config::{NotificationConfig, NotifyField};
use pingrr_models::{CandidateRecord, RunResult};
use pingrr_sources::NotificationChannel;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

const NOTIFICATION_TITLE: &str = "Pingrr";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    pub title: String,
    pub body: String,
    /// Body contains HTML and must be sent with `html=1`
    pub html: bool,
}

/// Build the summary for one pass, or `None` when nothing was added
pub fn build_message(result: &RunResult, service: &str, fields: &[NotifyField]) -> Option<NotificationMessage> {
    let added: Vec<&CandidateRecord> = result.added().collect();
    if added.is_empty() {
        return None;
    }

    let mut lines = Vec::with_capacity(added.len() + 1);
    lines.push(format!(
        "{} of {} {} added to {}",
        added.len(),
        result.attempted(),
        result.media_kind.plural(),
        service
    ));
    lines.extend(added.iter().map(|candidate| item_line(candidate, fields)));

    Some(NotificationMessage {
        title: NOTIFICATION_TITLE.to_string(),
        body: lines.join("\n"),
        html: fields.contains(&NotifyField::Link),
    })
}

fn item_line(candidate: &CandidateRecord, fields: &[NotifyField]) -> String {
    if fields.is_empty() {
        return candidate.title.clone();
    }

    fields
        .iter()
        .filter_map(|field| match field {
            NotifyField::Title => Some(candidate.title.clone()),
            NotifyField::Link => Some(match candidate.link() {
                Some(link) => format!(
                    "<a href=\"{}\">{}</a>",
                    escape_html(&link),
                    escape_html(&candidate.title)
                ),
                None => escape_html(&candidate.title),
            }),
            NotifyField::Year => Some(candidate.year.to_string()),
            NotifyField::Genres if candidate.genres.is_empty() => None,
            NotifyField::Genres => Some(
                candidate
                    .genres
                    .iter()
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            NotifyField::Rating => Some(format!("{:.1}", candidate.rating)),
            NotifyField::Network => candidate.network.clone(),
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Sends pass summaries when notifications are enabled
pub struct Notifier<'a> {
    channel: Option<&'a dyn NotificationChannel>,
    config: &'a NotificationConfig,
}

impl<'a> Notifier<'a> {
    pub fn new(channel: Option<&'a dyn NotificationChannel>, config: &'a NotificationConfig) -> Self {
        Self { channel, config }
    }

    /// Returns true when a message was delivered
    ///
    /// Send failures are logged and swallowed.
    pub async fn notify(&self, service: &str, result: &RunResult) -> bool {
        if !self.config.enabled {
            debug!(kind = %result.media_kind, "Notifications disabled");
            return false;
        }
        let Some(channel) = self.channel else {
            debug!(kind = %result.media_kind, "No notification channel configured");
            return false;
        };
        let Some(message) = build_message(result, service, &self.config.item_fields) else {
            debug!(kind = %result.media_kind, "Nothing added, skipping notification");
            return false;
        };

        let mut attributes = BTreeMap::new();
        attributes.insert("title".to_string(), message.title.clone());
        if message.html {
            attributes.insert("html".to_string(), "1".to_string());
        }

        match channel.send(&message.body, &attributes).await {
            Ok(()) => {
                info!(
                    operation = "notify",
                    channel = channel.channel_name(),
                    kind = %result.media_kind,
                    added = result.added_count(),
                    "Sent notification"
                );
                true
            }
            Err(e) => {
                warn!(
                    operation = "notify",
                    channel = channel.channel_name(),
                    kind = %result.media_kind,
                    error = %e,
                    "Failed to send notification"
                );
                false
            }
        }
    }
}
