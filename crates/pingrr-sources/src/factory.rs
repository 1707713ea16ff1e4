//! Builds the concrete collaborators from configuration.

use pingrr_config::Config;
use std::sync::Arc;
use std::time::Duration;
use crate::arr::ArrClient;
use crate::error::SourceError;
use crate::pushover::PushoverClient;
use crate::traits::{CandidateSource, LibraryService, NotificationChannel};
use crate::trakt::TraktClient;

pub fn build_candidate_source(config: &Config) -> Result<Arc<dyn CandidateSource>, SourceError> {
    Ok(Arc::new(TraktClient::new(&config.trakt)?))
}

/// Sonarr client, or `None` when Sonarr has no api key configured
pub fn build_sonarr(config: &Config) -> Result<Option<Arc<dyn LibraryService>>, SourceError> {
    match config.sonarr_enabled() {
        Some(sonarr) => {
            let client = ArrClient::sonarr(
                &sonarr.host,
                &sonarr.api_key,
                Duration::from_secs(sonarr.request_timeout_secs),
            )?;
            Ok(Some(Arc::new(client)))
        }
        None => Ok(None),
    }
}

/// Radarr client, or `None` when Radarr has no api key configured
pub fn build_radarr(config: &Config) -> Result<Option<Arc<dyn LibraryService>>, SourceError> {
    match config.radarr_enabled() {
        Some(radarr) => {
            let client = ArrClient::radarr(
                &radarr.host,
                &radarr.api_key,
                Duration::from_secs(radarr.request_timeout_secs),
            )?;
            Ok(Some(Arc::new(client)))
        }
        None => Ok(None),
    }
}

/// Notification channel, or `None` when notifications are disabled
pub fn build_notification_channel(config: &Config) -> Result<Option<Arc<dyn NotificationChannel>>, SourceError> {
    if !config.notifications.enabled {
        return Ok(None);
    }
    match &config.notifications.pushover {
        Some(pushover) => Ok(Some(Arc::new(PushoverClient::new(pushover)?))),
        None => Ok(None),
    }
}
