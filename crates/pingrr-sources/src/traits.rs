use async_trait::async_trait;
use pingrr_config::TraktList;
use pingrr_models::{MediaKind, RawCandidate};
use std::collections::{BTreeMap, HashSet};
use crate::arr::{AddRequest, AddResponse, CommandRequest};
use crate::error::SourceError;

/// Watch-list provider handing out candidate records
#[async_trait]
pub trait CandidateSource: Send + Sync {
    fn source_name(&self) -> &str;

    /// Fetch every entry of `lists` for `kind`, concatenated in list order
    async fn get_info(&self, kind: MediaKind, lists: &[TraktList]) -> Result<Vec<RawCandidate>, SourceError>;
}

/// Acquisition service managing the library for one media kind
#[async_trait]
pub trait LibraryService: Send + Sync {
    fn service_name(&self) -> &str;

    fn media_kind(&self) -> MediaKind;

    /// Identifiers (tvdb for shows, tmdb for movies) already in the library
    async fn get_library(&self) -> Result<HashSet<u32>, SourceError>;

    async fn add(&self, request: &AddRequest) -> Result<AddResponse, SourceError>;

    async fn command(&self, command: &CommandRequest) -> Result<(), SourceError>;
}

#[async_trait]
pub trait NotificationChannel: Send + Sync {
    fn channel_name(&self) -> &str;

    /// Deliver `message`; `attributes` are channel-specific extras (title, html, ...)
    async fn send(&self, message: &str, attributes: &BTreeMap<String, String>) -> Result<(), SourceError>;
}
