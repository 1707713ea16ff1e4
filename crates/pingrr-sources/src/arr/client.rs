use async_trait::async_trait;
use pingrr_models::MediaKind;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;
use tracing::debug;
use crate::arr::payload::{AddRequest, AddResponse, CommandRequest};
use crate::error::{check_status, SourceError};
use crate::traits::LibraryService;

/// One entry of `GET /api/v3/series` or `GET /api/v3/movie`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LibraryEntry {
    #[serde(default)]
    tvdb_id: Option<u32>,
    #[serde(default)]
    tmdb_id: Option<u32>,
}

/// HTTP client for the Sonarr/Radarr v3 API
///
/// Both services share the same conventions (`X-Api-Key` header, `/api/v3`
/// prefix, `command` endpoint); only the library endpoint and the id field
/// differ.
pub struct ArrClient {
    client: Client,
    base_url: String,
    api_key: String,
    service: &'static str,
    kind: MediaKind,
}

impl ArrClient {
    pub fn sonarr(host: &str, api_key: &str, timeout: Duration) -> Result<Self, SourceError> {
        Self::new("sonarr", MediaKind::Show, host, api_key, timeout)
    }

    pub fn radarr(host: &str, api_key: &str, timeout: Duration) -> Result<Self, SourceError> {
        Self::new("radarr", MediaKind::Movie, host, api_key, timeout)
    }

    fn new(
        service: &'static str,
        kind: MediaKind,
        host: &str,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pingrr/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SourceError::from_reqwest(service, e))?;

        Ok(Self {
            client,
            base_url: host.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            service,
            kind,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v3/{}", self.base_url, path)
    }

    fn library_endpoint(&self) -> &'static str {
        match self.kind {
            MediaKind::Show => "series",
            MediaKind::Movie => "movie",
        }
    }
}

/// Pull the identifiers relevant to `kind` out of a library listing
fn library_ids(kind: MediaKind, entries: Vec<LibraryEntry>) -> HashSet<u32> {
    entries
        .into_iter()
        .filter_map(|entry| match kind {
            MediaKind::Show => entry.tvdb_id,
            MediaKind::Movie => entry.tmdb_id,
        })
        .filter(|id| *id != 0)
        .collect()
}

#[async_trait]
impl LibraryService for ArrClient {
    fn service_name(&self) -> &str {
        self.service
    }

    fn media_kind(&self) -> MediaKind {
        self.kind
    }

    async fn get_library(&self) -> Result<HashSet<u32>, SourceError> {
        let response = self
            .client
            .get(self.url(self.library_endpoint()))
            .header("X-Api-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| SourceError::from_reqwest(self.service, e))?;
        let response = check_status(self.service, response).await?;

        let entries: Vec<LibraryEntry> = response
            .json()
            .await
            .map_err(|e| SourceError::from_reqwest(self.service, e))?;
        let ids = library_ids(self.kind, entries);
        debug!(service = self.service, count = ids.len(), "Fetched library");
        Ok(ids)
    }

    async fn add(&self, request: &AddRequest) -> Result<AddResponse, SourceError> {
        let response = self
            .client
            .post(self.url(request.endpoint()))
            .header("X-Api-Key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| SourceError::from_reqwest(self.service, e))?;
        let response = check_status(self.service, response).await?;

        response
            .json()
            .await
            .map_err(|e| SourceError::from_reqwest(self.service, e))
    }

    async fn command(&self, command: &CommandRequest) -> Result<(), SourceError> {
        let response = self
            .client
            .post(self.url("command"))
            .header("X-Api-Key", &self.api_key)
            .json(command)
            .send()
            .await
            .map_err(|e| SourceError::from_reqwest(self.service, e))?;
        check_status(self.service, response).await?;
        Ok(())
    }
}
