use pingrr_config::{RadarrConfig, SonarrConfig};
use pingrr_models::{CandidateRecord, MediaKind, RunResult};
use pingrr_sources::{
    AddOptions, AddRequest, CommandRequest, LibraryService, MoviePayload, SeriesPayload, SourceError,
};
use thiserror::Error;
use tracing::{debug, error, info};

/// Static settings used to build add requests for one service
#[derive(Debug, Clone)]
pub enum DispatchSettings {
    Series(SonarrConfig),
    Movie(RadarrConfig),
}

impl DispatchSettings {
    pub fn media_kind(&self) -> MediaKind {
        match self {
            DispatchSettings::Series(_) => MediaKind::Show,
            DispatchSettings::Movie(_) => MediaKind::Movie,
        }
    }

    pub fn build_request(&self, candidate: &CandidateRecord) -> AddRequest {
        match self {
            DispatchSettings::Series(sonarr) => AddRequest::Series(SeriesPayload {
                tvdb_id: candidate.library_id,
                title: candidate.title.clone(),
                quality_profile_id: sonarr.quality_profile,
                images: Vec::new(),
                seasons: Vec::new(),
                season_folder: true,
                monitored: sonarr.monitored,
                root_folder_path: sonarr.root_path.clone(),
                add_options: AddOptions::Series {
                    ignore_episodes_with_files: false,
                    ignore_episodes_without_files: false,
                    search_for_missing_episodes: sonarr.search_missing_episodes,
                },
                tags: sonarr.tags.clone(),
            }),
            DispatchSettings::Movie(radarr) => AddRequest::Movie(MoviePayload {
                tmdb_id: candidate.library_id,
                title: candidate.title.clone(),
                quality_profile_id: radarr.quality_profile,
                images: Vec::new(),
                monitored: radarr.monitored,
                title_slug: candidate.title.clone(),
                root_folder_path: radarr.root_path.clone(),
                minimum_availability: radarr.minimum_availability.clone(),
                year: candidate.year,
                add_options: AddOptions::Movie {
                    search_for_movie: radarr.search,
                },
                tags: radarr.tags.clone(),
            }),
        }
    }
}

#[derive(Debug, Error)]
pub enum DispatchFailure {
    #[error("add request failed: {0}")]
    Add(#[source] SourceError),

    #[error("{service} did not return an id for the added movie")]
    MissingId { service: String },

    #[error("search trigger failed: {0}")]
    Search(#[source] SourceError),
}

/// Sends accepted candidates to an acquisition service one at a time
///
/// A failure for one item is logged and recorded in the [`RunResult`]; the
/// remaining items are still dispatched. Successful adds are not rolled back.
pub struct Dispatcher<'a> {
    service: &'a dyn LibraryService,
    settings: &'a DispatchSettings,
    dry_run: bool,
}

impl<'a> Dispatcher<'a> {
    pub fn new(service: &'a dyn LibraryService, settings: &'a DispatchSettings) -> Self {
        Self {
            service,
            settings,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub async fn dispatch(&self, accepted: Vec<CandidateRecord>) -> RunResult {
        let kind = self.settings.media_kind();
        let service = self.service.service_name();
        let mut result = RunResult::new(kind);

        for candidate in accepted {
            debug!(service, title = %candidate.title, id = candidate.library_id, "Sending media to {}", service);
            match self.dispatch_one(&candidate).await {
                Ok(()) => {
                    info!(
                        operation = "dispatch",
                        service,
                        title = %candidate.title,
                        id = candidate.library_id,
                        dry_run = self.dry_run,
                        "{} has been added to {}",
                        candidate.title,
                        service
                    );
                    result.record(candidate, true);
                }
                Err(e) => {
                    error!(
                        operation = "dispatch",
                        service,
                        title = %candidate.title,
                        id = candidate.library_id,
                        error = %e,
                        "Failed to send {} to {}",
                        candidate.title,
                        service
                    );
                    result.record(candidate, false);
                }
            }
        }

        result
    }

    async fn dispatch_one(&self, candidate: &CandidateRecord) -> Result<(), DispatchFailure> {
        let request = self.settings.build_request(candidate);

        if self.dry_run {
            info!(
                service = self.service.service_name(),
                title = %candidate.title,
                payload = %serde_json::to_string(&request).unwrap_or_default(),
                "Dry run is on, not sending to {}",
                self.service.service_name()
            );
            return Ok(());
        }

        let response = self.service.add(&request).await.map_err(DispatchFailure::Add)?;

        if let AddRequest::Movie(_) = request {
            let movie_id = response.id.ok_or_else(|| DispatchFailure::MissingId {
                service: self.service.service_name().to_string(),
            })?;
            self.service
                .command(&CommandRequest::movies_search(movie_id))
                .await
                .map_err(DispatchFailure::Search)?;
            debug!(service = self.service.service_name(), movie_id, "Triggered movie search");
        }

        Ok(())
    }
}
