use pingrr_config::{Config, FilterConfig, NotificationConfig, TraktConfig};
use pingrr_models::{LibrarySnapshot, MediaKind, RunResult};
use pingrr_sources::{
    build_candidate_source, build_notification_channel, build_radarr, build_sonarr, CandidateSource,
    LibraryService, NotificationChannel, SourceError,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};
use crate::dispatch::{DispatchSettings, Dispatcher};
use crate::error::{PassError, Stage};
use crate::filter::{FilterPipeline, FilterStats};
use crate::notify::Notifier;

/// What happened during one completed media-kind pass
#[derive(Debug, Clone, Serialize)]
pub struct PassReport {
    pub kind: MediaKind,
    pub service: String,
    pub snapshot_size: usize,
    pub filter: FilterStats,
    pub result: RunResult,
    pub notified: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PassStatus {
    Completed(PassReport),
    Failed {
        stage: String,
        error: String,
        unavailable: bool,
    },
    Skipped {
        reason: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct PassSummary {
    pub kind: MediaKind,
    pub status: PassStatus,
}

impl PassSummary {
    pub fn report(&self) -> Option<&PassReport> {
        match &self.status {
            PassStatus::Completed(report) => Some(report),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, PassStatus::Failed { .. })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub passes: Vec<PassSummary>,
    pub dry_run: bool,
    pub duration_ms: u64,
}

impl RunSummary {
    pub fn total_added(&self) -> usize {
        self.reports().map(|r| r.result.added_count()).sum()
    }

    pub fn total_failed(&self) -> usize {
        self.reports().map(|r| r.result.failed().count()).sum()
    }

    pub fn failed_passes(&self) -> usize {
        self.passes.iter().filter(|p| p.is_failed()).count()
    }

    pub fn reports(&self) -> impl Iterator<Item = &PassReport> {
        self.passes.iter().filter_map(PassSummary::report)
    }
}

struct PassTarget {
    service: Arc<dyn LibraryService>,
    settings: DispatchSettings,
}

/// Runs the show pass and then the movie pass
///
/// Each pass takes a fresh library snapshot, fetches and filters candidates,
/// dispatches the accepted ones and sends a summary. Passes share no state;
/// a failure in one is logged and never stops the other.
pub struct Orchestrator {
    source: Arc<dyn CandidateSource>,
    trakt: TraktConfig,
    filters: FilterConfig,
    notifications: NotificationConfig,
    shows: Option<PassTarget>,
    movies: Option<PassTarget>,
    channel: Option<Arc<dyn NotificationChannel>>,
    dry_run: bool,
}

impl Orchestrator {
    pub fn new(source: Arc<dyn CandidateSource>, config: &Config) -> Self {
        Self {
            source,
            trakt: config.trakt.clone(),
            filters: config.filters.clone(),
            notifications: config.notifications.clone(),
            shows: None,
            movies: None,
            channel: None,
            dry_run: config.pingrr.dry_run,
        }
    }

    /// Wire up the real Trakt, Sonarr, Radarr and Pushover clients
    pub fn from_config(config: &Config) -> Result<Self, SourceError> {
        let mut orchestrator = Self::new(build_candidate_source(config)?, config);

        if let (Some(service), Some(sonarr)) = (build_sonarr(config)?, config.sonarr_enabled()) {
            orchestrator = orchestrator.with_target(service, DispatchSettings::Series(sonarr.clone()));
        }
        if let (Some(service), Some(radarr)) = (build_radarr(config)?, config.radarr_enabled()) {
            orchestrator = orchestrator.with_target(service, DispatchSettings::Movie(radarr.clone()));
        }
        if let Some(channel) = build_notification_channel(config)? {
            orchestrator = orchestrator.with_notifications(channel);
        }

        Ok(orchestrator)
    }

    /// Attach the service for the kind `settings` describes
    ///
    /// A service of the other kind is refused and that pass stays unconfigured.
    pub fn with_target(mut self, service: Arc<dyn LibraryService>, settings: DispatchSettings) -> Self {
        let kind = settings.media_kind();
        if service.media_kind() != kind {
            error!(
                service = service.service_name(),
                expected = %kind,
                actual = %service.media_kind(),
                "Refusing {} as the {} service",
                service.service_name(),
                kind
            );
            return self;
        }
        let target = Some(PassTarget { service, settings });
        match kind {
            MediaKind::Show => self.shows = target,
            MediaKind::Movie => self.movies = target,
        }
        self
    }

    pub fn with_notifications(mut self, channel: Arc<dyn NotificationChannel>) -> Self {
        self.channel = Some(channel);
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    fn target(&self, kind: MediaKind) -> Option<&PassTarget> {
        match kind {
            MediaKind::Show => self.shows.as_ref(),
            MediaKind::Movie => self.movies.as_ref(),
        }
    }

    /// One full run: shows, then movies
    pub async fn run(&self) -> RunSummary {
        let start = Instant::now();
        let started_at = Utc::now();
        info!(operation = "run_start", dry_run = self.dry_run, "Starting run");

        let mut passes = Vec::with_capacity(2);
        for kind in [MediaKind::Show, MediaKind::Movie] {
            passes.push(self.run_kind(kind).await);
        }

        let summary = RunSummary {
            started_at,
            passes,
            dry_run: self.dry_run,
            duration_ms: start.elapsed().as_millis() as u64,
        };
        info!(
            operation = "run_complete",
            added = summary.total_added(),
            failed = summary.total_failed(),
            failed_passes = summary.failed_passes(),
            duration_ms = summary.duration_ms,
            "Run complete"
        );
        summary
    }

    /// Run one pass and fold its outcome into a summary, logging failures
    pub async fn run_kind(&self, kind: MediaKind) -> PassSummary {
        let Some(target) = self.target(kind) else {
            info!(kind = %kind, "No service configured for {}, skipping", kind.plural());
            return PassSummary {
                kind,
                status: PassStatus::Skipped {
                    reason: format!("no service configured for {}", kind.plural()),
                },
            };
        };

        let status = match self.run_pass(target).await {
            Ok(report) => PassStatus::Completed(report),
            Err(e) => {
                if e.is_unavailable() {
                    warn!(
                        operation = "pass",
                        kind = %kind,
                        stage = %e.stage(),
                        error = %e,
                        "Upstream unavailable, skipping {} for this run",
                        kind.plural()
                    );
                } else {
                    error!(
                        operation = "pass",
                        kind = %kind,
                        stage = %e.stage(),
                        error = %e,
                        "{} pass failed",
                        kind
                    );
                }
                PassStatus::Failed {
                    stage: e.stage().to_string(),
                    error: e.to_string(),
                    unavailable: e.is_unavailable(),
                }
            }
        };

        PassSummary { kind, status }
    }

    async fn run_pass(&self, target: &PassTarget) -> Result<PassReport, PassError> {
        let kind = target.settings.media_kind();
        let service = target.service.service_name().to_string();
        info!(operation = "pass", kind = %kind, service = %service, "Starting {} pass", kind);

        let ids = target
            .service
            .get_library()
            .await
            .map_err(|e| PassError::at(Stage::LibrarySnapshot, e))?;
        let snapshot = LibrarySnapshot::new(ids);
        info!(kind = %kind, service = %service, held = snapshot.size(), "Loaded library snapshot");

        let pipeline = FilterPipeline::new(self.source.as_ref(), &self.trakt, &self.filters);
        let outcome = pipeline
            .filter(kind, &snapshot)
            .await
            .map_err(|e| PassError::at(Stage::CandidateFetch, e))?;

        let dispatcher = Dispatcher::new(target.service.as_ref(), &target.settings).with_dry_run(self.dry_run);
        let result = dispatcher.dispatch(outcome.accepted).await;

        let notifier = Notifier::new(self.channel.as_deref(), &self.notifications);
        let notified = notifier.notify(&service, &result).await;

        info!(
            operation = "pass",
            kind = %kind,
            service = %service,
            accepted = outcome.stats.accepted,
            added = result.added_count(),
            failed = result.failed().count(),
            "Finished {} pass",
            kind
        );

        Ok(PassReport {
            kind,
            service,
            snapshot_size: snapshot.size(),
            filter: outcome.stats,
            result,
            notified,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{raw_movie, raw_show, FakeChannel, FakeLibrary, FakeSource};
    use pingrr_config::{NotifyField, RadarrConfig, SonarrConfig, TraktLists};

    fn all_lists() -> TraktLists {
        TraktLists {
            trending: true,
            ..TraktLists::default()
        }
    }

    fn test_config() -> Config {
        let mut config = Config::default();
        config.trakt.tv_lists = all_lists();
        config.trakt.movie_lists = all_lists();
        config.notifications.enabled = true;
        config.notifications.item_fields = vec![NotifyField::Title];
        config
    }

    fn sonarr() -> DispatchSettings {
        DispatchSettings::Series(SonarrConfig {
            host: "http://sonarr:8989".to_string(),
            api_key: "key".to_string(),
            quality_profile: 1,
            root_path: "/tv".to_string(),
            monitored: true,
            search_missing_episodes: true,
            tags: Vec::new(),
            request_timeout_secs: 30,
        })
    }

    fn radarr() -> DispatchSettings {
        DispatchSettings::Movie(RadarrConfig {
            host: "http://radarr:7878".to_string(),
            api_key: "key".to_string(),
            quality_profile: 1,
            root_path: "/movies".to_string(),
            monitored: true,
            minimum_availability: "released".to_string(),
            search: true,
            tags: Vec::new(),
            request_timeout_secs: 30,
        })
    }

    fn unavailable() -> SourceError {
        SourceError::Unavailable {
            service: "sonarr",
            message: "connection refused".to_string(),
        }
    }

    fn added_ids(summary: &RunSummary, kind: MediaKind) -> Vec<u32> {
        summary
            .reports()
            .filter(|r| r.kind == kind)
            .flat_map(|r| r.result.added().map(|c| c.library_id))
            .collect()
    }

    #[tokio::test]
    async fn test_second_run_with_updated_snapshot_adds_nothing() {
        let source = Arc::new(
            FakeSource::new().with(MediaKind::Show, vec![raw_show("Show X", 100), raw_show("Show Y", 200)]),
        );
        let config = test_config();

        let first_library = Arc::new(FakeLibrary::new(MediaKind::Show));
        let first = Orchestrator::new(source.clone(), &config).with_target(first_library.clone(), sonarr());
        let summary = first.run().await;
        let added = added_ids(&summary, MediaKind::Show);
        assert_eq!(added, vec![100, 200]);

        let second_library = Arc::new(FakeLibrary::new(MediaKind::Show).holding(added));
        let second = Orchestrator::new(source, &config).with_target(second_library.clone(), sonarr());
        let summary = second.run().await;
        assert_eq!(summary.total_added(), 0);
        assert!(second_library.added_titles().is_empty());
        assert_eq!(summary.reports().next().map(|r| r.filter.already_held), Some(2));
    }

    #[tokio::test]
    async fn test_failed_show_pass_does_not_stop_movies() {
        let source = Arc::new(FakeSource::new().with(MediaKind::Movie, vec![raw_movie("Heat", Some(949))]));
        let shows = Arc::new(FakeLibrary::new(MediaKind::Show).failing_library(unavailable));
        let movies = Arc::new(FakeLibrary::new(MediaKind::Movie));
        let orchestrator = Orchestrator::new(source.clone(), &test_config())
            .with_target(shows.clone(), sonarr())
            .with_target(movies.clone(), radarr());

        let summary = orchestrator.run().await;
        assert_eq!(summary.failed_passes(), 1);
        match &summary.passes[0].status {
            PassStatus::Failed { stage, unavailable, .. } => {
                assert_eq!(stage, "library snapshot");
                assert!(*unavailable);
            }
            other => panic!("expected failed show pass, got {:?}", other),
        }
        assert!(shows.added_titles().is_empty());
        assert_eq!(movies.added_titles(), vec!["Heat".to_string()]);
        // The failed show pass never reached the candidate source
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn test_candidate_fetch_failure_adds_nothing() {
        let source = Arc::new(FakeSource::unavailable());
        let movies = Arc::new(FakeLibrary::new(MediaKind::Movie));
        let orchestrator = Orchestrator::new(source, &test_config()).with_target(movies.clone(), radarr());

        let summary = orchestrator.run().await;
        assert!(movies.added_titles().is_empty());
        match &summary.passes[1].status {
            PassStatus::Failed { stage, .. } => assert_eq!(stage, "candidate fetch"),
            other => panic!("expected failed movie pass, got {:?}", other),
        }
        // No show service configured
        assert!(matches!(summary.passes[0].status, PassStatus::Skipped { .. }));
    }

    #[tokio::test]
    async fn test_mismatched_service_kind_is_refused() {
        let source = Arc::new(FakeSource::new().with(MediaKind::Show, vec![raw_show("Show X", 100)]));
        let movies = Arc::new(FakeLibrary::new(MediaKind::Movie));
        let orchestrator = Orchestrator::new(source.clone(), &test_config()).with_target(movies.clone(), sonarr());

        let summary = orchestrator.run().await;
        assert!(matches!(summary.passes[0].status, PassStatus::Skipped { .. }));
        assert!(matches!(summary.passes[1].status, PassStatus::Skipped { .. }));
        assert_eq!(movies.request_count(), 0);
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn test_partial_failure_reflected_in_notification() {
        let source = Arc::new(FakeSource::new().with(
            MediaKind::Movie,
            vec![raw_movie("Heat", Some(949)), raw_movie("Ronin", Some(8195))],
        ));
        let movies = Arc::new(FakeLibrary::new(MediaKind::Movie).failing_add("Heat"));
        let channel = Arc::new(FakeChannel::new());
        let orchestrator = Orchestrator::new(source, &test_config())
            .with_target(movies, radarr())
            .with_notifications(channel.clone());

        let summary = orchestrator.run().await;
        assert_eq!(summary.total_added(), 1);
        assert_eq!(summary.total_failed(), 1);
        assert_eq!(
            channel.messages(),
            vec!["1 of 2 movies added to radarr\nRonin".to_string()]
        );
    }

    #[tokio::test]
    async fn test_movie_without_tmdb_id_is_never_dispatched() {
        let source = Arc::new(FakeSource::new().with(
            MediaKind::Movie,
            vec![raw_movie("No Id", None), raw_movie("Heat", Some(949))],
        ));
        let movies = Arc::new(FakeLibrary::new(MediaKind::Movie));
        let orchestrator = Orchestrator::new(source, &test_config()).with_target(movies.clone(), radarr());

        let summary = orchestrator.run().await;
        assert_eq!(movies.added_titles(), vec!["Heat".to_string()]);
        assert_eq!(summary.reports().next().map(|r| r.filter.malformed), Some(1));
    }

    #[tokio::test]
    async fn test_dry_run_makes_no_service_writes() {
        let source = Arc::new(FakeSource::new().with(MediaKind::Show, vec![raw_show("Show X", 100)]));
        let shows = Arc::new(FakeLibrary::new(MediaKind::Show));
        let channel = Arc::new(FakeChannel::new());
        let orchestrator = Orchestrator::new(source, &test_config())
            .with_target(shows.clone(), sonarr())
            .with_notifications(channel)
            .with_dry_run(true);

        let summary = orchestrator.run().await;
        assert!(summary.dry_run);
        assert_eq!(summary.total_added(), 1);
        assert!(shows.added_titles().is_empty());
    }

    #[test]
    fn test_summary_serializes_with_status_tag() {
        let summary = PassSummary {
            kind: MediaKind::Movie,
            status: PassStatus::Skipped {
                reason: "no service configured for movies".to_string(),
            },
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["status"]["outcome"], "skipped");
        assert_eq!(value["kind"], "movie");
    }
}
