use pingrr_models::MediaKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pingrr: GeneralConfig,
    #[serde(default)]
    pub trakt: TraktConfig,
    #[serde(default)]
    pub sonarr: Option<SonarrConfig>,
    #[serde(default)]
    pub radarr: Option<RadarrConfig>,
    #[serde(default)]
    pub filters: FilterConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub scheduler: Option<SchedulerConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log what would be added without contacting Sonarr/Radarr
    #[serde(default)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraktConfig {
    #[serde(default)]
    pub client_id: String,
    /// Owner of the watchlist list (only needed when `watchlist` is enabled)
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default = "default_trakt_limit")]
    pub limit: u32,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub tv_lists: TraktLists,
    #[serde(default)]
    pub movie_lists: TraktLists,
}

impl Default for TraktConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            username: None,
            limit: default_trakt_limit(),
            request_timeout_secs: default_request_timeout_secs(),
            tv_lists: TraktLists::default(),
            movie_lists: TraktLists::default(),
        }
    }
}

impl TraktConfig {
    pub fn lists_for(&self, kind: MediaKind) -> &TraktLists {
        match kind {
            MediaKind::Movie => &self.movie_lists,
            MediaKind::Show => &self.tv_lists,
        }
    }
}

/// Which Trakt lists to pull candidates from
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TraktLists {
    #[serde(default)]
    pub trending: bool,
    #[serde(default)]
    pub popular: bool,
    #[serde(default)]
    pub anticipated: bool,
    #[serde(default)]
    pub watchlist: bool,
}

impl TraktLists {
    /// Enabled lists, in the order they are fetched
    pub fn enabled(&self) -> Vec<TraktList> {
        let mut lists = Vec::new();
        if self.trending {
            lists.push(TraktList::Trending);
        }
        if self.popular {
            lists.push(TraktList::Popular);
        }
        if self.anticipated {
            lists.push(TraktList::Anticipated);
        }
        if self.watchlist {
            lists.push(TraktList::Watchlist);
        }
        lists
    }

    pub fn any_enabled(&self) -> bool {
        self.trending || self.popular || self.anticipated || self.watchlist
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TraktList {
    Trending,
    Popular,
    Anticipated,
    Watchlist,
}

impl TraktList {
    pub fn name(&self) -> &'static str {
        match self {
            TraktList::Trending => "trending",
            TraktList::Popular => "popular",
            TraktList::Anticipated => "anticipated",
            TraktList::Watchlist => "watchlist",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SonarrConfig {
    pub host: String,
    #[serde(default)]
    pub api_key: String,
    pub quality_profile: u32,
    pub root_path: String,
    #[serde(default = "default_true")]
    pub monitored: bool,
    #[serde(default = "default_true")]
    pub search_missing_episodes: bool,
    #[serde(default)]
    pub tags: Vec<u32>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl SonarrConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadarrConfig {
    pub host: String,
    #[serde(default)]
    pub api_key: String,
    pub quality_profile: u32,
    pub root_path: String,
    #[serde(default = "default_true")]
    pub monitored: bool,
    #[serde(default = "default_minimum_availability")]
    pub minimum_availability: String,
    /// Ask Radarr to search as part of the add request
    #[serde(default = "default_true")]
    pub search: bool,
    #[serde(default)]
    pub tags: Vec<u32>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl RadarrConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default)]
    pub min_year: YearFilter,
    #[serde(default)]
    pub min_runtime: u32,
    #[serde(default)]
    pub min_votes: u64,
    #[serde(default)]
    pub min_rating: f64,
    #[serde(default = "default_true")]
    pub allow_ended: bool,
    #[serde(default = "default_true")]
    pub allow_canceled: bool,
    #[serde(default = "default_true")]
    pub allow_returning: bool,
    #[serde(default)]
    pub genre: GenreFilter,
    /// Networks whose shows are never added
    #[serde(default)]
    pub networks: Vec<String>,
    /// Allowed (lowercase) country codes for shows; empty allows all
    #[serde(default)]
    pub countries: Vec<String>,
    /// Allowed language codes; empty allows all
    #[serde(default)]
    pub languages: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_year: YearFilter::default(),
            min_runtime: 0,
            min_votes: 0,
            min_rating: 0.0,
            allow_ended: true,
            allow_canceled: true,
            allow_returning: true,
            genre: GenreFilter::default(),
            networks: Vec::new(),
            countries: Vec::new(),
            languages: Vec::new(),
        }
    }
}

impl FilterConfig {
    pub fn min_year_for(&self, kind: MediaKind) -> u32 {
        match kind {
            MediaKind::Movie => self.min_year.movies,
            MediaKind::Show => self.min_year.shows,
        }
    }

    /// Whether any of the ended/canceled/returning rules can reject a show
    pub fn restricts_status(&self) -> bool {
        !(self.allow_ended && self.allow_canceled && self.allow_returning)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct YearFilter {
    #[serde(default)]
    pub movies: u32,
    #[serde(default)]
    pub shows: u32,
}

/// Disallowed genres
///
/// Written in TOML either as a single string (`genre = "anime"`) or as an
/// array (`genre = ["anime", "reality"]`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum GenreFilter {
    Single(String),
    List(BTreeSet<String>),
}

impl Default for GenreFilter {
    fn default() -> Self {
        GenreFilter::List(BTreeSet::new())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Attributes listed per added item, in order
    #[serde(default = "default_item_fields")]
    pub item_fields: Vec<NotifyField>,
    #[serde(default)]
    pub pushover: Option<PushoverConfig>,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            item_fields: default_item_fields(),
            pushover: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotifyField {
    /// Plain title
    Title,
    /// Title rendered as an HTML link to the Trakt page
    Link,
    Year,
    Genres,
    Rating,
    Network,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushoverConfig {
    pub app_token: String,
    pub user_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Also write logs to this file (rotated daily)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Cron expression with a leading seconds field
    #[serde(default = "default_schedule")]
    pub schedule: String,
    #[serde(default = "default_true")]
    pub run_on_startup: bool,
}

fn default_true() -> bool {
    true
}

fn default_trakt_limit() -> u32 {
    100
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_minimum_availability() -> String {
    "released".to_string()
}

fn default_item_fields() -> Vec<NotifyField> {
    vec![NotifyField::Link, NotifyField::Genres]
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_schedule() -> String {
    "0 0 */6 * * *".to_string() // Every 6 hours
}

pub fn default_scheduler_config() -> SchedulerConfig {
    SchedulerConfig {
        schedule: default_schedule(),
        run_on_startup: default_true(),
    }
}

const PLACEHOLDERS: [&str; 3] = ["YOUR_CLIENT_ID", "YOUR_API_KEY", "YOUR_APP_TOKEN"];

fn is_unset(value: &str) -> bool {
    value.trim().is_empty() || PLACEHOLDERS.contains(&value)
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Starter configuration written by `pingrr config init`
    pub fn example() -> Self {
        Self {
            pingrr: GeneralConfig { dry_run: true },
            trakt: TraktConfig {
                client_id: "YOUR_CLIENT_ID".to_string(),
                tv_lists: TraktLists {
                    trending: true,
                    ..TraktLists::default()
                },
                movie_lists: TraktLists {
                    trending: true,
                    ..TraktLists::default()
                },
                ..TraktConfig::default()
            },
            sonarr: Some(SonarrConfig {
                host: "http://localhost:8989".to_string(),
                api_key: String::new(),
                quality_profile: 1,
                root_path: "/tv".to_string(),
                monitored: true,
                search_missing_episodes: true,
                tags: Vec::new(),
                request_timeout_secs: default_request_timeout_secs(),
            }),
            radarr: Some(RadarrConfig {
                host: "http://localhost:7878".to_string(),
                api_key: String::new(),
                quality_profile: 1,
                root_path: "/movies".to_string(),
                monitored: true,
                minimum_availability: default_minimum_availability(),
                search: true,
                tags: Vec::new(),
                request_timeout_secs: default_request_timeout_secs(),
            }),
            filters: FilterConfig {
                min_year: YearFilter {
                    movies: 2000,
                    shows: 2000,
                },
                min_runtime: 20,
                min_votes: 100,
                min_rating: 6.0,
                languages: vec!["en".to_string()],
                ..FilterConfig::default()
            },
            notifications: NotificationConfig::default(),
            logging: LoggingConfig::default(),
            scheduler: Some(default_scheduler_config()),
        }
    }

    pub fn sonarr_enabled(&self) -> Option<&SonarrConfig> {
        self.sonarr.as_ref().filter(|s| s.is_configured())
    }

    pub fn radarr_enabled(&self) -> Option<&RadarrConfig> {
        self.radarr.as_ref().filter(|r| r.is_configured())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let lists_enabled = self.trakt.tv_lists.any_enabled() || self.trakt.movie_lists.any_enabled();
        if lists_enabled && is_unset(&self.trakt.client_id) {
            return Err(anyhow::anyhow!("Trakt lists are enabled but trakt.client_id is not configured"));
        }

        let watchlist_enabled = self.trakt.tv_lists.watchlist || self.trakt.movie_lists.watchlist;
        let has_username = self.trakt.username.as_deref().map(|u| !u.trim().is_empty()).unwrap_or(false);
        if watchlist_enabled && !has_username {
            return Err(anyhow::anyhow!("Trakt watchlist is enabled but trakt.username is not configured"));
        }

        if let Some(sonarr) = self.sonarr_enabled() {
            if sonarr.host.trim().is_empty() {
                return Err(anyhow::anyhow!("sonarr.host is required when sonarr.api_key is set"));
            }
            if sonarr.root_path.trim().is_empty() {
                return Err(anyhow::anyhow!("sonarr.root_path is required when sonarr.api_key is set"));
            }
        }

        if let Some(radarr) = self.radarr_enabled() {
            if radarr.host.trim().is_empty() {
                return Err(anyhow::anyhow!("radarr.host is required when radarr.api_key is set"));
            }
            if radarr.root_path.trim().is_empty() {
                return Err(anyhow::anyhow!("radarr.root_path is required when radarr.api_key is set"));
            }
        }

        if !self.filters.min_rating.is_finite() {
            return Err(anyhow::anyhow!("filters.min_rating must be a number"));
        }

        if self.notifications.enabled {
            let pushover = self.notifications.pushover.as_ref()
                .ok_or_else(|| anyhow::anyhow!("Notifications are enabled but [notifications.pushover] is not configured"))?;
            if is_unset(&pushover.app_token) || is_unset(&pushover.user_key) {
                return Err(anyhow::anyhow!("Pushover app_token and user_key are required when notifications are enabled"));
            }
        }

        if let Some(scheduler) = &self.scheduler {
            if scheduler.schedule.trim().is_empty() {
                return Err(anyhow::anyhow!("scheduler.schedule cannot be empty"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
[pingrr]
dry_run = false

[trakt]
client_id = "abc123"
username = "someone"

[trakt.tv_lists]
trending = true
watchlist = true

[sonarr]
host = "http://sonarr:8989"
api_key = "sonarr-key"
quality_profile = 4
root_path = "/tv"
tags = [2]

[filters]
min_runtime = 20
min_votes = 100
min_rating = 6
genre = "anime"
countries = ["us", "gb"]
languages = ["en"]

[filters.min_year]
movies = 1990
shows = 2005
"#;

    #[test]
    fn test_config_parses_sample() {
        let config: Config = toml::from_str(SAMPLE).unwrap();
        assert_eq!(config.trakt.client_id, "abc123");
        assert_eq!(config.trakt.limit, 100);
        assert_eq!(
            config.trakt.lists_for(MediaKind::Show).enabled(),
            vec![TraktList::Trending, TraktList::Watchlist]
        );
        assert!(!config.trakt.lists_for(MediaKind::Movie).any_enabled());

        let sonarr = config.sonarr_enabled().unwrap();
        assert_eq!(sonarr.quality_profile, 4);
        assert!(sonarr.monitored);
        assert_eq!(sonarr.tags, vec![2]);
        assert!(config.radarr_enabled().is_none());

        assert_eq!(config.filters.min_rating, 6.0);
        assert_eq!(config.filters.min_year_for(MediaKind::Show), 2005);
        assert_eq!(config.filters.min_year_for(MediaKind::Movie), 1990);
        assert_eq!(config.filters.genre, GenreFilter::Single("anime".to_string()));
        assert!(config.filters.allow_ended);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_genre_filter_accepts_list() {
        let filters: FilterConfig = toml::from_str(r#"genre = ["anime", "reality"]"#).unwrap();
        match filters.genre {
            GenreFilter::List(genres) => {
                assert!(genres.contains("anime"));
                assert!(genres.contains("reality"));
            }
            other => panic!("expected a genre list, got {:?}", other),
        }
        assert_eq!(FilterConfig::default().genre, GenreFilter::List(BTreeSet::new()));
    }

    #[test]
    fn test_restricts_status() {
        let mut filters = FilterConfig::default();
        assert!(!filters.restricts_status());
        filters.allow_canceled = false;
        assert!(filters.restricts_status());
    }

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_path_buf();

        let config = Config::example();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert!(loaded.pingrr.dry_run);
        assert_eq!(loaded.filters.min_runtime, 20);
        assert_eq!(loaded.filters.languages, vec!["en".to_string()]);
        assert_eq!(loaded.notifications.item_fields, vec![NotifyField::Link, NotifyField::Genres]);
        assert_eq!(loaded.sonarr.as_ref().unwrap().root_path, "/tv");
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::example();
        // Placeholder client id with lists enabled
        assert!(config.validate().is_err());

        config.trakt.client_id = "real_id".to_string();
        assert!(config.validate().is_ok());

        config.trakt.movie_lists.watchlist = true;
        assert!(config.validate().is_err());
        config.trakt.username = Some("someone".to_string());
        assert!(config.validate().is_ok());

        config.notifications.enabled = true;
        assert!(config.validate().is_err());
        config.notifications.pushover = Some(PushoverConfig {
            app_token: "token".to_string(),
            user_key: "user".to_string(),
        });
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_service_without_api_key_is_disabled() {
        let mut config = Config::example();
        config.trakt.client_id = "real_id".to_string();
        assert!(config.sonarr_enabled().is_none());

        if let Some(sonarr) = config.sonarr.as_mut() {
            sonarr.api_key = "key".to_string();
            sonarr.root_path = String::new();
        }
        assert!(config.sonarr_enabled().is_some());
        assert!(config.validate().is_err());
    }
}
