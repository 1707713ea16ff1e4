pub mod config;
pub mod paths;

pub use config::{
    default_scheduler_config, Config, FilterConfig, GeneralConfig, GenreFilter, LoggingConfig,
    NotificationConfig, NotifyField, PushoverConfig, RadarrConfig, SchedulerConfig, SonarrConfig,
    TraktConfig, TraktList, TraktLists, YearFilter,
};
pub use paths::{container_base_path, PathManager};
