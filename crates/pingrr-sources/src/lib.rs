pub mod arr;
pub mod error;
pub mod factory;
pub mod pushover;
pub mod traits;
pub mod trakt;

pub use arr::{AddOptions, AddRequest, AddResponse, ArrClient, CommandRequest, MoviePayload, SeriesPayload};
pub use error::SourceError;
pub use factory::{build_candidate_source, build_notification_channel, build_radarr, build_sonarr};
pub use pushover::PushoverClient;
pub use traits::{CandidateSource, LibraryService, NotificationChannel};
pub use trakt::TraktClient;
