use serde::{Deserialize, Serialize};
use std::fmt;

/// The two kinds of media a watch-list can hold.
///
/// Each kind maps onto its own acquisition service (Sonarr for shows, Radarr
/// for movies) and its own identifier namespace (tvdb for shows, tmdb for
/// movies).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Show,
}

impl MediaKind {
    /// Plural label used in logs and notifications ("movies" / "shows")
    pub fn plural(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movies",
            MediaKind::Show => "shows",
        }
    }

    /// Name of the identifier the acquisition service keys its library on
    pub fn library_id_name(&self) -> &'static str {
        match self {
            MediaKind::Movie => "tmdb",
            MediaKind::Show => "tvdb",
        }
    }

    pub fn is_show(&self) -> bool {
        matches!(self, MediaKind::Show)
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Movie => write!(f, "movie"),
            MediaKind::Show => write!(f, "show"),
        }
    }
}
