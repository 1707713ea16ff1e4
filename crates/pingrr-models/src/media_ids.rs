use serde::{Deserialize, Serialize};
use crate::MediaKind;

/// Provider identifiers attached to a watch-list entry
///
/// Trakt returns every id it knows about; only the one matching the
/// candidate's media kind is needed to talk to the acquisition service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ExternalIds {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tvdb_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmdb_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trakt_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

impl ExternalIds {
    /// The identifier the library for `kind` is keyed on (tmdb for movies,
    /// tvdb for shows)
    pub fn library_id(&self, kind: MediaKind) -> Option<u32> {
        match kind {
            MediaKind::Movie => self.tmdb_id,
            MediaKind::Show => self.tvdb_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_id_follows_media_kind() {
        let ids = ExternalIds {
            tvdb_id: Some(100),
            tmdb_id: Some(200),
            ..ExternalIds::default()
        };
        assert_eq!(ids.library_id(MediaKind::Show), Some(100));
        assert_eq!(ids.library_id(MediaKind::Movie), Some(200));
    }
}
