use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;
use crate::{ExternalIds, MediaKind};

/// A watch-list entry exactly as the provider handed it over
///
/// Every field is optional here. Nothing downstream of the filter pipeline
/// sees a `RawCandidate`; it is turned into a [`CandidateRecord`] (or
/// rejected as [`MalformedCandidate`]) first.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawCandidate {
    pub title: Option<String>,
    pub ids: ExternalIds,
    pub year: Option<u32>,
    pub runtime: Option<u32>,
    pub rating: Option<f64>,
    pub votes: Option<u64>,
    #[serde(default)]
    pub genres: Option<Vec<String>>,
    pub country: Option<String>,
    pub language: Option<String>,
    pub status: Option<String>,
    pub network: Option<String>,
}

/// A validated watch-list entry
///
/// `library_id` is the identifier relevant to `media_kind` (tmdb for movies,
/// tvdb for shows) and is guaranteed present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidateRecord {
    pub title: String,
    pub media_kind: MediaKind,
    pub ids: ExternalIds,
    pub library_id: u32,
    pub year: u32,
    pub runtime_minutes: u32,
    pub rating: f64,
    pub vote_count: u64,
    pub genres: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    /// Trakt slug (or trakt id) of the source entry, used to build a link back
    pub watchlist_ref: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedCandidate {
    #[error("{title} has no {id_type} identifier")]
    MissingIdentifier { title: String, id_type: &'static str },

    #[error("{title} is missing required field `{field}`")]
    MissingField { title: String, field: &'static str },

    #[error("{title} has an invalid `{field}`: {reason}")]
    InvalidField {
        title: String,
        field: &'static str,
        reason: String,
    },
}

impl MalformedCandidate {
    pub fn title(&self) -> &str {
        match self {
            MalformedCandidate::MissingIdentifier { title, .. }
            | MalformedCandidate::MissingField { title, .. }
            | MalformedCandidate::InvalidField { title, .. } => title,
        }
    }
}

const UNTITLED: &str = "<untitled>";

impl CandidateRecord {
    /// Validate a raw record for `kind`
    ///
    /// The relevant identifier is checked first so that a record without one
    /// is always reported as "no identifier", whatever else it lacks.
    pub fn from_raw(raw: RawCandidate, kind: MediaKind) -> Result<Self, MalformedCandidate> {
        let title = raw.title.filter(|title| !title.trim().is_empty());

        let library_id = raw.ids.library_id(kind).ok_or_else(|| MalformedCandidate::MissingIdentifier {
            title: title.clone().unwrap_or_else(|| UNTITLED.to_string()),
            id_type: kind.library_id_name(),
        })?;

        let title = title.ok_or_else(|| MalformedCandidate::MissingField {
            title: UNTITLED.to_string(),
            field: "title",
        })?;

        let missing = |field: &'static str| MalformedCandidate::MissingField {
            title: title.clone(),
            field,
        };

        let year = raw.year.ok_or_else(|| missing("year"))?;
        let runtime_minutes = raw.runtime.ok_or_else(|| missing("runtime"))?;
        let rating = raw.rating.ok_or_else(|| missing("rating"))?;
        let vote_count = raw.votes.ok_or_else(|| missing("votes"))?;
        let language = raw.language.ok_or_else(|| missing("language"))?;
        let genres = raw.genres.ok_or_else(|| missing("genres"))?;

        if !rating.is_finite() {
            return Err(MalformedCandidate::InvalidField {
                title,
                field: "rating",
                reason: format!("{} is not a number", rating),
            });
        }

        let watchlist_ref = raw
            .ids
            .slug
            .clone()
            .or_else(|| raw.ids.trakt_id.map(|id| id.to_string()))
            .unwrap_or_default();

        Ok(Self {
            title,
            media_kind: kind,
            ids: raw.ids,
            library_id,
            year,
            runtime_minutes,
            rating,
            vote_count,
            genres: genres.into_iter().collect(),
            country: raw.country.filter(|c| !c.is_empty()),
            language,
            status: raw.status,
            network: raw.network,
            watchlist_ref,
        })
    }

    /// Link to the entry on Trakt, if the record carries a reference
    pub fn link(&self) -> Option<String> {
        if self.watchlist_ref.is_empty() {
            return None;
        }
        Some(format!("https://trakt.tv/{}/{}", self.media_kind.plural(), self.watchlist_ref))
    }
}
