use pingrr_config::TraktList;
use pingrr_models::{ExternalIds, MediaKind, RawCandidate};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};
use crate::error::{check_status, SourceError};

pub const TRAKT_BASE_URL: &str = "https://api.trakt.tv";

const SERVICE: &str = "trakt";

#[derive(Debug, Default, Deserialize)]
pub struct TraktIds {
    pub trakt: Option<u64>,
    pub slug: Option<String>,
    pub tvdb: Option<u32>,
    pub imdb: Option<String>,
    pub tmdb: Option<u32>,
}

/// A movie or show as returned with `extended=full`
#[derive(Debug, Deserialize)]
pub struct TraktMedia {
    pub title: Option<String>,
    pub year: Option<u32>,
    #[serde(default)]
    pub ids: TraktIds,
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

impl From<TraktMedia> for RawCandidate {
    fn from(media: TraktMedia) -> Self {
        RawCandidate {
            title: media.title,
            ids: ExternalIds {
                tvdb_id: media.ids.tvdb,
                tmdb_id: media.ids.tmdb,
                imdb_id: media.ids.imdb.map(|s| s.replace('/', "")),
                trakt_id: media.ids.trakt,
                slug: media.ids.slug,
            },
            year: media.year,
            runtime: media.runtime,
            rating: media.rating,
            votes: media.votes,
            genres: media.genres,
            country: media.country,
            language: media.language,
            status: media.status,
            network: media.network,
        }
    }
}

fn kind_path(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Movie => "movies",
        MediaKind::Show => "shows",
    }
}

fn kind_key(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Movie => "movie",
        MediaKind::Show => "show",
    }
}

/// Build the request URL for one list
pub fn list_url(
    base_url: &str,
    kind: MediaKind,
    list: TraktList,
    username: Option<&str>,
    limit: u32,
) -> Result<String, SourceError> {
    let path = kind_path(kind);
    match list {
        TraktList::Watchlist => {
            let username = username.ok_or(SourceError::MissingField {
                service: SERVICE,
                field: "username",
            })?;
            Ok(format!("{}/users/{}/watchlist/{}?extended=full", base_url, username, path))
        }
        _ => Ok(format!(
            "{}/{}/{}?extended=full&limit={}",
            base_url,
            path,
            list.name(),
            limit
        )),
    }
}

/// Convert list entries into raw candidates
///
/// `trending`, `anticipated` and `watchlist` wrap the media in a `show` or
/// `movie` key; `popular` returns it bare. Entries that do not deserialize
/// are logged and dropped so the rest of the list survives.
pub fn parse_entries(kind: MediaKind, entries: Vec<Value>) -> Vec<RawCandidate> {
    let key = kind_key(kind);
    entries
        .into_iter()
        .filter_map(|mut entry| {
            let media = if entry.get(key).is_some() {
                entry[key].take()
            } else {
                entry
            };
            match serde_json::from_value::<TraktMedia>(media) {
                Ok(media) => Some(RawCandidate::from(media)),
                Err(e) => {
                    warn!(service = SERVICE, kind = %kind, error = %e, "Skipping unparseable Trakt entry");
                    None
                }
            }
        })
        .collect()
}

/// Fetch one list from Trakt
pub async fn fetch_list(
    client: &Client,
    url: &str,
    client_id: &str,
) -> Result<Vec<Value>, SourceError> {
    debug!(service = SERVICE, url, "Fetching Trakt list");
    let response = client
        .get(url)
        .header("trakt-api-version", "2")
        .header("trakt-api-key", client_id)
        .header("Content-Type", "application/json")
        .send()
        .await
        .map_err(|e| SourceError::from_reqwest(SERVICE, e))?;
    let response = check_status(SERVICE, response).await?;

    response
        .json()
        .await
        .map_err(|e| SourceError::from_reqwest(SERVICE, e))
}
