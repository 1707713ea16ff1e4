use serde::{Deserialize, Serialize};

/// Body of `POST /api/v3/series`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPayload {
    pub tvdb_id: u32,
    pub title: String,
    pub quality_profile_id: u32,
    pub images: Vec<serde_json::Value>,
    pub seasons: Vec<serde_json::Value>,
    pub season_folder: bool,
    pub monitored: bool,
    pub root_folder_path: String,
    pub add_options: AddOptions,
    pub tags: Vec<u32>,
}

/// Body of `POST /api/v3/movie`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoviePayload {
    pub tmdb_id: u32,
    pub title: String,
    pub quality_profile_id: u32,
    pub images: Vec<serde_json::Value>,
    pub monitored: bool,
    pub title_slug: String,
    pub root_folder_path: String,
    pub minimum_availability: String,
    pub year: u32,
    pub add_options: AddOptions,
    pub tags: Vec<u32>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum AddOptions {
    #[serde(rename_all = "camelCase")]
    Series {
        ignore_episodes_with_files: bool,
        ignore_episodes_without_files: bool,
        search_for_missing_episodes: bool,
    },
    #[serde(rename_all = "camelCase")]
    Movie { search_for_movie: bool },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum AddRequest {
    Series(SeriesPayload),
    Movie(MoviePayload),
}

impl AddRequest {
    pub fn title(&self) -> &str {
        match self {
            AddRequest::Series(payload) => &payload.title,
            AddRequest::Movie(payload) => &payload.title,
        }
    }

    /// Path under `/api/v3/` the request is posted to
    pub fn endpoint(&self) -> &'static str {
        match self {
            AddRequest::Series(_) => "series",
            AddRequest::Movie(_) => "movie",
        }
    }
}

/// The parts of an add response we care about
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct AddResponse {
    #[serde(default)]
    pub id: Option<u64>,
}

/// Body of `POST /api/v3/command`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommandRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub movie_ids: Vec<u64>,
}

impl CommandRequest {
    pub fn movies_search(movie_id: u64) -> Self {
        Self {
            name: "MoviesSearch".to_string(),
            movie_ids: vec![movie_id],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_series_payload_shape() {
        let request = AddRequest::Series(SeriesPayload {
            tvdb_id: 100,
            title: "Show X".to_string(),
            quality_profile_id: 4,
            images: Vec::new(),
            seasons: Vec::new(),
            season_folder: true,
            monitored: true,
            root_folder_path: "/tv".to_string(),
            add_options: AddOptions::Series {
                ignore_episodes_with_files: false,
                ignore_episodes_without_files: false,
                search_for_missing_episodes: true,
            },
            tags: vec![2],
        });

        assert_eq!(request.endpoint(), "series");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "tvdbId": 100,
                "title": "Show X",
                "qualityProfileId": 4,
                "images": [],
                "seasons": [],
                "seasonFolder": true,
                "monitored": true,
                "rootFolderPath": "/tv",
                "addOptions": {
                    "ignoreEpisodesWithFiles": false,
                    "ignoreEpisodesWithoutFiles": false,
                    "searchForMissingEpisodes": true
                },
                "tags": [2]
            })
        );
    }

    #[test]
    fn test_movie_add_options_and_search_command() {
        let options = AddOptions::Movie { search_for_movie: true };
        assert_eq!(serde_json::to_value(&options).unwrap(), json!({ "searchForMovie": true }));

        let command = CommandRequest::movies_search(42);
        assert_eq!(
            serde_json::to_value(&command).unwrap(),
            json!({ "name": "MoviesSearch", "movieIds": [42] })
        );
    }

    #[test]
    fn test_add_response_tolerates_missing_id() {
        let response: AddResponse = serde_json::from_str(r#"{"title": "Heat"}"#).unwrap();
        assert_eq!(response.id, None);
    }
}
