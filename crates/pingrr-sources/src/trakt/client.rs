use async_trait::async_trait;
use pingrr_config::{TraktConfig, TraktList};
use pingrr_models::{MediaKind, RawCandidate};
use reqwest::Client;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use tracing::info;
use crate::error::SourceError;
use crate::traits::CandidateSource;
use crate::trakt::api;

pub struct TraktClient {
    client: Client,
    base_url: String,
    client_id: String,
    username: Option<String>,
    limit: u32,
}

impl TraktClient {
    pub fn new(config: &TraktConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("pingrr/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SourceError::from_reqwest("trakt", e))?;

        Ok(Self {
            client,
            base_url: api::TRAKT_BASE_URL.to_string(),
            client_id: config.client_id.clone(),
            username: config.username.clone().filter(|u| !u.trim().is_empty()),
            limit: config.limit,
        })
    }

    /// Fetch `lists` in order and concatenate their entries
    ///
    /// The first list that fails aborts the fetch; later lists are not requested.
    async fn collect_lists<F, Fut>(
        &self,
        kind: MediaKind,
        lists: &[TraktList],
        mut fetch: F,
    ) -> Result<Vec<RawCandidate>, SourceError>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = Result<Vec<Value>, SourceError>>,
    {
        let mut candidates = Vec::new();
        for list in lists {
            let url = api::list_url(&self.base_url, kind, *list, self.username.as_deref(), self.limit)?;
            let entries = fetch(url).await?;
            let parsed = api::parse_entries(kind, entries);
            info!(
                service = "trakt",
                list = list.name(),
                kind = %kind,
                count = parsed.len(),
                "Fetched Trakt list"
            );
            candidates.extend(parsed);
        }
        Ok(candidates)
    }
}

#[async_trait]
impl CandidateSource for TraktClient {
    fn source_name(&self) -> &str {
        "trakt"
    }

    async fn get_info(&self, kind: MediaKind, lists: &[TraktList]) -> Result<Vec<RawCandidate>, SourceError> {
        let client = &self.client;
        let client_id = self.client_id.as_str();
        self.collect_lists(kind, lists, move |url| async move {
            api::fetch_list(client, &url, client_id).await
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn canned(url: &str) -> Result<Vec<Value>, SourceError> {
        if url.contains("/trending") {
            Ok(vec![json!({"watchers": 10, "show": {"title": "First", "ids": {"tvdb": 1}}})])
        } else if url.contains("/popular") {
            Ok(vec![
                json!({"title": "Second", "ids": {"tvdb": 2}}),
                json!({"title": "Third", "ids": {"tvdb": 3}}),
            ])
        } else {
            Err(SourceError::Api {
                service: "trakt",
                status: 503,
                message: "service unavailable".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_lists_concatenated_in_request_order() {
        let client = TraktClient::new(&TraktConfig::default()).unwrap();
        let mut requested = Vec::new();
        let candidates = client
            .collect_lists(MediaKind::Show, &[TraktList::Popular, TraktList::Trending], |url| {
                requested.push(url.clone());
                async move { canned(&url) }
            })
            .await
            .unwrap();

        let titles: Vec<_> = candidates.iter().filter_map(|c| c.title.as_deref()).collect();
        assert_eq!(titles, vec!["Second", "Third", "First"]);
        assert_eq!(
            requested,
            vec![
                "https://api.trakt.tv/shows/popular?extended=full&limit=100".to_string(),
                "https://api.trakt.tv/shows/trending?extended=full&limit=100".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_first_failing_list_stops_fetch() {
        let client = TraktClient::new(&TraktConfig::default()).unwrap();
        let mut requested = Vec::new();
        let lists = [TraktList::Trending, TraktList::Anticipated, TraktList::Popular];
        let err = client
            .collect_lists(MediaKind::Show, &lists, |url| {
                requested.push(url.clone());
                async move { canned(&url) }
            })
            .await
            .unwrap_err();

        assert!(matches!(err, SourceError::Api { status: 503, .. }));
        assert_eq!(requested.len(), 2);
        assert!(requested[1].contains("/anticipated"));
    }
}
