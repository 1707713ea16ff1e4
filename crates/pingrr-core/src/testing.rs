//! In-memory collaborators for pipeline tests.

use async_trait::async_trait;
use pingrr_config::{FilterConfig, TraktList};
use pingrr_models::{CandidateRecord, ExternalIds, MediaKind, RawCandidate};
use pingrr_sources::{
    AddRequest, AddResponse, CandidateSource, CommandRequest, LibraryService, NotificationChannel, SourceError,
};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Filters that accept anything
pub fn permissive_filters() -> FilterConfig {
    FilterConfig::default()
}

pub fn raw_show(title: &str, tvdb: u32) -> RawCandidate {
    RawCandidate {
        title: Some(title.to_string()),
        ids: ExternalIds {
            tvdb_id: Some(tvdb),
            slug: Some(title.to_lowercase().replace(' ', "-")),
            ..ExternalIds::default()
        },
        year: Some(2020),
        runtime: Some(45),
        rating: Some(8.0),
        votes: Some(5000),
        genres: Some(vec!["drama".to_string()]),
        country: Some("us".to_string()),
        language: Some("en".to_string()),
        status: Some("continuing".to_string()),
        network: Some("NBC".to_string()),
    }
}

pub fn raw_movie(title: &str, tmdb: Option<u32>) -> RawCandidate {
    RawCandidate {
        title: Some(title.to_string()),
        ids: ExternalIds {
            tmdb_id: tmdb,
            imdb_id: Some(format!("tt{}", tmdb.unwrap_or(0))),
            slug: Some(title.to_lowercase().replace(' ', "-")),
            ..ExternalIds::default()
        },
        year: Some(2015),
        runtime: Some(120),
        rating: Some(7.5),
        votes: Some(20000),
        genres: Some(vec!["action".to_string(), "thriller".to_string()]),
        country: Some("us".to_string()),
        language: Some("en".to_string()),
        status: Some("released".to_string()),
        network: None,
    }
}

/// `{title: "Show X", tvdb: 100, year: 2020, runtime: 45, rating: 8.0, votes: 5000, ...}`
pub fn show_x() -> CandidateRecord {
    CandidateRecord::from_raw(raw_show("Show X", 100), MediaKind::Show).expect("valid show")
}

pub struct FakeSource {
    records: HashMap<MediaKind, Vec<RawCandidate>>,
    unavailable: bool,
    pub calls: AtomicUsize,
    pub requested_lists: Mutex<Vec<TraktList>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
            unavailable: false,
            calls: AtomicUsize::new(0),
            requested_lists: Mutex::new(Vec::new()),
        }
    }

    pub fn with(mut self, kind: MediaKind, records: Vec<RawCandidate>) -> Self {
        self.records.insert(kind, records);
        self
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::new()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CandidateSource for FakeSource {
    fn source_name(&self) -> &str {
        "fake-trakt"
    }

    async fn get_info(&self, kind: MediaKind, lists: &[TraktList]) -> Result<Vec<RawCandidate>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested_lists.lock().unwrap().extend_from_slice(lists);
        if self.unavailable {
            return Err(SourceError::Unavailable {
                service: "trakt",
                message: "operation timed out".to_string(),
            });
        }
        Ok(self.records.get(&kind).cloned().unwrap_or_default())
    }
}

pub struct FakeLibrary {
    kind: MediaKind,
    held: HashSet<u32>,
    library_error: Option<fn() -> SourceError>,
    failing_titles: HashSet<String>,
    omit_id: bool,
    next_id: AtomicU64,
    pub library_calls: AtomicUsize,
    pub added: Mutex<Vec<AddRequest>>,
    pub commands: Mutex<Vec<CommandRequest>>,
}

impl FakeLibrary {
    pub fn new(kind: MediaKind) -> Self {
        Self {
            kind,
            held: HashSet::new(),
            library_error: None,
            failing_titles: HashSet::new(),
            omit_id: false,
            next_id: AtomicU64::new(1),
            library_calls: AtomicUsize::new(0),
            added: Mutex::new(Vec::new()),
            commands: Mutex::new(Vec::new()),
        }
    }

    pub fn holding(mut self, ids: impl IntoIterator<Item = u32>) -> Self {
        self.held.extend(ids);
        self
    }

    pub fn failing_library(mut self, error: fn() -> SourceError) -> Self {
        self.library_error = Some(error);
        self
    }

    pub fn failing_add(mut self, title: &str) -> Self {
        self.failing_titles.insert(title.to_string());
        self
    }

    pub fn without_ids(mut self) -> Self {
        self.omit_id = true;
        self
    }

    pub fn added_titles(&self) -> Vec<String> {
        self.added
            .lock()
            .unwrap()
            .iter()
            .map(|request| request.title().to_string())
            .collect()
    }

    pub fn request_count(&self) -> usize {
        self.library_calls.load(Ordering::SeqCst)
            + self.added.lock().unwrap().len()
            + self.commands.lock().unwrap().len()
    }
}

#[async_trait]
impl LibraryService for FakeLibrary {
    fn service_name(&self) -> &str {
        match self.kind {
            MediaKind::Show => "sonarr",
            MediaKind::Movie => "radarr",
        }
    }

    fn media_kind(&self) -> MediaKind {
        self.kind
    }

    async fn get_library(&self) -> Result<HashSet<u32>, SourceError> {
        self.library_calls.fetch_add(1, Ordering::SeqCst);
        match self.library_error {
            Some(error) => Err(error()),
            None => Ok(self.held.clone()),
        }
    }

    async fn add(&self, request: &AddRequest) -> Result<AddResponse, SourceError> {
        self.added.lock().unwrap().push(request.clone());
        if self.failing_titles.contains(request.title()) {
            return Err(SourceError::Api {
                service: "fake",
                status: 500,
                message: "internal error".to_string(),
            });
        }
        let id = if self.omit_id {
            None
        } else {
            Some(self.next_id.fetch_add(1, Ordering::SeqCst))
        };
        Ok(AddResponse { id })
    }

    async fn command(&self, command: &CommandRequest) -> Result<(), SourceError> {
        self.commands.lock().unwrap().push(command.clone());
        Ok(())
    }
}

pub struct FakeChannel {
    fail: bool,
    pub sent: Mutex<Vec<(String, BTreeMap<String, String>)>>,
}

impl FakeChannel {
    pub fn new() -> Self {
        Self {
            fail: false,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.sent.lock().unwrap().iter().map(|(m, _)| m.clone()).collect()
    }
}

#[async_trait]
impl NotificationChannel for FakeChannel {
    fn channel_name(&self) -> &str {
        "fake-pushover"
    }

    async fn send(&self, message: &str, attributes: &BTreeMap<String, String>) -> Result<(), SourceError> {
        self.sent
            .lock()
            .unwrap()
            .push((message.to_string(), attributes.clone()));
        if self.fail {
            return Err(SourceError::Unavailable {
                service: "pushover",
                message: "connection refused".to_string(),
            });
        }
        Ok(())
    }
}
