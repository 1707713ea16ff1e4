use pingrr_config::{FilterConfig, TraktConfig};
use pingrr_models::{AcceptanceVerdict, CandidateRecord, LibrarySnapshot, MediaKind, RawCandidate};
use pingrr_sources::{CandidateSource, SourceError};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info, warn};
use crate::evaluator::evaluate;

/// Counters describing what happened to each raw record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterStats {
    pub fetched: usize,
    pub malformed: usize,
    pub already_held: usize,
    pub duplicates: usize,
    pub rejected: usize,
    pub accepted: usize,
}

#[derive(Debug, Clone, Default)]
pub struct FilterOutcome {
    /// Accepted candidates in source order of first occurrence
    pub accepted: Vec<CandidateRecord>,
    pub stats: FilterStats,
}

/// Reduce a raw batch to the candidates worth adding
///
/// Each record is validated, checked against the accepted ids seen so far
/// and the library snapshot, and only then evaluated. A malformed record is
/// skipped on its own and never affects the rest of the batch.
pub fn filter_candidates(
    kind: MediaKind,
    raw: Vec<RawCandidate>,
    snapshot: &LibrarySnapshot,
    filters: &FilterConfig,
) -> FilterOutcome {
    let mut outcome = FilterOutcome::default();
    let mut seen: HashSet<u32> = HashSet::new();
    outcome.stats.fetched = raw.len();

    for record in raw {
        let candidate = match CandidateRecord::from_raw(record, kind) {
            Ok(candidate) => candidate,
            Err(malformed) => {
                warn!(kind = %kind, title = malformed.title(), reason = %malformed, "Skipping malformed candidate");
                outcome.stats.malformed += 1;
                continue;
            }
        };

        if kind.is_show() && candidate.status.is_none() && filters.restricts_status() {
            warn!(kind = %kind, title = %candidate.title, "Skipping malformed candidate: no status to check");
            outcome.stats.malformed += 1;
            continue;
        }

        if seen.contains(&candidate.library_id) {
            debug!(kind = %kind, title = %candidate.title, id = candidate.library_id, "Duplicate entry in list");
            outcome.stats.duplicates += 1;
            continue;
        }

        if snapshot.contains(candidate.library_id) {
            info!(
                kind = %kind,
                title = %candidate.title,
                id = candidate.library_id,
                "{} was rejected as it is already in the {} library",
                candidate.title,
                kind.plural()
            );
            outcome.stats.already_held += 1;
            continue;
        }

        match evaluate(&candidate, kind, filters) {
            AcceptanceVerdict::Accept => {
                info!(kind = %kind, title = %candidate.title, id = candidate.library_id, "Adding {} to potential add list", candidate.title);
                seen.insert(candidate.library_id);
                outcome.accepted.push(candidate);
            }
            AcceptanceVerdict::Reject(reason) => {
                info!(
                    kind = %kind,
                    title = %candidate.title,
                    rule = reason.rule(),
                    "{} was rejected as it was {}",
                    candidate.title,
                    reason
                );
                outcome.stats.rejected += 1;
            }
        }
    }

    outcome.stats.accepted = outcome.accepted.len();
    outcome
}

/// Candidate fetch plus filtering for one media kind
pub struct FilterPipeline<'a> {
    source: &'a dyn CandidateSource,
    trakt: &'a TraktConfig,
    filters: &'a FilterConfig,
}

impl<'a> FilterPipeline<'a> {
    pub fn new(source: &'a dyn CandidateSource, trakt: &'a TraktConfig, filters: &'a FilterConfig) -> Self {
        Self { source, trakt, filters }
    }

    /// Fetch candidates for `kind` and filter them against `snapshot`
    ///
    /// The source is not contacted at all when no list is enabled for `kind`.
    pub async fn filter(&self, kind: MediaKind, snapshot: &LibrarySnapshot) -> Result<FilterOutcome, SourceError> {
        let lists = self.trakt.lists_for(kind).enabled();
        if lists.is_empty() {
            info!(kind = %kind, "No {} lists enabled, nothing to check", kind.plural());
            return Ok(FilterOutcome::default());
        }

        info!(kind = %kind, source = self.source.source_name(), "Checking for new {} in lists", kind.plural());
        let raw = self.source.get_info(kind, &lists).await?;
        let outcome = filter_candidates(kind, raw, snapshot, self.filters);
        debug!(kind = %kind, stats = ?outcome.stats, "Filtered list successfully");
        Ok(outcome)
    }
}
