//! Acceptance rules for a single candidate.
//!
//! Rules run in a fixed order and stop at the first one that fails, so the
//! rejection reason always names the earliest violated rule. Library
//! membership is checked by the filter pipeline before any of this runs.

use pingrr_config::{FilterConfig, GenreFilter};
use pingrr_models::{AcceptanceVerdict, CandidateRecord, MediaKind, RejectReason};

pub fn evaluate(candidate: &CandidateRecord, kind: MediaKind, filters: &FilterConfig) -> AcceptanceVerdict {
    match first_violation(candidate, kind, filters) {
        Some(reason) => AcceptanceVerdict::Reject(reason),
        None => AcceptanceVerdict::Accept,
    }
}

fn first_violation(candidate: &CandidateRecord, kind: MediaKind, filters: &FilterConfig) -> Option<RejectReason> {
    let min_year = filters.min_year_for(kind);
    if candidate.year < min_year {
        return Some(RejectReason::Year {
            year: candidate.year,
            min: min_year,
        });
    }

    if candidate.runtime_minutes < filters.min_runtime {
        return Some(RejectReason::Runtime {
            runtime: candidate.runtime_minutes,
            min: filters.min_runtime,
        });
    }

    if kind.is_show() && !filters.networks.is_empty() {
        match &candidate.network {
            None => return Some(RejectReason::Network { network: None }),
            Some(network) if filters.networks.contains(network) => {
                return Some(RejectReason::Network {
                    network: Some(network.clone()),
                })
            }
            Some(_) => {}
        }
    }

    if candidate.vote_count < filters.min_votes {
        return Some(RejectReason::Votes {
            votes: candidate.vote_count,
            min: filters.min_votes,
        });
    }

    if kind.is_show() {
        if let Some(reason) = status_violation(candidate.status.as_deref(), filters) {
            return Some(reason);
        }
    }

    if candidate.rating < filters.min_rating {
        return Some(RejectReason::Rating {
            rating: candidate.rating,
            min: filters.min_rating,
        });
    }

    if let Some(reason) = genre_violation(candidate, &filters.genre) {
        return Some(reason);
    }

    if kind.is_show() && !filters.countries.is_empty() {
        if let Some(country) = candidate.country.as_deref().filter(|c| !c.is_empty()) {
            let lowered = country.to_lowercase();
            if !filters.countries.iter().any(|allowed| allowed.to_lowercase() == lowered) {
                return Some(RejectReason::Country { country: lowered });
            }
        }
    }

    if !filters.languages.is_empty() && !filters.languages.contains(&candidate.language) {
        return Some(RejectReason::Language {
            language: candidate.language.clone(),
        });
    }

    None
}

/// Ended, canceled and returning checks, in that order
fn status_violation(status: Option<&str>, filters: &FilterConfig) -> Option<RejectReason> {
    let status = status?;
    if !filters.allow_ended && status.contains("ended") {
        return Some(RejectReason::Ended {
            status: status.to_string(),
        });
    }
    if !filters.allow_canceled && status.contains("canceled") {
        return Some(RejectReason::Canceled {
            status: status.to_string(),
        });
    }
    if !filters.allow_returning && status.contains("returning") {
        return Some(RejectReason::Returning {
            status: status.to_string(),
        });
    }
    None
}

fn genre_violation(candidate: &CandidateRecord, genre: &GenreFilter) -> Option<RejectReason> {
    match genre {
        GenreFilter::List(disallowed) => {
            let hits: Vec<String> = candidate.genres.intersection(disallowed).cloned().collect();
            if hits.is_empty() {
                None
            } else {
                Some(RejectReason::Genre { genres: hits })
            }
        }
        GenreFilter::Single(value) => {
            if !value.is_empty() && candidate.genres.contains(value) {
                Some(RejectReason::Genre {
                    genres: vec![value.clone()],
                })
            } else {
                None
            }
        }
    }
}
