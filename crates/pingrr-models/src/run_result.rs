use serde::{Deserialize, Serialize};
use crate::{CandidateRecord, MediaKind};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DispatchOutcome {
    pub candidate: CandidateRecord,
    pub dispatch_succeeded: bool,
}

/// Everything the dispatcher attempted during one pass, in filter order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunResult {
    pub media_kind: MediaKind,
    pub outcomes: Vec<DispatchOutcome>,
}

impl RunResult {
    pub fn new(media_kind: MediaKind) -> Self {
        Self {
            media_kind,
            outcomes: Vec::new(),
        }
    }

    pub fn record(&mut self, candidate: CandidateRecord, dispatch_succeeded: bool) {
        self.outcomes.push(DispatchOutcome {
            candidate,
            dispatch_succeeded,
        });
    }

    pub fn added(&self) -> impl Iterator<Item = &CandidateRecord> {
        self.outcomes
            .iter()
            .filter(|o| o.dispatch_succeeded)
            .map(|o| &o.candidate)
    }

    pub fn failed(&self) -> impl Iterator<Item = &CandidateRecord> {
        self.outcomes
            .iter()
            .filter(|o| !o.dispatch_succeeded)
            .map(|o| &o.candidate)
    }

    pub fn added_count(&self) -> usize {
        self.added().count()
    }

    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }
}
