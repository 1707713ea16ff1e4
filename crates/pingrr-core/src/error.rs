use pingrr_sources::SourceError;
use std::fmt;
use thiserror::Error;

/// Where in a pass a collaborator call failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    LibrarySnapshot,
    CandidateFetch,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::LibrarySnapshot => write!(f, "library snapshot"),
            Stage::CandidateFetch => write!(f, "candidate fetch"),
        }
    }
}

/// A failure that ends one media-kind pass
#[derive(Debug, Error)]
pub enum PassError {
    #[error("{stage} unavailable: {source}")]
    UpstreamUnavailable {
        stage: Stage,
        #[source]
        source: SourceError,
    },

    #[error("{stage} failed: {source}")]
    Upstream {
        stage: Stage,
        #[source]
        source: SourceError,
    },
}

impl PassError {
    pub fn at(stage: Stage, source: SourceError) -> Self {
        if source.is_unavailable() {
            PassError::UpstreamUnavailable { stage, source }
        } else {
            PassError::Upstream { stage, source }
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            PassError::UpstreamUnavailable { stage, .. } | PassError::Upstream { stage, .. } => *stage,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, PassError::UpstreamUnavailable { .. })
    }
}
