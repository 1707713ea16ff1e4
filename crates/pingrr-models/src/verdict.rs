use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of running the acceptance rules against one candidate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum AcceptanceVerdict {
    Accept,
    Reject(RejectReason),
}

impl AcceptanceVerdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, AcceptanceVerdict::Accept)
    }

    /// Human-readable rejection reason, for logging only
    pub fn reason(&self) -> Option<String> {
        match self {
            AcceptanceVerdict::Accept => None,
            AcceptanceVerdict::Reject(reason) => Some(reason.to_string()),
        }
    }
}

/// The first acceptance rule a candidate failed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum RejectReason {
    Year { year: u32, min: u32 },
    Runtime { runtime: u32, min: u32 },
    Network { network: Option<String> },
    Votes { votes: u64, min: u64 },
    Ended { status: String },
    Canceled { status: String },
    Returning { status: String },
    Rating { rating: f64, min: f64 },
    Genre { genres: Vec<String> },
    Country { country: String },
    Language { language: String },
}

impl RejectReason {
    /// Short name of the rule that produced this rejection
    pub fn rule(&self) -> &'static str {
        match self {
            RejectReason::Year { .. } => "year",
            RejectReason::Runtime { .. } => "runtime",
            RejectReason::Network { .. } => "network",
            RejectReason::Votes { .. } => "votes",
            RejectReason::Ended { .. } => "ended",
            RejectReason::Canceled { .. } => "canceled",
            RejectReason::Returning { .. } => "returning",
            RejectReason::Rating { .. } => "rating",
            RejectReason::Genre { .. } => "genre",
            RejectReason::Country { .. } => "country",
            RejectReason::Language { .. } => "language",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::Year { year, min } => {
                write!(f, "outside allowed year range: {} (minimum {})", year, min)
            }
            RejectReason::Runtime { runtime, min } => {
                write!(f, "outside allowed runtime: {} minutes (minimum {})", runtime, min)
            }
            RejectReason::Network { network: Some(network) } => {
                write!(f, "aired by a disallowed network: {}", network)
            }
            RejectReason::Network { network: None } => write!(f, "has no network"),
            RejectReason::Votes { votes, min } => {
                write!(f, "did not meet vote requirement: {} (minimum {})", votes, min)
            }
            RejectReason::Ended { status } => write!(f, "is an ended series ({})", status),
            RejectReason::Canceled { status } => write!(f, "is a canceled series ({})", status),
            RejectReason::Returning { status } => write!(f, "is a returning series ({})", status),
            RejectReason::Rating { rating, min } => {
                write!(f, "outside the allowed rating: {:.1} (minimum {:.1})", rating, min)
            }
            RejectReason::Genre { genres } => {
                write!(f, "not a wanted genre: {}", genres.join(", "))
            }
            RejectReason::Country { country } => write!(f, "not a wanted country: {}", country),
            RejectReason::Language { language } => write!(f, "not a wanted language: {}", language),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_strings() {
        let verdict = AcceptanceVerdict::Reject(RejectReason::Rating { rating: 5.0, min: 6.0 });
        assert!(!verdict.is_accepted());
        assert_eq!(
            verdict.reason().as_deref(),
            Some("outside the allowed rating: 5.0 (minimum 6.0)")
        );
        assert_eq!(AcceptanceVerdict::Accept.reason(), None);
    }

    #[test]
    fn test_network_reason_without_network() {
        let reason = RejectReason::Network { network: None };
        assert_eq!(reason.rule(), "network");
        assert_eq!(reason.to_string(), "has no network");
    }
}
