pub mod candidate;
pub mod media;
pub mod media_ids;
pub mod run_result;
pub mod snapshot;
pub mod verdict;

pub use candidate::{CandidateRecord, MalformedCandidate, RawCandidate};
pub use media::MediaKind;
pub use media_ids::ExternalIds;
pub use run_result::{DispatchOutcome, RunResult};
pub use snapshot::LibrarySnapshot;
pub use verdict::{AcceptanceVerdict, RejectReason};
