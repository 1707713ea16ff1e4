pub mod dispatch;
pub mod error;
pub mod evaluator;
pub mod filter;
pub mod notify;
pub mod orchestrator;

#[cfg(test)]
mod testing;

pub use dispatch::{DispatchFailure, DispatchSettings, Dispatcher};
pub use error::{PassError, Stage};
pub use evaluator::evaluate;
pub use filter::{filter_candidates, FilterOutcome, FilterPipeline, FilterStats};
pub use notify::{build_message, NotificationMessage, Notifier};
pub use orchestrator::{Orchestrator, PassReport, PassStatus, PassSummary, RunSummary};
