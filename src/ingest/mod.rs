pub mod handlers;

mod events;
mod service;

pub use events::{ImportSummary, MessageEvent, ResolvedStreakEntry};
pub use service::{IgnoreReason, IngestOutcome, IngestService};
