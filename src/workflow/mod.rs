pub mod engine;
pub mod site;
pub mod tracker;

pub use engine::{SubmissionEngine, TickOutcome};
pub use site::{PageKind, Site};
pub use tracker::{DraftUpdate, SubmissionTracker};
