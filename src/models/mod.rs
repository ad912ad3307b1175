pub mod language;
pub mod submission;

pub use language::{canonical_language, ExtensionTable, DEFAULT_EXTENSION, DEFAULT_LANGUAGE};
pub use submission::{Submission, SubmissionStatus};
