pub mod code_extractor;
pub mod language_detector;
pub mod repo_sync;

pub use code_extractor::{CodeExtractor, ExtractionStrategy, ReadMode, EDITOR_STRATEGIES};
pub use language_detector::LanguageDetector;
pub use repo_sync::RepositorySync;
