// Public modules
pub mod defaults;
pub mod error;
pub mod local_files;
pub mod output;
pub mod sanitize;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
pub use output::{EntryOutcome, EntryStatus, SanitizeReport, SanitizeSummary};
pub use sanitize::{sanitize_dir, SanitizeSpec};
