// Crate root: declare modules and control visibility
pub mod analyze;
pub mod cancel;
pub mod discover;
pub mod encoding;
pub mod extract;
pub mod format;
pub mod linkmap;
pub mod report;
pub mod section;
pub mod utils;

// Re-export commonly used API from the library for binaries/tests
pub use analyze::{analyze, AnalyzeOutcome, InvalidSource};
pub use cancel::CancelToken;
pub use discover::available_linkmap_files;
pub use format::format_size;
pub use linkmap::{LinkMap, ObjectFile, Symbol};
pub use report::{build_report, Category, SizeQuery, SizeReport, SizeRow};
