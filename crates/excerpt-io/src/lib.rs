//! File loading, run requests and JSON reports

mod error;
mod io;
mod loader;
mod report;
mod request;

pub use error::{Error, Result};
pub use io::{atomic_write, read_json, write_json};
pub use loader::{discover_documents, split_pages, TextFileSource, PAGE_BREAK};
pub use report::{
    preview, round_score, ExtractedSection, Metadata, Report, SubsectionAnalysis,
    PREVIEW_CHARS, REPORT_VERSION,
};
pub use request::RunRequest;
