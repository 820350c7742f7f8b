//! Source archive extraction into a working directory.

mod extract;
mod types;

pub use extract::extract_archive;
pub use types::{ArchiveFormat, ExternalCommand, ExtractionResult, ExtractorBackend, ExtractorConfig};

#[cfg(test)]
#[path = "tests/extract_tests.rs"]
mod extract_tests;
