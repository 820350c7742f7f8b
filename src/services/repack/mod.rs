//! End-to-end conversion of one source archive into a `.gamemusic` container.

mod pipeline;

pub use pipeline::{default_output_path, repack_archive, RepackOptions, RepackReport};

#[cfg(test)]
#[path = "tests/pipeline_tests.rs"]
mod pipeline_tests;
