//! The `.gamemusic` container: layout, packer and index reader.

mod format;
mod reader;
mod writer;

pub use format::{base_offset, ContainerLayout, CONTAINER_SUFFIX, HEADER_LEN, MAGIC};
pub use reader::{ContainerIndex, IndexEntry, PayloadKind};
pub use writer::{pack, pack_buffers, pack_to_writer, PackSummary, PackedEntry};

#[cfg(test)]
#[path = "tests/writer_tests.rs"]
mod writer_tests;

#[cfg(test)]
#[path = "tests/reader_tests.rs"]
mod reader_tests;
