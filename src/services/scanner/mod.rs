pub mod walker;

pub use walker::{collect_member_files, count_files};

#[cfg(test)]
#[path = "tests/walker_tests.rs"]
mod walker_tests;
