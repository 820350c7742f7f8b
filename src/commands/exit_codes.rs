//! Process exit codes shared by both binaries.

pub const SUCCESS: i32 = 0;
pub const REPACK_FAILED: i32 = 1; // Extraction, read or write failure
pub const CONFIG_ERROR: i32 = 2; // Usage or configuration error (clap also exits with 2)
