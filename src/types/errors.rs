use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while writing a `.gamemusic` container.
#[derive(Debug, Error)]
pub enum PackError {
    #[error("Failed to read input {}: {source}", path.display())]
    InputRead { path: PathBuf, source: io::Error },
    #[error("Failed to write output {}: {source}", path.display())]
    OutputWrite { path: PathBuf, source: io::Error },
    #[error("Input {} changed while packing: expected {expected} bytes, read {actual}", path.display())]
    InputChanged {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },
    #[error("Container would be {total_len} bytes, offsets are limited to 32 bits")]
    ContainerTooLarge { total_len: u64 },
}

/// Failures while parsing a container index.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("Container truncated: need {needed} bytes, have {actual}")]
    Truncated { needed: u64, actual: u64 },
    #[error("Bad magic: not a Game Music Files container")]
    BadMagic,
    #[error("Offset {offset:#x} of entry {index} is out of order or out of range")]
    BadOffset { index: usize, offset: u32 },
    #[error("Container is {actual} bytes, beyond what 32-bit offsets can address")]
    TooLarge { actual: u64 },
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Failed to launch extractor `{program}`: {source}")]
    Spawn { program: String, source: io::Error },
    /// `message` is the tool's stderr, or its stdout when stderr is empty.
    #[error("Extractor `{program}` exited with {status}: {message}")]
    Failed {
        program: String,
        status: String,
        message: String,
    },
    #[error("Unsupported archive format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("No native RAR decoder for {}, use the external extractor", .0.display())]
    NativeRarUnavailable(PathBuf),
    #[error("Failed to extract {}: {message}", path.display())]
    Native { path: PathBuf, message: String },
    #[error("Failed to stage archive into working directory: {0}")]
    Stage(#[source] io::Error),
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("Failed to list {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: walkdir::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("Invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Unknown profile: {0}")]
    UnknownProfile(String),
    #[error("No profile handles {}", .0.display())]
    NoProfileForArchive(PathBuf),
}

/// Top-level failure of a repack run.
#[derive(Debug, Error)]
pub enum RepackError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to create working directory: {0}")]
    TempDir(#[source] io::Error),
    #[error("Could not unpack {}: {source}", archive.display())]
    Extraction {
        archive: PathBuf,
        source: ExtractError,
    },
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("No .{extension} files found in {}", archive.display())]
    EmptyInputSet { archive: PathBuf, extension: String },
    #[error(transparent)]
    Pack(#[from] PackError),
}

pub type RepackResult<T> = Result<T, RepackError>;
