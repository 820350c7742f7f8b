use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Archive formats the native backend can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveFormat {
    Rar,
    #[serde(rename = "7z")]
    SevenZ,
}

impl ArchiveFormat {
    /// Detect format from file extension. RSN sets are plain RAR archives.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "rar" | "rsn" => Some(Self::Rar),
            "7z" => Some(Self::SevenZ),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExtractorBackend {
    /// Spawn the configured unarchiver.
    #[default]
    External,
    /// Decompress in-process.
    Native,
}

/// An unarchiver invocation.
///
/// `{archive}` and `{dest}` inside `args` are replaced with the archive path
/// and the working directory. With `stage_as` set, the archive is first
/// copied into the working directory under that name and the program runs
/// there, `{archive}` then being the staged name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExternalCommand {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub stage_as: Option<String>,
}

impl ExternalCommand {
    pub fn render_args(&self, archive: &Path, dest: &Path) -> Vec<OsString> {
        self.args
            .iter()
            .map(|arg| match arg.as_str() {
                "{archive}" => archive.as_os_str().to_os_string(),
                "{dest}" => dest.as_os_str().to_os_string(),
                _ => arg
                    .replace("{archive}", &archive.to_string_lossy())
                    .replace("{dest}", &dest.to_string_lossy())
                    .into(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractorConfig {
    #[serde(default)]
    pub backend: ExtractorBackend,
    pub command: ExternalCommand,
    /// Fixed format for the native backend; detected from the extension when absent.
    #[serde(default)]
    pub format: Option<ArchiveFormat>,
}

/// Result of an extraction operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    pub dest_path: PathBuf,
    pub files_extracted: usize,
}
