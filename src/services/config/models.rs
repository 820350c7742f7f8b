use crate::services::archive::{ArchiveFormat, ExternalCommand, ExtractorBackend, ExtractorConfig};
use serde::{Deserialize, Serialize};

/// One kind of source collection: how to unpack it and which files to keep.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RepackProfile {
    pub name: String,
    /// Archive extensions this profile is picked for, lowercase, without dot.
    pub archive_extensions: Vec<String>,
    /// Extension of the member files packed into the container.
    pub member_extension: String,
    pub extractor: ExtractorConfig,
}

impl RepackProfile {
    /// SPC sets distributed as `.rsn` (RAR) archives.
    pub fn rsn() -> Self {
        Self {
            name: "rsn".into(),
            archive_extensions: vec!["rsn".into(), "rar".into()],
            member_extension: "spc".into(),
            extractor: ExtractorConfig {
                backend: ExtractorBackend::External,
                command: ExternalCommand {
                    program: "unrar".into(),
                    args: vec!["x".into(), "{archive}".into(), "{dest}/".into(), "-y".into()],
                    stage_as: None,
                },
                format: Some(ArchiveFormat::Rar),
            },
        }
    }

    /// VGM sets distributed as 7-Zip archives.
    pub fn vgm7z() -> Self {
        Self {
            name: "vgm7z".into(),
            archive_extensions: vec!["7z".into()],
            member_extension: "vgm".into(),
            extractor: ExtractorConfig {
                backend: ExtractorBackend::External,
                command: ExternalCommand {
                    program: "p7zip".into(),
                    args: vec!["-d".into(), "{archive}".into()],
                    stage_as: Some("file.7z".into()),
                },
                format: Some(ArchiveFormat::SevenZ),
            },
        }
    }

    pub fn handles_extension(&self, ext: &str) -> bool {
        let ext = ext.to_lowercase();
        self.archive_extensions.iter().any(|e| *e == ext)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct RepackSettings {
    pub profiles: Vec<RepackProfile>,
    /// Abort when the extractor fails instead of packing whatever it left.
    pub fail_on_extraction_error: bool,
    /// Treat an archive without member files as an error.
    pub fail_on_empty: bool,
}

impl Default for RepackSettings {
    fn default() -> Self {
        Self {
            profiles: vec![RepackProfile::rsn(), RepackProfile::vgm7z()],
            fail_on_extraction_error: true,
            fail_on_empty: false,
        }
    }
}
