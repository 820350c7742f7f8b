use crate::services::archive::{self, ExtractorBackend};
use crate::services::config::{RepackProfile, RepackSettings};
use crate::services::container::{self, PackSummary, CONTAINER_SUFFIX};
use crate::services::scanner;
use crate::types::errors::{RepackError, RepackResult};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

const WORKDIR_PREFIX: &str = "gamemusic-";

/// Per-run knobs layered over [`RepackSettings`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepackOptions {
    /// Output path; `<archive>.gamemusic` when absent.
    pub output: Option<PathBuf>,
    /// Pack whatever the extractor left even if it failed.
    pub keep_going: bool,
    pub fail_on_empty: bool,
    /// Override the profile's extractor backend.
    pub backend: Option<ExtractorBackend>,
    /// Parent for the working directory; the system temp dir when absent.
    pub workdir_root: Option<PathBuf>,
}

impl RepackOptions {
    pub fn from_settings(settings: &RepackSettings) -> Self {
        Self {
            keep_going: !settings.fail_on_extraction_error,
            fail_on_empty: settings.fail_on_empty,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct RepackReport {
    pub archive: PathBuf,
    pub output: PathBuf,
    pub profile: String,
    /// Set when extraction failed and the run continued anyway.
    pub extraction_error: Option<String>,
    pub summary: PackSummary,
    /// Already deleted by the time the report is returned.
    pub workdir: PathBuf,
}

/// `<archive>.gamemusic`, the suffix appended to the full file name.
pub fn default_output_path(archive_path: &Path) -> PathBuf {
    let mut name = OsString::from(archive_path.as_os_str());
    name.push(CONTAINER_SUFFIX);
    PathBuf::from(name)
}

/// Unpack one source archive and pack its member files into a container.
///
/// The working directory is unique per call and removed on every return path.
pub fn repack_archive(
    archive_path: &Path,
    profile: &RepackProfile,
    options: &RepackOptions,
) -> RepackResult<RepackReport> {
    log::info!("repacking {}", archive_path.display());

    let mut builder = tempfile::Builder::new();
    builder.prefix(WORKDIR_PREFIX);
    let workdir = match &options.workdir_root {
        Some(root) => builder.tempdir_in(root),
        None => builder.tempdir(),
    }
    .map_err(RepackError::TempDir)?;
    log::debug!("Working directory: {}", workdir.path().display());

    let mut extractor = profile.extractor.clone();
    if let Some(backend) = options.backend {
        extractor.backend = backend;
    }

    let extraction_error = match archive::extract_archive(archive_path, workdir.path(), &extractor) {
        Ok(result) => {
            log::debug!("Extracted {} files", result.files_extracted);
            None
        }
        Err(source) if options.keep_going => {
            log::warn!("could not unpack {}: {source}", archive_path.display());
            Some(source.to_string())
        }
        Err(source) => {
            return Err(RepackError::Extraction {
                archive: archive_path.to_path_buf(),
                source,
            });
        }
    };

    let members = scanner::collect_member_files(workdir.path(), &profile.member_extension)?;
    if members.is_empty() {
        if options.fail_on_empty {
            return Err(RepackError::EmptyInputSet {
                archive: archive_path.to_path_buf(),
                extension: profile.member_extension.clone(),
            });
        }
        log::warn!(
            "No .{} files found in {}, writing an empty container",
            profile.member_extension,
            archive_path.display()
        );
    }

    let output = options
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(archive_path));
    let summary = container::pack(&members, &output)?;

    log::info!("deleting temporary unpacked files...");
    let workdir_path = workdir.path().to_path_buf();
    if let Err(e) = workdir.close() {
        log::warn!("Failed to remove working directory (non-fatal): {e}");
    }

    Ok(RepackReport {
        archive: archive_path.to_path_buf(),
        output,
        profile: profile.name.clone(),
        extraction_error,
        summary,
        workdir: workdir_path,
    })
}
