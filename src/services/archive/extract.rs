use super::types::{ArchiveFormat, ExternalCommand, ExtractionResult, ExtractorBackend, ExtractorConfig};
use crate::services::scanner::count_files;
use crate::types::errors::ExtractError;
use std::ffi::OsString;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::process::Command;

/// Extract `archive_path` into the existing directory `dest_path`.
///
/// Steps:
/// 1. Run the configured backend (external program or in-process decoder)
/// 2. Remove any staged copy of the archive
/// 3. Count what landed in `dest_path`
pub fn extract_archive(
    archive_path: &Path,
    dest_path: &Path,
    config: &ExtractorConfig,
) -> Result<ExtractionResult, ExtractError> {
    match config.backend {
        ExtractorBackend::External => run_external(&config.command, archive_path, dest_path)?,
        ExtractorBackend::Native => {
            let format = config
                .format
                .or_else(|| ArchiveFormat::from_path(archive_path))
                .ok_or_else(|| ExtractError::UnsupportedFormat(archive_path.to_path_buf()))?;
            match format {
                ArchiveFormat::SevenZ => extract_7z_inner(archive_path, dest_path)?,
                // The available pure-Rust RAR readers cannot decompress RAR4
                // or compressed members, so RSN sets need the external tool.
                ArchiveFormat::Rar => {
                    return Err(ExtractError::NativeRarUnavailable(archive_path.to_path_buf()))
                }
            }
        }
    }

    Ok(ExtractionResult {
        dest_path: dest_path.to_path_buf(),
        files_extracted: count_files(dest_path),
    })
}

fn run_external(
    command: &ExternalCommand,
    archive_path: &Path,
    dest_path: &Path,
) -> Result<(), ExtractError> {
    let (staged, archive_arg) = match &command.stage_as {
        Some(name) => {
            let staged_path = dest_path.join(name);
            fs::copy(archive_path, &staged_path).map_err(ExtractError::Stage)?;
            (Some(staged_path), PathBuf::from(name))
        }
        None => (None, archive_path.to_path_buf()),
    };

    let args = command.render_args(&archive_arg, dest_path);
    log::info!("{}", describe(&command.program, &args));

    let mut process = Command::new(&command.program);
    process.args(&args);
    if staged.is_some() {
        process.current_dir(dest_path);
    }

    let output = process.output();

    // p7zip -d consumes its input; other tools leave the copy behind.
    if let Some(staged_path) = &staged {
        if staged_path.exists() {
            if let Err(e) = fs::remove_file(staged_path) {
                log::warn!("Failed to remove staged archive (non-fatal): {e}");
            }
        }
    }

    let output = output.map_err(|source| ExtractError::Spawn {
        program: command.program.clone(),
        source,
    })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.trim().is_empty() {
        log::debug!("{}: {}", command.program, stdout.trim());
    }

    if !output.status.success() {
        // unrar reports most failures on stdout.
        let stderr = String::from_utf8_lossy(&output.stderr);
        let message = if stderr.trim().is_empty() {
            stdout.trim()
        } else {
            stderr.trim()
        };
        return Err(ExtractError::Failed {
            program: command.program.clone(),
            status: output.status.to_string(),
            message: message.to_string(),
        });
    }

    Ok(())
}

fn describe(program: &str, args: &[OsString]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(&arg.to_string_lossy());
    }
    line
}

/// True when `name` stays below the extraction root: only plain and `.`
/// components, no `..`, root or drive prefix.
pub(super) fn is_enclosed(name: &str) -> bool {
    !name.is_empty()
        && Path::new(name)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

fn extract_7z_inner(archive_path: &Path, dest_path: &Path) -> Result<(), ExtractError> {
    log::info!("Decompressing 7z {}", archive_path.display());

    let mut rejected: Option<String> = None;
    let result = sevenz_rust::decompress_file_with_extract_fn(
        archive_path,
        dest_path,
        |entry, reader, dest| {
            if !is_enclosed(entry.name()) {
                rejected = Some(entry.name().to_string());
                return Err(sevenz_rust::Error::other("entry escapes extraction root"));
            }
            sevenz_rust::default_entry_extract_fn(entry, reader, dest)
        },
    );

    if let Some(name) = rejected {
        return Err(ExtractError::Native {
            path: archive_path.to_path_buf(),
            message: format!("Unsafe entry path: {name}"),
        });
    }
    result.map_err(|e| ExtractError::Native {
        path: archive_path.to_path_buf(),
        message: format!("Failed to extract 7z: {e}"),
    })
}
