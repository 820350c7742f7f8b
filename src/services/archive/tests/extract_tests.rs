use super::*;
use super::extract::is_enclosed;
use crate::test_utils::write_7z;
use crate::types::errors::ExtractError;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn native_extractor() -> ExtractorConfig {
    ExtractorConfig {
        backend: ExtractorBackend::Native,
        ..shell_extractor("true", None)
    }
}

fn shell_extractor(script: &str, stage_as: Option<&str>) -> ExtractorConfig {
    ExtractorConfig {
        backend: ExtractorBackend::External,
        command: ExternalCommand {
            program: "sh".to_string(),
            args: vec![
                "-c".to_string(),
                script.to_string(),
                "sh".to_string(),
                "{archive}".to_string(),
                "{dest}".to_string(),
            ],
            stage_as: stage_as.map(str::to_string),
        },
        format: None,
    }
}

#[test]
fn test_format_detection() {
    assert_eq!(
        ArchiveFormat::from_path(Path::new("Chrono Trigger.rsn")),
        Some(ArchiveFormat::Rar)
    );
    assert_eq!(
        ArchiveFormat::from_path(Path::new("set.RAR")),
        Some(ArchiveFormat::Rar)
    );
    assert_eq!(
        ArchiveFormat::from_path(Path::new("sonic.7z")),
        Some(ArchiveFormat::SevenZ)
    );
    assert_eq!(ArchiveFormat::from_path(Path::new("tracks.zip")), None);
}

#[test]
fn test_render_args_placeholders() {
    let command = ExternalCommand {
        program: "unrar".to_string(),
        args: vec![
            "x".to_string(),
            "{archive}".to_string(),
            "{dest}/".to_string(),
            "-y".to_string(),
        ],
        stage_as: None,
    };

    let args = command.render_args(Path::new("/music/ff6.rsn"), Path::new("/tmp/gm-1"));
    let expected: Vec<OsString> = vec![
        "x".into(),
        "/music/ff6.rsn".into(),
        "/tmp/gm-1/".into(),
        "-y".into(),
    ];
    assert_eq!(args, expected);
}

#[cfg(unix)]
#[test]
fn test_external_extractor_populates_dest() {
    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("set.rsn");
    fs::write(&archive, b"not really rar").unwrap();
    let dest = dir.path().join("unpack");
    fs::create_dir(&dest).unwrap();

    let config = shell_extractor("printf abc > \"$2/a.spc\" && printf de > \"$2/b.spc\"", None);
    let result = extract_archive(&archive, &dest, &config).unwrap();

    assert_eq!(result.files_extracted, 2);
    assert_eq!(fs::read(dest.join("a.spc")).unwrap(), b"abc");
}

#[cfg(unix)]
#[test]
fn test_external_extractor_staged_copy_runs_in_dest() {
    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("sonic.7z");
    fs::write(&archive, b"payload").unwrap();
    let dest = dir.path().join("unpack");
    fs::create_dir(&dest).unwrap();

    // Mimics `p7zip -d file.7z`: reads the staged copy from cwd, then deletes it.
    let config = shell_extractor(
        "cp \"$1\" track.vgm && rm \"$1\"",
        Some("file.7z"),
    );
    let result = extract_archive(&archive, &dest, &config).unwrap();

    assert_eq!(result.files_extracted, 1);
    assert_eq!(fs::read(dest.join("track.vgm")).unwrap(), b"payload");
    assert!(archive.exists(), "the source archive is never consumed");
}

#[cfg(unix)]
#[test]
fn test_external_extractor_staged_copy_is_cleaned_up() {
    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("sonic.7z");
    fs::write(&archive, b"payload").unwrap();
    let dest = dir.path().join("unpack");
    fs::create_dir(&dest).unwrap();

    let config = shell_extractor("true", Some("file.7z"));
    let result = extract_archive(&archive, &dest, &config).unwrap();

    assert_eq!(result.files_extracted, 0);
    assert!(!dest.join("file.7z").exists());
}

#[cfg(unix)]
#[test]
fn test_external_extractor_nonzero_exit() {
    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("broken.rsn");
    fs::write(&archive, b"junk").unwrap();

    let config = shell_extractor("echo 'CRC failed' >&2; exit 3", None);
    let err = extract_archive(&archive, dir.path(), &config).unwrap_err();

    match err {
        ExtractError::Failed {
            program, message, ..
        } => {
            assert_eq!(program, "sh");
            assert_eq!(message, "CRC failed");
        }
        other => panic!("Expected ExtractError::Failed, got {other:?}"),
    }
}

#[cfg(unix)]
#[test]
fn test_external_extractor_failure_reported_on_stdout() {
    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("broken.rsn");
    fs::write(&archive, b"junk").unwrap();

    // unrar style: the reason goes to stdout, stderr stays empty.
    let config = shell_extractor("echo 'No files to extract'; exit 3", None);
    let err = extract_archive(&archive, dir.path(), &config).unwrap_err();

    match &err {
        ExtractError::Failed { message, .. } => assert_eq!(message, "No files to extract"),
        other => panic!("Expected ExtractError::Failed, got {other:?}"),
    }
    assert!(err.to_string().ends_with(": No files to extract"));
}

#[test]
fn test_external_extractor_missing_program() {
    let dir = TempDir::new().unwrap();
    let config = ExtractorConfig {
        backend: ExtractorBackend::External,
        command: ExternalCommand {
            program: "gamemusic-no-such-unarchiver".to_string(),
            args: Vec::new(),
            stage_as: None,
        },
        format: None,
    };

    let err = extract_archive(&PathBuf::from("x.rsn"), dir.path(), &config).unwrap_err();
    assert!(matches!(err, ExtractError::Spawn { .. }));
}

#[test]
fn test_native_rejects_unknown_format() {
    let dir = TempDir::new().unwrap();
    let err =
        extract_archive(Path::new("tracks.zip"), dir.path(), &native_extractor()).unwrap_err();
    assert!(matches!(err, ExtractError::UnsupportedFormat(_)));
}

#[test]
fn test_native_7z_corrupt_archive() {
    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("corrupt.7z");
    fs::write(&archive, b"definitely not a 7z archive").unwrap();
    let dest = dir.path().join("unpack");
    fs::create_dir(&dest).unwrap();

    let err = extract_archive(&archive, &dest, &native_extractor()).unwrap_err();
    assert!(matches!(err, ExtractError::Native { .. }));
}

#[test]
fn test_native_7z_extracts_member_bytes() {
    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("sonic.7z");
    write_7z(
        &archive,
        &[("01.vgm", b"Vgm \x01\x02\x03"), ("02.vgm", b"second")],
    );
    let dest = dir.path().join("unpack");
    fs::create_dir(&dest).unwrap();

    let result = extract_archive(&archive, &dest, &native_extractor()).unwrap();

    assert_eq!(result.files_extracted, 2);
    assert_eq!(fs::read(dest.join("01.vgm")).unwrap(), b"Vgm \x01\x02\x03");
    assert_eq!(fs::read(dest.join("02.vgm")).unwrap(), b"second");
}

#[test]
fn test_native_7z_rejects_entry_outside_dest() {
    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("evil.7z");
    write_7z(&archive, &[("../escaped.vgm", b"outside")]);
    let dest = dir.path().join("work").join("unpack");
    fs::create_dir_all(&dest).unwrap();

    let err = extract_archive(&archive, &dest, &native_extractor()).unwrap_err();

    match err {
        ExtractError::Native { message, .. } => {
            assert!(message.contains("../escaped.vgm"), "message was: {message}");
        }
        other => panic!("Expected ExtractError::Native, got {other:?}"),
    }
    assert!(!dir.path().join("work").join("escaped.vgm").exists());
}

#[test]
fn test_native_rar_is_refused_before_writing() {
    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("set.rsn");
    fs::write(&archive, b"Rar!\x1a\x07\x01\x00").unwrap();
    let dest = dir.path().join("unpack");
    fs::create_dir(&dest).unwrap();

    let err = extract_archive(&archive, &dest, &native_extractor()).unwrap_err();

    assert!(matches!(err, ExtractError::NativeRarUnavailable(_)));
    assert_eq!(fs::read_dir(&dest).unwrap().count(), 0);
}

#[test]
fn test_entry_name_enclosure() {
    assert!(is_enclosed("01.spc"));
    assert!(is_enclosed("./disc1/01.spc"));
    assert!(!is_enclosed("../01.spc"));
    assert!(!is_enclosed("disc1/../../01.spc"));
    assert!(!is_enclosed("/etc/passwd"));
    assert!(!is_enclosed(""));
}
