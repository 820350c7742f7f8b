use sevenz_rust::{SevenZArchiveEntry, SevenZWriter};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;

static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(|| {
        // Initialize logger only once
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Write `(name, content)` pairs into `dir`, returning the paths in the same order.
pub fn write_files(dir: &Path, files: &[(&str, &[u8])]) -> Vec<PathBuf> {
    files
        .iter()
        .map(|(name, content)| {
            let path = dir.join(name);
            fs::write(&path, content).expect("Failed to write test file");
            path
        })
        .collect()
}

/// Build a real 7z archive at `archive` from `(entry name, content)` pairs.
pub fn write_7z(archive: &Path, members: &[(&str, &[u8])]) {
    let sources = tempfile::TempDir::new().expect("Failed to create source dir");
    let mut writer = SevenZWriter::create(archive).expect("Failed to create 7z");
    for (i, (name, content)) in members.iter().enumerate() {
        let source = sources.path().join(format!("member{i}"));
        fs::write(&source, content).expect("Failed to write 7z member");
        let entry = SevenZArchiveEntry::from_path(&source, name.to_string());
        let reader = fs::File::open(&source).expect("Failed to reopen 7z member");
        writer
            .push_archive_entry(entry, Some(reader))
            .expect("Failed to add 7z entry");
    }
    writer.finish().expect("Failed to finish 7z");
}
