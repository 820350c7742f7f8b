use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;

static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Write a settings file whose single `sh` profile runs `script` as the
/// extractor, with `$1` the archive and `$2` the working directory.
pub fn write_shell_config(dir: &Path, script: &str) -> PathBuf {
    let config = serde_json::json!({
        "profiles": [{
            "name": "shell",
            "archive_extensions": ["rsn", "7z"],
            "member_extension": "spc",
            "extractor": {
                "backend": "external",
                "command": {
                    "program": "sh",
                    "args": ["-c", script, "sh", "{archive}", "{dest}"]
                }
            }
        }]
    });

    let path = dir.join("gamemusic.json");
    fs::write(&path, serde_json::to_string_pretty(&config).unwrap())
        .expect("config should be written");
    path
}
