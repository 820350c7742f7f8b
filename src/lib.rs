use clap::Parser;
use commands::args::{InspectCli, RepackCli};
use commands::{exit_codes, inspect_cmds, repack_cmds};

pub mod commands;
pub mod services;
pub mod types;
#[cfg(test)]
pub mod test_utils;

/// Install the `env_logger` backend. `RUST_LOG` wins over `verbose`.
pub fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_target(false)
        .format_timestamp(None)
        .try_init();
}

/// Entry point of `gamemusic-repack`. Returns the process exit code.
pub fn run() -> i32 {
    let cli = RepackCli::parse();
    init_logging(cli.verbose);

    match repack_cmds::repack_cmd(&cli) {
        Ok(report) => {
            log::info!(
                "wrote {} ({} files, {} bytes)",
                report.output.display(),
                report.summary.file_count(),
                report.summary.total_len
            );
            if report.extraction_error.is_some() {
                log::warn!("{} may be incomplete", report.output.display());
            }
            exit_codes::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            repack_cmds::exit_code(&e)
        }
    }
}

/// Entry point of `gamemusic2json`.
pub fn run_inspect() -> i32 {
    let cli = InspectCli::parse();
    init_logging(cli.verbose);

    let report = inspect_cmds::inspect_container(&cli.container).and_then(|report| {
        serde_json::to_string_pretty(&report).map_err(anyhow::Error::from)
    });
    match report {
        Ok(json) => {
            println!("{json}");
            exit_codes::SUCCESS
        }
        Err(e) => {
            log::error!("{e:#}");
            exit_codes::REPACK_FAILED
        }
    }
}
