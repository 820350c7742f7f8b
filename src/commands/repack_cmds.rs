//! The `gamemusic-repack` command.

use super::args::RepackCli;
use super::exit_codes;
use crate::services::config::{self, RepackSettings};
use crate::services::repack::{self, RepackOptions, RepackReport};
use crate::types::errors::{RepackError, RepackResult};

/// Resolve settings and profile from the command line, then repack.
pub fn repack_cmd(cli: &RepackCli) -> RepackResult<RepackReport> {
    let settings = config::load_settings(cli.config.as_deref())?;
    let profile = match &cli.profile {
        Some(name) => settings.profile(name)?,
        None => settings.profile_for_archive(&cli.archive)?,
    };

    let options = build_options(cli, &settings);
    repack::repack_archive(&cli.archive, profile, &options)
}

pub fn build_options(cli: &RepackCli, settings: &RepackSettings) -> RepackOptions {
    let mut options = RepackOptions::from_settings(settings);
    options.output = cli.output.clone();
    options.backend = cli.extractor;
    options.keep_going |= cli.keep_going;
    options.fail_on_empty |= cli.fail_on_empty;
    options
}

pub fn exit_code(error: &RepackError) -> i32 {
    match error {
        RepackError::Config(_) => exit_codes::CONFIG_ERROR,
        _ => exit_codes::REPACK_FAILED,
    }
}
