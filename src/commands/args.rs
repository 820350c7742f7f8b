use crate::services::archive::ExtractorBackend;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "gamemusic-repack",
    version,
    about = "Repack an RSN (RAR of SPC) or 7z (of VGM) archive into a .gamemusic container"
)]
pub struct RepackCli {
    /// Source archive, e.g. `Chrono Trigger.rsn`
    pub archive: PathBuf,

    /// Profile name; picked from the archive extension when omitted
    #[arg(long)]
    pub profile: Option<String>,

    /// Output file [default: <ARCHIVE>.gamemusic]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the profile's extractor backend
    #[arg(long, value_enum)]
    pub extractor: Option<ExtractorBackend>,

    /// Keep packing when the extractor fails
    #[arg(long)]
    pub keep_going: bool,

    /// Fail when the archive holds no member files
    #[arg(long)]
    pub fail_on_empty: bool,

    /// JSON settings file with custom profiles
    #[arg(long, env = "GAMEMUSIC_CONFIG")]
    pub config: Option<PathBuf>,

    /// More output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Parser, Debug)]
#[command(
    name = "gamemusic2json",
    version,
    about = "Print the index of a .gamemusic container as JSON"
)]
pub struct InspectCli {
    pub container: PathBuf,

    /// More output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
