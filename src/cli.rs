use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Text,
    Json,
    Srt,
}

#[derive(Parser)]
#[command(
    name = "ytcap",
    about = "YouTube video ID extraction and timestamp-matched captions",
    version = env!("GIT_DESCRIBE"),
)]
pub struct Cli {
    /// YouTube video URL (reads one URL per line from stdin if omitted)
    pub url: Option<String>,

    /// Print the caption shown at this playback time (seconds)
    #[arg(long, value_name = "SECONDS")]
    pub at: Option<f64>,

    /// Play each extracted video on a headless player, printing captions as they change
    #[arg(short, long)]
    pub play: bool,

    /// Length of headless playback in seconds (defaults to the end of the transcript)
    #[arg(short, long, value_name = "SECONDS")]
    pub duration: Option<f64>,

    /// Transcript JSON file with a `segments` list of {startSec, endSec, text}
    #[arg(short, long)]
    pub transcript: Option<PathBuf>,

    /// Print the loaded transcript in the given format and exit
    #[arg(long, value_enum)]
    pub export: Option<ExportFormat>,

    /// Output format for extraction results: text (default), json
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Report unsorted or overlapping transcript segments
    #[arg(long)]
    pub check: bool,

    /// Playhead sampling interval in milliseconds while playing
    #[arg(long, value_name = "MS")]
    pub poll_ms: Option<u64>,

    /// Show transcript and playback details
    #[arg(short, long)]
    pub verbose: bool,
}
