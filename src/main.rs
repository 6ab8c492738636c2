use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::Arc;

use clap::ValueEnum;
use eyre::Result;
use log::{info, warn};

use ytcap::Transcript;
use ytcap::config::Config;
use ytcap::output::{self, Extraction};
use ytcap::playback::{self, PlaybackEnd};
use ytcap::player::ClockPlayer;
use ytcap::session::Session;

mod cli;

use cli::{Cli, ExportFormat, OutputFormat};

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("ytcap.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ytcap")
        .join("logs")
}

fn build_after_help() -> String {
    format!(
        "\nSUPPORTED URLS:\n  https://www.youtube.com/watch?v=ID\n  https://youtu.be/ID\n  https://www.youtube.com/embed/ID\n\nConfig is read from: {}\nLogs are written to: {}",
        ytcap::config::config_path().display(),
        log_dir().join("ytcap.log").display()
    )
}

fn load_transcript(cli: &Cli, config: &Config) -> Result<Transcript> {
    match cli.transcript.as_ref().or(config.transcript.as_ref()) {
        Some(path) => Transcript::load(path),
        None => Transcript::bundled(),
    }
}

fn resolve_format(cli: &Cli, config: &Config) -> OutputFormat {
    cli.format
        .or_else(|| {
            let name = config.default_format.as_deref()?;
            OutputFormat::from_str(name, true)
                .inspect_err(|e| warn!("Ignoring default_format {name:?}: {e}"))
                .ok()
        })
        .unwrap_or(OutputFormat::Text)
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    let after_help = build_after_help();
    let cmd = <Cli as clap::CommandFactory>::command().after_help(after_help);
    let matches = cmd.get_matches();
    let cli = <Cli as clap::FromArgMatches>::from_arg_matches(&matches)?;

    // Load config file (non-fatal if missing/invalid)
    let config = Config::load().unwrap_or_default();

    let transcript = load_transcript(&cli, &config)?;
    let format = resolve_format(&cli, &config);
    let poll_interval = match cli.poll_ms {
        Some(ms) => std::time::Duration::from_millis(ms.max(1)),
        None => config.poll_interval(),
    };

    if cli.verbose {
        let config_path = ytcap::config::config_path();
        if config_path.exists() {
            eprintln!("Config: {}", config_path.display());
        }
        eprintln!(
            "Transcript: {} segments, ends at {:.1}s",
            transcript.segments.len(),
            transcript.end_sec()
        );
    }

    if cli.check {
        let issues = transcript.check();
        for issue in &issues {
            eprintln!("warning: {issue}");
        }
        if issues.is_empty() && cli.verbose {
            eprintln!("Transcript is sorted and non-overlapping");
        }
    }

    if let Some(export) = cli.export {
        let rendered = match export {
            ExportFormat::Text => output::render_text(&transcript),
            ExportFormat::Json => output::render_json(&transcript)?,
            ExportFormat::Srt => output::render_srt(&transcript),
        };
        println!("{rendered}");
        return Ok(());
    }

    if let Some(at) = cli.at {
        println!("{}", transcript.caption_at(Some(at)).unwrap_or_default());
        if cli.url.is_none() {
            return Ok(());
        }
    }

    let duration = match cli.duration {
        Some(seconds) => playback::validate_duration(seconds)?,
        None => transcript.end_sec(),
    };
    let (mut session, mut samples) = Session::new(transcript, poll_interval);

    // Collect URLs: from arg or stdin
    let urls = if let Some(ref url) = cli.url {
        vec![url.clone()]
    } else {
        let stdin = io::stdin();
        stdin.lock().lines().collect::<Result<Vec<_>, _>>()?
    };

    for url_input in &urls {
        if url_input.trim().is_empty() {
            continue;
        }

        let shape = ytcap::youtube::shape_of(url_input);
        session.set_input(url_input);
        let video_id = session.on_submit().cloned();
        let extraction = Extraction::new(url_input, shape, video_id);

        match format {
            OutputFormat::Text => {
                let rendered = output::render_extraction_text(&extraction);
                if extraction.video_id.is_some() {
                    println!("{rendered}");
                } else {
                    eprintln!("{rendered} (no video ID in: {url_input})");
                }
            }
            OutputFormat::Json => println!("{}", output::render_extraction_json(&extraction)?),
        }

        if cli.play && session.video_id().is_some() {
            if cli.verbose {
                eprintln!("Playing {duration:.1}s");
            }
            let interrupt = async {
                let _ = tokio::signal::ctrl_c().await;
            };
            let end = playback::play(
                &mut session,
                &mut samples,
                Arc::new(ClockPlayer::new(duration)),
                interrupt,
                |at, caption| println!("[{}] {}", output::format_timestamp(at), caption.unwrap_or_default()),
            )
            .await;
            if end == PlaybackEnd::NotStarted {
                eprintln!("Nothing to play: transcript is empty");
            }
        }
    }

    Ok(())
}
