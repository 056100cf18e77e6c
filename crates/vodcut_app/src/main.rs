//! vodcut CLI entry point.
//!
//! Thin wrapper over `vodcut_core`: parse arguments, bootstrap config and
//! logging, drive the per-asset run loop, and map outcomes to exit codes.
//! Exit code 1 means a missing argument or an unrecoverable setup error;
//! individual item failures are reported but leave the exit code at 0.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

use vodcut_core::config::ConfigManager;
use vodcut_core::discovery::find_media_files;
use vodcut_core::download::fetch_video;
use vodcut_core::encode::FfmpegEncoder;
use vodcut_core::ledger::FsLedger;
use vodcut_core::logging;
use vodcut_core::pipeline::{
    ChapterSource, ConvertPipeline, ItemOutcome, RunReport, SplitPipeline, TrimPipeline,
};
use vodcut_core::runner::CommandRunner;
use vodcut_core::silence::FfmpegSilenceDetector;
use vodcut_core::tools::check_tools;

#[derive(Parser, Debug)]
#[command(
    name = "vodcut",
    version,
    about = "Batch post-processing for recorded video"
)]
struct Cli {
    /// Config file path (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split sources into per-chapter clips
    Split {
        /// Files or folders to process
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Read chapters embedded in the container instead of the CSV table
        #[arg(long)]
        embedded: bool,
    },

    /// Trim leading/trailing silence from sources
    Trim {
        /// Files or folders to process
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Normalize sources to MP4 (remux when codecs allow, re-encode otherwise)
    Convert {
        /// Files or folders to process
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Download a video, then trim silence from it
    Fetch {
        /// Video URL
        url: String,

        /// Destination directory (defaults to the configured download folder)
        #[arg(short, long, value_name = "DIR")]
        dest: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            };
        }
    };

    match run(cli) {
        Ok(report) => {
            println!("{}", report.summary());
            for failure in &report.failed {
                println!("  failed: {}", failure);
            }
            // Item failures are already reported; only setup errors change
            // the exit code.
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<RunReport> {
    let mut manager = ConfigManager::new(config_path(cli.config)?);
    manager
        .load_or_create()
        .with_context(|| format!("failed to load config {}", manager.path().display()))?;
    let settings = manager.settings().clone();

    let _log_guard = if settings.logging.log_to_file {
        Some(
            logging::init_tracing_with_file(
                &settings.logging.level,
                Path::new(&settings.paths.logs_folder),
            )
            .context("failed to initialize file logging")?,
        )
    } else {
        logging::init_tracing(&settings.logging.level);
        None
    };

    let runner = CommandRunner::new();
    let encoder = FfmpegEncoder::new(settings.encode.clone());
    let ledger = FsLedger;
    let mut report = RunReport::new();

    match cli.command {
        Command::Split { paths, embedded } => {
            let required: &[&str] = if embedded {
                &["ffmpeg", "ffprobe", "mkvextract"]
            } else {
                &["ffmpeg"]
            };
            check_tools(required)?;

            let chapters_from = if embedded {
                ChapterSource::Embedded
            } else {
                ChapterSource::Table
            };
            let pipeline = SplitPipeline {
                encoder: &encoder,
                ledger: &ledger,
                settings: &settings,
                runner: &runner,
            };

            for source in discover(&paths)? {
                if let Err(e) = pipeline.run(&source, chapters_from, &mut report) {
                    tracing::error!("{}: {}", source.display(), e);
                    report.record(
                        source.display().to_string(),
                        ItemOutcome::Failed(e.to_string()),
                    );
                }
            }
        }

        Command::Trim { paths } => {
            check_tools(&["ffmpeg"])?;

            let detector = FfmpegSilenceDetector::new(settings.silence);
            let pipeline = TrimPipeline {
                detector: &detector,
                encoder: &encoder,
                ledger: &ledger,
            };

            for source in discover(&paths)? {
                if let Err(e) = pipeline.run(&source, None, &mut report) {
                    tracing::error!("{}: {}", source.display(), e);
                    report.record(
                        source.display().to_string(),
                        ItemOutcome::Failed(e.to_string()),
                    );
                }
            }
        }

        Command::Convert { paths } => {
            check_tools(&["ffmpeg", "ffprobe"])?;

            let pipeline = ConvertPipeline {
                encoder: &encoder,
                ledger: &ledger,
                runner: &runner,
            };

            for source in discover(&paths)? {
                if let Err(e) = pipeline.run(&source, &mut report) {
                    tracing::error!("{}: {}", source.display(), e);
                    report.record(
                        source.display().to_string(),
                        ItemOutcome::Failed(e.to_string()),
                    );
                }
            }
        }

        Command::Fetch { url, dest } => {
            check_tools(&["yt-dlp", "ffmpeg"])?;

            let dest = dest.unwrap_or_else(|| PathBuf::from(&settings.paths.download_folder));
            std::fs::create_dir_all(&dest)
                .with_context(|| format!("failed to create {}", dest.display()))?;

            let downloaded = fetch_video(&url, &dest, &settings.download, &runner)
                .with_context(|| format!("download failed for {}", url))?;

            let detector = FfmpegSilenceDetector::new(settings.silence);
            let pipeline = TrimPipeline {
                detector: &detector,
                encoder: &encoder,
                ledger: &ledger,
            };
            if let Err(e) = pipeline.run(&downloaded, None, &mut report) {
                tracing::error!("{}: {}", downloaded.display(), e);
                report.record(
                    downloaded.display().to_string(),
                    ItemOutcome::Failed(e.to_string()),
                );
            }
        }
    }

    Ok(report)
}

fn discover(paths: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let files = find_media_files(paths).context("failed to scan input paths")?;
    if files.is_empty() {
        tracing::warn!("No media files found under the given paths");
    }
    Ok(files)
}

fn config_path(explicit: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }

    let dirs = directories::ProjectDirs::from("", "", "vodcut")
        .context("could not determine a config directory")?;
    Ok(dirs.config_dir().join("config.toml"))
}
