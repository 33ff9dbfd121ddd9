//! `barscan`: reconstruct a daily case-count series from a bar-chart image.
//!
//! Two mirrored subcommands, one per input modality:
//!
//! ```text
//! barscan raster chart.png [--calendar spec.json]
//! barscan vector chart.svg [--config params.json]
//! ```
//!
//! Both print the same CSV (`date,cases` header, one `YYYY-MM-DD,<n>` line
//! per day) to stdout. Any failure prints a diagnostic to stderr and exits
//! non-zero with nothing on stdout.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use image::ImageReader;
use log::LevelFilter;

use barscan_core::{write_csv, DateSeries, GrayImageView};
use barscan_raster::RasterParams;
use barscan_vector::VectorParams;

#[derive(Parser)]
#[command(
    name = "barscan",
    version,
    about = "Reconstruct a daily case-count series from a bar-chart image"
)]
struct Cli {
    /// Increase stderr diagnostics (-v info, -vv debug).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Reconstruct from a rasterized chart (PNG and friends).
    Raster {
        /// Chart image path.
        input: PathBuf,

        /// JSON calendar spec overriding the built-in calibration,
        /// e.g. {"start":"2022-04-26","skip_slot":5}.
        #[arg(long)]
        calendar: Option<PathBuf>,
    },
    /// Reconstruct from an SVG chart export.
    Vector {
        /// Chart document path.
        input: PathBuf,

        /// JSON parameter file overriding the built-in calibration
        /// (fill token, footnote marker, label scope depth).
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Raster(#[from] barscan_raster::RasterError),
    #[error(transparent)]
    Vector(#[from] barscan_vector::VectorError),
    #[error("bad configuration file: {0}")]
    Config(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("barscan: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Raster { input, calendar } => {
            let mut params = RasterParams::default();
            if let Some(path) = calendar {
                params.calendar = serde_json::from_str(&fs::read_to_string(path)?)?;
            }
            // The decoded image lives only for this extraction.
            let img = ImageReader::open(&input)?.decode()?.to_luma8();
            let view = GrayImageView {
                width: img.width() as usize,
                height: img.height() as usize,
                data: img.as_raw(),
            };
            let series = barscan_raster::extract_series(&view, &params)?;
            emit(&series)
        }
        Command::Vector { input, config } => {
            let params = match config {
                Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
                None => VectorParams::default(),
            };
            let text = fs::read_to_string(&input)?;
            let series = barscan_vector::extract_series(&text, &params)?;
            emit(&series)
        }
    }
}

fn emit(series: &DateSeries) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    write_csv(series, &mut lock)?;
    lock.flush()?;
    Ok(())
}
