//! Command line interface.

pub mod command;

use std::{env, path::PathBuf, time::Duration};

use clap::{value_parser, ArgAction, Parser};
use indicatif::ProgressBar;
use tracing_subscriber::EnvFilter;

use cavelink::DEFAULT_BASE_URL;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
/// Download data from the Cave-Link API and write it to a CSV file.
pub struct Cli {
    /// Station ID
    #[arg(short, long, default_value_t = 106, value_parser = value_parser!(u32).range(1..))]
    pub station: u32,

    /// Group ID
    #[arg(short, long, default_value_t = 1)]
    pub group: u32,

    /// Number of rows to download per metric
    #[arg(short, long, default_value_t = 10, value_parser = value_parser!(u32).range(1..))]
    pub length: u32,

    /// Output file [default: <temp dir>/cavelink.csv]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// TOML metric catalog to use instead of the built-in Môtiers one
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Cave-Link data endpoint
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Download all metrics of the group at once
    #[arg(long)]
    pub parallel: bool,

    /// More log output (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| env::temp_dir().join("cavelink.csv"))
    }
}

/// Sets up logging to stderr. The level comes from `-v` only.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("cavelink={}", level)))
        .with_writer(std::io::stderr)
        .init();
}

/// Creates a spinner.
pub fn create_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}

// -- Tests -------------------------------------------------------------------
