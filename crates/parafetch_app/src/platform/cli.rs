use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

/// Submit download jobs to a parallel-fetcher service and watch their progress.
///
/// Type a URL and press Enter to submit it. The task list refreshes every
/// five seconds. Press Ctrl-C to quit.
#[derive(Parser, Debug)]
#[command(name = "parafetch")]
#[command(version)]
#[command(about = "Submit download jobs and watch their progress", long_about = None)]
pub struct Cli {
    /// Base URL of the download service
    #[arg(long, value_name = "URL")]
    #[arg(default_value = "http://localhost:8080")]
    #[arg(value_hint = clap::ValueHint::Url)]
    pub api_base: String,

    /// Log file
    #[arg(long, value_name = "FILE")]
    #[arg(default_value = "parafetch.log")]
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub log_file: PathBuf,

    /// Also write log output to the terminal
    #[arg(long)]
    pub log_to_terminal: bool,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}
