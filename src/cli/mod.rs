use crate::interpreter::SessionConfig;
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vecrun")]
#[command(version, about = "Run dynamic array scripts and print the transcript", long_about = None)]
pub struct Cli {
    /// The array script to run
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Initial capacity of the array
    #[arg(short, long, default_value_t = dynarray::DEFAULT_CAPACITY)]
    pub capacity: usize,

    /// Elements per line for `print` without an explicit width
    #[arg(short, long, default_value_t = 10)]
    pub per_row: usize,

    /// Set verbose level
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            capacity: self.capacity,
            per_row: self.per_row,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
