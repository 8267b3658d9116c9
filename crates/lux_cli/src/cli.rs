use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels usable as clap values.
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments structure using clap derive macros
#[derive(Parser)]
#[command(name = "lux")]
#[command(about = "An offline Monte Carlo path tracer")]
pub struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Number of samples per pixel
    #[arg(long, short = 's', default_value_t = 100)]
    pub samples_per_pixel: u32,

    /// Maximum ray bounce depth
    #[arg(long, default_value_t = 50)]
    pub max_depth: u32,

    /// Seed for scene and render generators (drawn from entropy when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output file path (.png for 8-bit PNG, anything else writes binary PPM)
    #[arg(short, long, default_value = "out.ppm")]
    pub output: String,

    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: LogLevel,
}
