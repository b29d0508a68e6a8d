use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels usable as a clap ValueEnum
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
#[command(name = "raypath")]
#[command(about = "A simple sphere ray tracer writing PPM images")]
pub struct Args {
    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Image width in pixels
    #[arg(long, short = 'w', default_value = "400", help = "Image width in pixels")]
    pub width: u32,

    /// Image aspect ratio (width / height)
    #[arg(long, default_value = "1.7777778", help = "Image aspect ratio (width / height)")]
    pub aspect_ratio: f32,

    /// Number of samples per pixel
    #[arg(long, short = 's', default_value = "100", help = "Number of samples per pixel")]
    pub samples_per_pixel: u32,

    /// Maximum number of ray bounces
    #[arg(long, short = 'd', default_value = "50", help = "Maximum number of ray bounces")]
    pub max_depth: u32,

    /// Seed for the random sampler; same seed gives identical output
    #[arg(long, help = "Seed for the random sampler; same seed gives identical output")]
    pub seed: Option<u64>,

    /// Output file path for the PPM image, or "-" for stdout
    #[arg(
        short,
        long,
        default_value = "output.ppm",
        help = "Output file path for the PPM image, or \"-\" for stdout"
    )]
    pub output: String,
}
