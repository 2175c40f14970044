// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "pipes")]
#[command(about = "Headless pipe builder: replays scripted edits and camera moves", long_about = None)]
pub struct Cli {
    /// Scene config (JSON); built-in defaults when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Action script (JSON list of {"frame", "action"} steps)
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 600)]
    pub frames: u32,

    /// Seconds per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    pub dt: f32,

    /// Seed for camera shake
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Only print the final summary
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}
