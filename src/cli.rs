// src/cli.rs

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "mlbb-coach-server",
    version,
    about = "Backend for a Mobile Legends companion app: AI counter picks with Gemini key rotation and local fallbacks"
)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", env = "CONFIG_PATH")]
    pub config: Option<PathBuf>,

    /// Server port (overrides configuration)
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Log level filter
    #[arg(short, long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,

    /// Enable JSON logging
    #[arg(long, env = "JSON_LOGS")]
    pub json_logs: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
