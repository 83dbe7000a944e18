// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "remote-canvas")]
#[command(about = "Remote framebuffer viewer", long_about = None)]
pub struct Cli {
    /// Viewer configuration file (JSON)
    #[arg(long = "config")]
    pub config: Option<PathBuf>,

    /// Start with synthetic framebuffer updates suspended
    #[arg(long = "paused", default_value = "false")]
    pub paused: bool,
}
