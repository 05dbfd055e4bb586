use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ludoteca-tui")]
#[command(about = "Terminal admin for the ludoteca board-game lending library", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Backend origin, e.g. http://localhost:8080
    #[arg(long)]
    pub backend_url: Option<String>,

    /// Config file to read and write instead of ~/.ludoteca-tui/config.json
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level
    #[arg(long, value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: Option<String>,
}
