//! tailpane - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Auto-following scroll pane for live log output
#[derive(Parser, Debug)]
#[command(name = "tailpane")]
#[command(version)]
#[command(about = "Tail a file or stdin in an auto-following scroll pane")]
pub struct Args {
    /// Path to a text file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// How close to the bottom still counts as "at bottom", in rows
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Start detached from the tail (no auto-follow until resumed)
    #[arg(long)]
    pub no_follow: bool,

    /// Disable line wrapping
    #[arg(long)]
    pub no_wrap: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Resolve configuration with the full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = tailpane::config::load_config_with_precedence(args.config.clone())?;
        let merged = tailpane::config::merge_config(config_file);
        let with_env = tailpane::config::apply_env_overrides(merged);
        tailpane::config::apply_cli_overrides(with_env, args.threshold, args.no_follow, args.no_wrap)
    };

    tailpane::logging::init(&config.log_file_path)?;

    info!(config = ?config, "configuration loaded and resolved");

    let input_source = tailpane::source::detect_input_source(args.file.clone())?;

    tailpane::view::run_with_source(input_source, &config)?;

    Ok(())
}
