use clap::Parser;
use std::path::PathBuf;

use crate::config::ResponseMode;

#[derive(Parser, Debug)]
#[command(name = "avalfimult")]
#[command(version, about = "Fund viability scoring service", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    pub config: String,

    /// Listen address
    #[arg(short = 'l', long)]
    pub listen: Option<String>,

    /// Listen port
    #[arg(short = 'P', long)]
    pub port: Option<u16>,

    /// Directory holding the scaler and model artifacts
    #[arg(short, long)]
    pub models_dir: Option<PathBuf>,

    /// Response body on success: the verdict text or the raw label
    #[arg(short, long, value_enum)]
    pub response_mode: Option<ResponseMode>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
