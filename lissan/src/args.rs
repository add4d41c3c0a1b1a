use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;

/// Lissan voice gateway
#[derive(Debug, Parser)]
#[command(name = "lissan", about = "Amharic voice and text gateway for LLM, translation, and speech vendors")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "lissan.toml", env = "LISSAN_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "LISSAN_LISTEN")]
    pub listen: Option<SocketAddr>,
}
