// CLI module for wayfarer
// Author: kelexine (https://github.com/kelexine)

use clap::Parser;
use std::path::PathBuf;

/// wayfarer - travel insights, itineraries and translation over a generative text backend
#[derive(Parser, Debug)]
#[command(name = "wayfarer", version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file (defaults to ~/.wayfarer/config.toml)
    #[arg(short, long, env = "WAYFARER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the listen address
    #[arg(long)]
    pub host: Option<String>,

    /// Override the listen port
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl Args {
    /// Apply command-line overrides on top of loaded configuration.
    pub fn apply(&self, config: &mut crate::config::AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}
