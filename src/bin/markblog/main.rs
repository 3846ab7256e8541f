use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use spdlog::{info, warn};

use markblog::logger::configure_logger;
use markblog::server::server_run;

use crate::config::{generate_cfg, open_config};

mod config;
mod config_data;

const CFG_FILE_NAME: &str = "markblog.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,

    /// Log debug messages, whatever the configured level
    #[arg(short, long)]
    debug: bool,

    /// Write a sample configuration and exit
    #[arg(long)]
    write_sample_config: bool,
}

#[ntex::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config_path.map(PathBuf::from);

    if args.write_sample_config {
        let path = generate_cfg(config_path)?;
        println!("Sample config written to {}", path.display());
        return Ok(());
    }

    let config = match open_config(config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{:#}", err);
            eprintln!("Please run markblog --help");
            return Ok(());
        }
    };

    if let Err(err) = configure_logger(&config, args.debug) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    info!("Starting markblog =-=-=-=-=-=-=-=-=-=-=-=-=-=-=-");
    info!("Listening on {}:{}", config.server.address, config.server.port);

    server_run(config).await.context("Server stopped with an error")
}
