use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod cube_app;
mod frame_clock;
mod input;

use crate::{
    config::{AppConfig, Cli},
    cube_app::CubeApp,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("cube_bootstrap starting");

    let config = AppConfig::from(&cli);
    let mut app = CubeApp::new(config.width, config.height);
    app::run(&mut app, &config)
}
