mod actions;
mod app;
mod cli;
mod config;
mod page;
#[cfg(not(tarpaulin_include))]
mod tui;
mod utils;

use app::App;
use clap::Parser;
use color_eyre::eyre::{Context, Result};
use dotenv::dotenv;

#[cfg(not(tarpaulin_include))]
async fn run() -> Result<()> {
    use cli::ClapSource;

    let args = cli::Cli::parse();

    let config = crate::config::Config::new(Some(ClapSource::new(&args)))
        .context("Error when loading config")?;
    let config = trace_dbg!(level: tracing::Level::INFO, config);

    let mut app = App::new(
        &config,
        tui::Tui::new()?
            .tick_rate(args.tick_rate)
            .frame_rate(args.frame_rate)
            .into(),
    );

    app.run().await
}

#[tokio::main]
#[cfg(not(tarpaulin_include))]
async fn main() -> Result<()> {
    dotenv().ok();
    utils::errors::init()?;
    utils::logging::init()?;

    run().await
}
