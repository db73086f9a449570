use clap::Parser;
use color_eyre::eyre::Result;
use log::*;

use pkgrel::{ReleaseOutcome, cli::Args, command};

fn initialize_logger(debug: bool) -> pkgrel::Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("pkgrel")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    initialize_logger(args.debug)?;

    if args.list {
        command::list::execute(&args).await?;
        return Ok(());
    }

    if let ReleaseOutcome::Cancelled = command::release::execute(&args).await? {
        info!("nothing was released");
    }

    Ok(())
}
