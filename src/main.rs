mod cli;
mod tables;

use bpp::prelude::*;
use clap::{Parser, crate_version};
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Command};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .without_time()
        .compact()
        .init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::Parse(args) => args.run(),
        Command::Submit(args) => args.run()?,
        Command::Status(args) => args.run()?,
        Command::Reset(args) => args.run()?,
        Command::Predict(args) => args.run()?,
    }

    info!("done!");
    Ok(())
}
