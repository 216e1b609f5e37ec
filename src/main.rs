mod browser;
mod cli;
mod command;
mod config;
mod logic;
mod model;
mod parser;
mod sample;
mod storage;

use std::process;

use tracing_subscriber::EnvFilter;

fn main() {
    // stdout carries command feedback; logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env("TAHUB_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = cli::run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
