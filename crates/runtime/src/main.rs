#![deny(clippy::all, clippy::pedantic)]
//! # Bridge Runtime
//!
//! Headless driver for a bridge run: picks a design, builds the world and
//! feeds it fixed frame times until the train wins, crashes or times out.
//! With `--snapshots` every frame is printed to stdout as one JSON line.

mod app;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = app::Args::parse();
    app::run(&args)
}
