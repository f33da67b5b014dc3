//! Basket Example
//!
//! This example replays a scripted basket session and prints the resulting basket.
//!
//! Use `-f` to load a fixture set by name
//! Use `-n` to specify the number of session steps to replay
//! Use `-t` to print a table instead of the plain report
//!
//! Set `RUST_LOG=basket_history=debug` to trace every snapshot.

use std::io;

use anyhow::Result;

use basket_history::{fixtures::Fixture, report, utils::ExampleBasketArgs};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Basket Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = ExampleBasketArgs::parse();

    let fixture = Fixture::from_set(&args.fixture)?;
    let mut history = fixture.history()?;

    fixture.replay(&mut history, args.steps)?;

    if args.table {
        let stdout = io::stdout();

        report::write_table(stdout.lock(), history.current())?;
    } else {
        print!("{}", history.report()?);
    }

    println!(
        "\nSnapshot {} of {} (undo: {}, redo: {})",
        history.position(),
        history.len() - 1,
        history.has_undo(),
        history.has_redo()
    );

    Ok(())
}
