//! Utils

use clap::Parser;

/// Arguments for the basket examples
#[derive(Debug, Parser)]
pub struct ExampleBasketArgs {
    /// Fixture set to load items, coupons & session from
    #[clap(short, long, default_value = "kitchen")]
    pub fixture: String,

    /// Number of session steps to replay (defaults to all)
    #[clap(short = 'n', long)]
    pub steps: Option<usize>,

    /// Print a table instead of the plain report
    #[clap(short, long)]
    pub table: bool,
}
