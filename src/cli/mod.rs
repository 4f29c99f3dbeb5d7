//! Command-line arguments for the `ofx2csv` binary.

mod args;

pub use args::CliArgs;

use clap::Parser;

/// Parse command-line arguments using clap
///
/// Invalid arguments, a missing input file or `--help` make clap print its
/// message and exit the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
