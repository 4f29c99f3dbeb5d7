use std::process::ExitCode;

use env_logger::Env;
use log::debug;
use ofx2csv::{Config, cli, convert};

fn main() -> ExitCode {
    let args = cli::parse_args();

    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();
    debug!("{:?}", args);

    match Config::load(&args).and_then(|config| convert::run(&config)) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
