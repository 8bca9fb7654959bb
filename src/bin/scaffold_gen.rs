use std::process::ExitCode;

use scaffoldgen::cli::run_cli;
use scaffoldgen::logging::{init_logging, LogConfig};

fn main() -> ExitCode {
    if let Err(e) = init_logging(&LogConfig::from_env()) {
        eprintln!("⚠️  {e:#}");
    }

    match run_cli() {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
