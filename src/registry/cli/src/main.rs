pub mod logger;

use std::process::ExitCode;

use registry_cli::cli::Cli;

fn main() -> ExitCode {
    if let Err(e) = logger::setup_logger() {
        eprintln!("Error: failed to set up logging: {e}");
        return ExitCode::FAILURE;
    }

    Cli::execute()
}
