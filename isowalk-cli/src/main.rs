//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use isowalk_cli::CliError;

fn main() {
    env_logger::init();
    match isowalk_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("isowalk: {err}");
            std::process::exit(1);
        }
    }
}
