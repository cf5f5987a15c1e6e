use ytthumb_core::logging;

mod cli;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() {
    // File log under the XDG state dir, stderr if that fails.
    logging::init();

    if let Err(err) = CliCommand::run_from_args().await {
        eprintln!("ytthumb error: {:#}", err);
        std::process::exit(1);
    }
}
