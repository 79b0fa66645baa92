use clap::Parser;
use spdl_core::logging;

mod cli;

use crate::cli::{Cli, Interrupted};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging as early as possible; fall back to stderr if the
    // state dir is unusable.
    if let Err(err) = logging::init_logging(cli.verbose) {
        logging::init_logging_stderr(cli.verbose);
        tracing::warn!("file logging unavailable: {:#}", err);
    }

    if let Err(err) = cli.run().await {
        if err.downcast_ref::<Interrupted>().is_some() {
            eprintln!("\n[ABORTED] Interrupted.");
            std::process::exit(130);
        }
        eprintln!("\nspdl error: {:#}", err);
        std::process::exit(1);
    }
}
