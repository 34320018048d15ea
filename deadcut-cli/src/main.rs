// deadcut-cli/src/main.rs
//
// Entry point for the deadcut binary: parses arguments, sets up logging,
// runs the batch, and maps failure to exit code 1.

use clap::Parser;
use deadcut_cli::{Cli, logging, run};
use deadcut_core::terminal_output::print_error;
use std::process;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(&cli) {
        print_error("deadcut failed", &e.to_string(), None);
        process::exit(1);
    }
}
