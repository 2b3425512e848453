//! SchemaForge
//!
//! Compiles entity-relationship diagrams into ordered Laravel migrations and
//! enum classes.
//!
//! This is the main entry point for the command-line application.

mod logging;

use std::process::ExitCode;

use clap::Parser;
use schemaforge_cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    logging::init_tracing(cli.verbose);
    tracing::debug!(version = schemaforge_cli::VERSION, "starting schemaforge");

    schemaforge_cli::run(cli)
}
