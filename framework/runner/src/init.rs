use crate::cli::ForkbenchCli;
use clap::Parser;

/// Initialise logging and parse the command line for the Forkbench runner.
pub fn init() -> ForkbenchCli {
    env_logger::init();

    ForkbenchCli::parse()
}
