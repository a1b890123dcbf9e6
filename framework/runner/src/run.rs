use clap::Parser;
use forkbench_core::prelude::{ConfigurationError, DisplayableError, UserCodeError};

use crate::aggregate::execute_scenarios;
use crate::cli::ForkbenchCli;
use crate::console;
use crate::init::init;
use crate::publish;
use crate::scenario::ScenarioSelector;
use crate::types::ForkbenchResult;

/// Execute a full benchmark run: measure every selected scenario, print the report and post the
/// results to the configured collector.
pub fn run(cli: ForkbenchCli, selector: &dyn ScenarioSelector) -> ForkbenchResult<()> {
    log::info!("Running benchmark suite: {}", cli.suite);

    let scenarios = selector.select()?;
    let run = execute_scenarios(&cli, scenarios)?;

    console::display_results(&run);
    publish::post_results(&run, &cli.post_host)?;

    Ok(())
}

/// Convenience entry point for a suite binary: appends the suite name to the argument list and
/// delegates to [run]. Pure argument-list composition, no independent logic.
pub fn run_suite(
    suite: &str,
    args: &[String],
    selector: &dyn ScenarioSelector,
) -> ForkbenchResult<()> {
    let argv = std::iter::once("forkbench".to_string())
        .chain(args.iter().cloned())
        .chain(std::iter::once(suite.to_string()));
    let cli = ForkbenchCli::try_parse_from(argv)?;
    run(cli, selector)
}

/// Process entry point: parse the command line, run, and exit.
///
/// Failures that know how to present themselves are displayed and turn into a non-zero exit;
/// anything else is reported with its full error chain before exiting non-zero.
pub fn run_main(selector: &dyn ScenarioSelector) {
    let cli = init();
    if let Err(e) = run(cli, selector) {
        exit_with(e);
    }
}

fn exit_with(e: anyhow::Error) -> ! {
    if let Some(configuration) = e.downcast_ref::<ConfigurationError>() {
        configuration.display();
    } else if let Some(user_code) = e.downcast_ref::<UserCodeError>() {
        user_code.display();
    } else {
        eprintln!("{:?}", e);
    }
    std::process::exit(1);
}
