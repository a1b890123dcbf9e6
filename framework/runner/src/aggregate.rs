use std::collections::HashSet;
use std::io::Write;

use anyhow::Context;
use chrono::Utc;
use forkbench_core::prelude::{ConfigurationError, UserCodeError};
use forkbench_report_model::{Run, RunBuilder, Scenario};

use crate::cli::ForkbenchCli;
use crate::host_id;
use crate::launcher;
use crate::measure;
use crate::progress::ProgressReporter;
use crate::types::ForkbenchResult;

/// Execute every scenario in order, each in its own child process, and aggregate the
/// measurements into an immutable [Run].
///
/// Scenarios run strictly sequentially; a child is started, fully drained and observed to exit
/// before the next one begins, so that concurrent load never corrupts timing results. The first
/// failure aborts the whole run and no partial result set is produced.
pub fn execute_scenarios(cli: &ForkbenchCli, scenarios: Vec<Scenario>) -> ForkbenchResult<Run> {
    let executed_by_uuid = host_id::executed_by_uuid()?;
    execute_with_progress(
        cli,
        scenarios,
        &mut ProgressReporter::stdout(),
        executed_by_uuid,
    )
}

pub(crate) fn execute_with_progress<W: Write>(
    cli: &ForkbenchCli,
    scenarios: Vec<Scenario>,
    progress: &mut ProgressReporter<W>,
    executed_by_uuid: String,
) -> ForkbenchResult<Run> {
    reject_duplicates(&scenarios)?;

    let executed_at = Utc::now();
    let total = scenarios.len();
    let mut builder = RunBuilder::new();

    log::info!(
        "Measuring {} scenario(s) for suite {}",
        total,
        cli.suite
    );

    for (index, scenario) in scenarios.into_iter().enumerate() {
        progress
            .before_measurement(index, total, &scenario)
            .context("Failed to render progress")?;

        let nanos_per_trial = execute_forked(cli, &scenario)?;

        progress
            .after_measurement(nanos_per_trial)
            .context("Failed to render progress")?;
        builder.record(scenario, nanos_per_trial)?;
    }

    progress.clear().context("Failed to clear progress")?;

    Ok(builder.build(cli.suite.clone(), executed_by_uuid, executed_at))
}

/// Measure one scenario in an isolated child process.
///
/// Configuration failures (a violated child protocol, an unstartable child) propagate as they
/// are. Anything else raised while executing the scenario is attributed to the benchmark code.
fn execute_forked(cli: &ForkbenchCli, scenario: &Scenario) -> ForkbenchResult<f64> {
    let step = || {
        let command = launcher::build_command(cli, scenario)?;
        let output = launcher::launch(&command)?;
        measure::measure(&command, &output)
    };

    match step() {
        Ok(nanos_per_trial) => Ok(nanos_per_trial),
        Err(e) if e.is::<ConfigurationError>() => Err(e),
        Err(e) => Err(UserCodeError::new(e).into()),
    }
}

fn reject_duplicates(scenarios: &[Scenario]) -> ForkbenchResult<()> {
    let mut seen = HashSet::new();
    for scenario in scenarios {
        if !seen.insert(scenario) {
            return Err(ConfigurationError::new(format!(
                "Duplicate scenario in selection: {}",
                scenario
            ))
            .into());
        }
    }
    Ok(())
}
