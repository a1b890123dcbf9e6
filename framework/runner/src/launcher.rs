use std::process::{Command, Stdio};

use forkbench_core::prelude::ConfigurationError;
use forkbench_report_model::{Scenario, VM_KEY};

use crate::cli::ForkbenchCli;
use crate::types::ForkbenchResult;

/// Identifier of the in-child measurement entry point. The child resolves this against the
/// configured classpath, runs its warmup and measurement loops, and prints a single numeric
/// result line.
pub(crate) const MEASUREMENT_ENTRY_POINT: &str = "forkbench.worker.InProcessRunner";

/// The captured combined output of one finished child process.
#[derive(Debug)]
pub(crate) struct ChildOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Build the full child command line for a scenario.
///
/// Token order is part of the child protocol: VM invocation tokens, classpath, the measurement
/// entry point, timing flags, one `-Dkey=value` flag per scenario parameter, then the suite name.
pub(crate) fn build_command(
    cli: &ForkbenchCli,
    scenario: &Scenario,
) -> ForkbenchResult<Vec<String>> {
    let vm = scenario.vm().ok_or_else(|| {
        ConfigurationError::new(format!(
            "Scenario has no '{}' variable, so no child process can be started: {}",
            VM_KEY, scenario
        ))
    })?;

    let mut command: Vec<String> = vm.split_whitespace().map(str::to_string).collect();
    if command.is_empty() {
        return Err(ConfigurationError::new(format!(
            "Scenario has an empty '{}' variable: {}",
            VM_KEY, scenario
        ))
        .into());
    }

    command.push("-cp".to_string());
    command.push(classpath(cli));
    command.push(MEASUREMENT_ENTRY_POINT.to_string());
    command.push("--warmupMillis".to_string());
    command.push(cli.warmup_millis.to_string());
    command.push("--runMillis".to_string());
    command.push(cli.run_millis.to_string());
    for (key, value) in scenario.parameters() {
        command.push(format!("-D{}={}", key, value));
    }
    command.push(cli.suite.clone());

    Ok(command)
}

fn classpath(cli: &ForkbenchCli) -> String {
    cli.classpath
        .clone()
        .or_else(|| std::env::var("CLASSPATH").ok())
        .unwrap_or_default()
}

/// Start one child process for a scenario and block until it exits with its output fully drained.
///
/// The child inherits the parent's working directory. Both output streams are captured so that
/// failure diagnostics written to stderr are never lost.
pub(crate) fn launch(command: &[String]) -> ForkbenchResult<ChildOutput> {
    log::debug!("Launching scenario child: {:?}", command);

    let output = Command::new(&command[0])
        .args(&command[1..])
        .stdin(Stdio::null())
        .output()
        .map_err(|e| {
            ConfigurationError::new(format!("Failed to start benchmark child process: {}", e))
                .with_command(command)
        })?;

    log::debug!("Scenario child exited with status: {}", output.status);

    Ok(ChildOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}
