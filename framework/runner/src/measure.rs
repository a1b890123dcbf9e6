use forkbench_core::prelude::ConfigurationError;

use crate::launcher::ChildOutput;
use crate::types::ForkbenchResult;

/// Outcome of reading a child's combined output against the single-numeric-line protocol.
///
/// A well-behaved child prints exactly one line, a non-negative decimal number of nanoseconds
/// per trial, and then exits silently. Anything else is a protocol violation.
#[derive(Debug, PartialEq)]
pub(crate) enum Extraction {
    Success(f64),
    Malformed { diagnostic: String },
    NoOutput,
}

pub(crate) fn extract(output: &ChildOutput) -> Extraction {
    if output.stdout.is_empty() && output.stderr.is_empty() {
        return Extraction::NoOutput;
    }

    let mut lines = output.stdout.lines();
    let first_line = lines.next().unwrap_or_default();

    let nanos_per_trial = first_line
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n >= 0.0);

    if let Some(nanos_per_trial) = nanos_per_trial {
        if lines.next().is_none() && output.stderr.is_empty() {
            return Extraction::Success(nanos_per_trial);
        }
    }

    let diagnostic = output
        .stdout
        .lines()
        .chain(output.stderr.lines())
        .collect::<Vec<_>>()
        .join("\n");
    Extraction::Malformed { diagnostic }
}

/// Interpret a child's output as a measurement, or fail with the command line and the child's
/// full output attached.
pub(crate) fn measure(command: &[String], output: &ChildOutput) -> ForkbenchResult<f64> {
    match extract(output) {
        Extraction::Success(nanos_per_trial) => Ok(nanos_per_trial),
        Extraction::NoOutput => Err(ConfigurationError::new(
            "Benchmark child process produced no output",
        )
        .with_command(command)
        .into()),
        Extraction::Malformed { diagnostic } => Err(ConfigurationError::new(format!(
            "Failed to execute {}",
            command.join(" ")
        ))
        .with_command(command)
        .with_diagnostic(diagnostic)
        .into()),
    }
}
