use anyhow::bail;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::io::{Read, Write};

/// The distinguished scenario variable holding the command line used to start the measuring
/// process. Its value is split on whitespace to form the leading tokens of the child command.
pub const VM_KEY: &str = "vm";

/// One concrete benchmark configuration to be measured once.
///
/// A scenario is identified by its value: two scenarios with equal variables and parameters are
/// the same scenario. They are used as keys in the run's result mapping, so a scenario selection
/// must not contain duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Scenario {
    variables: BTreeMap<String, String>,
    parameters: BTreeMap<String, String>,
}

impl Scenario {
    pub fn new(variables: BTreeMap<String, String>, parameters: BTreeMap<String, String>) -> Self {
        Self {
            variables,
            parameters,
        }
    }

    /// Run-level variables, including the [VM_KEY] invocation under which the child runs.
    pub fn variables(&self) -> &BTreeMap<String, String> {
        &self.variables
    }

    /// Benchmark parameters, injected into the child as `-Dkey=value` configuration.
    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }

    /// The VM invocation for this scenario, if one was configured.
    pub fn vm(&self) -> Option<&str> {
        self.variables.get(VM_KEY).map(String::as_str)
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, value) in self.variables.iter().chain(self.parameters.iter()) {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{}={}", key, value)?;
            first = false;
        }
        Ok(())
    }
}

/// One measured scenario: the scenario and its nanoseconds-per-trial measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario: Scenario,
    pub nanos_per_trial: f64,
}

/// The complete, immutable record of one invocation of the orchestrator.
///
/// The result mapping preserves execution order: iterating [Run::results] yields scenarios in
/// exactly the order they were run. A run only exists once every selected scenario has been
/// measured; there are no partial runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    results: Vec<ScenarioResult>,
    suite_name: String,
    executed_by_uuid: String,
    executed_at: DateTime<Utc>,
}

impl Run {
    /// The measured scenarios, in execution order.
    pub fn results(&self) -> impl Iterator<Item = (&Scenario, f64)> {
        self.results
            .iter()
            .map(|result| (&result.scenario, result.nanos_per_trial))
    }

    /// Look up the measurement recorded for a scenario.
    pub fn measurement(&self, scenario: &Scenario) -> Option<f64> {
        self.results
            .iter()
            .find(|result| &result.scenario == scenario)
            .map(|result| result.nanos_per_trial)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// The fully-qualified name of the benchmark suite that was run.
    pub fn suite_name(&self) -> &str {
        &self.suite_name
    }

    /// The UUID of the executing host.
    pub fn executed_by_uuid(&self) -> &str {
        &self.executed_by_uuid
    }

    /// The wall-clock time at which execution began.
    pub fn executed_at(&self) -> DateTime<Utc> {
        self.executed_at
    }
}

/// Append-only accumulator for a run's results.
///
/// Owned exclusively by the aggregation loop; frozen into an immutable [Run] once every scenario
/// has completed.
#[derive(Debug, Default)]
pub struct RunBuilder {
    results: Vec<ScenarioResult>,
}

impl RunBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the measurement for a scenario.
    ///
    /// Fails if the scenario has already been recorded. Equal scenarios would collide in the
    /// result mapping, so a duplicate is a defect in the selection, not data to be merged.
    pub fn record(&mut self, scenario: Scenario, nanos_per_trial: f64) -> anyhow::Result<()> {
        if self.results.iter().any(|result| result.scenario == scenario) {
            bail!("Scenario was measured twice: {}", scenario);
        }
        self.results.push(ScenarioResult {
            scenario,
            nanos_per_trial,
        });
        Ok(())
    }

    pub fn build(
        self,
        suite_name: String,
        executed_by_uuid: String,
        executed_at: DateTime<Utc>,
    ) -> Run {
        Run {
            results: self.results,
            suite_name,
            executed_by_uuid,
            executed_at,
        }
    }
}

/// Serialize a run to a writer as JSON.
pub fn store_run<W: Write>(run: &Run, writer: &mut W) -> anyhow::Result<()> {
    serde_json::to_writer(writer, run)?;
    Ok(())
}

/// Load a run from a reader.
pub fn load_run<R: Read>(reader: R) -> anyhow::Result<Run> {
    let reader = std::io::BufReader::new(reader);
    let run: Run = serde_json::from_reader(reader)?;
    Ok(run)
}
