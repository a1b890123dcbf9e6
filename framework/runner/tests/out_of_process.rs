//! End-to-end coverage of the out-of-process measurement pipeline using shell scripts as
//! stand-in benchmark children.

#![cfg(unix)]

use std::collections::BTreeMap;
use std::path::Path;

use forkbench_runner::prelude::{
    execute_scenarios, ConfigurationError, ForkbenchCli, Scenario, VM_KEY,
};
use tempfile::TempDir;

fn sample_cli() -> ForkbenchCli {
    ForkbenchCli {
        suite: "examples.ArraySortBenchmark".to_string(),
        warmup_millis: 10,
        run_millis: 10,
        post_host: "none".to_string(),
        classpath: Some(String::new()),
    }
}

fn child_script(dir: &Path, name: &str, body: &str) -> Scenario {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("failed to write script");
    Scenario::new(
        BTreeMap::from([(VM_KEY.to_string(), format!("sh {}", path.display()))]),
        BTreeMap::new(),
    )
}

#[test]
fn well_behaved_children_produce_a_run_in_input_order() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let a = child_script(dir.path(), "a.sh", "echo 1000.0");
    let b = child_script(dir.path(), "b.sh", "echo 2000.0");

    let run = execute_scenarios(&sample_cli(), vec![a.clone(), b.clone()])
        .expect("run should succeed");

    assert_eq!(run.len(), 2);
    assert_eq!(run.measurement(&a), Some(1000.0));
    assert_eq!(run.measurement(&b), Some(2000.0));
    let ordered: Vec<_> = run.results().map(|(scenario, _)| scenario.clone()).collect();
    assert_eq!(ordered, vec![a, b]);
}

#[test]
fn aggregation_is_idempotent_for_deterministic_children() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let scenario = child_script(dir.path(), "fixed.sh", "echo 1234.5");

    let first = execute_scenarios(&sample_cli(), vec![scenario.clone()])
        .expect("first run should succeed");
    let second = execute_scenarios(&sample_cli(), vec![scenario.clone()])
        .expect("second run should succeed");

    // Identical result mappings; timestamp is run identity, not measurement data.
    assert_eq!(
        first.results().collect::<Vec<_>>(),
        second.results().collect::<Vec<_>>()
    );
    assert_eq!(first.executed_by_uuid(), second.executed_by_uuid());
}

#[test]
fn a_child_with_extra_output_aborts_the_run() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let good = child_script(dir.path(), "good.sh", "echo 1000.0");
    let noisy = child_script(dir.path(), "noisy.sh", "echo 42\necho garbage");

    let err = execute_scenarios(&sample_cli(), vec![good, noisy]).unwrap_err();

    let configuration = err
        .downcast_ref::<ConfigurationError>()
        .expect("expected a configuration error");
    let diagnostic = configuration.diagnostic().expect("diagnostic was captured");
    assert!(diagnostic.contains("42"));
    assert!(diagnostic.contains("garbage"));
}

#[test]
fn a_child_writing_to_stderr_aborts_the_run() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let scenario = child_script(
        dir.path(),
        "stderr.sh",
        "echo 1000.0\necho 'benchmark setup failed' >&2",
    );

    let err = execute_scenarios(&sample_cli(), vec![scenario]).unwrap_err();

    let configuration = err
        .downcast_ref::<ConfigurationError>()
        .expect("expected a configuration error");
    assert!(configuration
        .diagnostic()
        .expect("diagnostic was captured")
        .contains("benchmark setup failed"));
}

#[test]
fn a_silent_child_aborts_the_run() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let scenario = child_script(dir.path(), "silent.sh", "exit 0");

    let err = execute_scenarios(&sample_cli(), vec![scenario]).unwrap_err();

    let configuration = err
        .downcast_ref::<ConfigurationError>()
        .expect("expected a configuration error");
    assert!(configuration.message().contains("no output"));
}

#[test]
fn the_child_receives_the_protocol_arguments() {
    // The script reverses the protocol: it prints its arguments, which must make the run fail,
    // and the diagnostic must show the timing flags and suite name that were passed.
    let dir = TempDir::new().expect("failed to create temp dir");
    let scenario = child_script(dir.path(), "args.sh", "echo \"$@\"");

    let err = execute_scenarios(&sample_cli(), vec![scenario]).unwrap_err();

    let configuration = err
        .downcast_ref::<ConfigurationError>()
        .expect("expected a configuration error");
    let diagnostic = configuration.diagnostic().expect("diagnostic was captured");
    assert!(diagnostic.contains("--warmupMillis 10"));
    assert!(diagnostic.contains("--runMillis 10"));
    assert!(diagnostic.contains("examples.ArraySortBenchmark"));
}
