use std::time::Duration;

use anyhow::Context;
use forkbench_report_model::Run;

use crate::types::ForkbenchResult;

/// Destination value that disables result posting entirely.
pub(crate) const DISABLE_POSTING: &str = "none";

const POST_TIMEOUT: Duration = Duration::from_secs(30);

/// Post a finished run to the remote collector.
///
/// A destination of [DISABLE_POSTING] performs no HTTP activity at all. A non-200 response is
/// reported to the user but is not an error; the run has already been displayed. Transport
/// failures are fatal.
pub(crate) fn post_results(run: &Run, post_host: &str) -> ForkbenchResult<()> {
    if post_host == DISABLE_POSTING {
        log::debug!("Result posting is disabled");
        return Ok(());
    }

    let url = format!("{}{}/{}", post_host, run.executed_by_uuid(), run.suite_name());
    log::info!("Posting results to {}", url);

    let client = reqwest::blocking::Client::builder()
        .timeout(POST_TIMEOUT)
        .build()
        .context("Failed to create HTTP client")?;

    let response = client
        .post(&url)
        .json(run)
        .send()
        .with_context(|| format!("Failed to post results to {}", url))?;

    if response.status() == reqwest::StatusCode::OK {
        println!();
        println!("View current and previous benchmark results online:");
        println!("  {}", url);
        return Ok(());
    }

    let status = response.status();
    let body = response
        .text()
        .context("Failed to read the collector's response body")?;
    eprintln!("Posting to {} failed: {}", post_host, status);
    eprintln!("{}", body);

    Ok(())
}
