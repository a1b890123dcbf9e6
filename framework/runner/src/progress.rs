use std::io::{self, Write};

use forkbench_report_model::Scenario;

const RETURN: &str = "\r";
const LINE_WIDTH: usize = 80;
// Leaves room for the "nn% " prefix and the measurement suffix within LINE_WIDTH columns.
const DESCRIPTION_WIDTH: usize = 63;

/// Renders a single continuously-overwritten progress line while scenarios run.
///
/// The line is rewritten in place with a carriage return before each render and blanked once the
/// run completes, so it never survives into the final report. Purely presentational; it has no
/// bearing on the aggregated results.
pub(crate) struct ProgressReporter<W: Write> {
    out: W,
}

impl ProgressReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ProgressReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Render the percentage complete and the scenario about to run.
    pub fn before_measurement(
        &mut self,
        index: usize,
        total: usize,
        scenario: &Scenario,
    ) -> io::Result<()> {
        let percent_done = index as f64 / total as f64 * 100.0;
        let description: String = scenario.to_string().chars().take(DESCRIPTION_WIDTH).collect();
        write!(
            self.out,
            "{}{:2.0}% {:<width$}",
            RETURN,
            percent_done,
            description,
            width = DESCRIPTION_WIDTH
        )?;
        self.out.flush()
    }

    /// Append the finished scenario's measurement to the current line.
    pub fn after_measurement(&mut self, nanos_per_trial: f64) -> io::Result<()> {
        write!(self.out, " {:10.0}ns", nanos_per_trial)?;
        self.out.flush()
    }

    /// Blank the progress line so no stale text remains once the report is printed.
    pub fn clear(&mut self) -> io::Result<()> {
        write!(self.out, "{}{:width$}{}", RETURN, "", RETURN, width = LINE_WIDTH)?;
        self.out.flush()
    }
}
