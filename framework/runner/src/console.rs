use forkbench_report_model::Run;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct ResultRow {
    scenario: String,
    #[tabled(display = "float0")]
    nanos_per_trial: f64,
}

fn float0(n: &f64) -> String {
    format!("{:.0}", n)
}

/// Print the final report for a run: one row per scenario, in execution order.
pub(crate) fn display_results(run: &Run) {
    println!(
        "Results for {} executed at {}",
        run.suite_name(),
        run.executed_at().to_rfc3339()
    );

    let rows = run
        .results()
        .map(|(scenario, nanos_per_trial)| ResultRow {
            scenario: scenario.to_string(),
            nanos_per_trial,
        })
        .collect::<Vec<_>>();

    let mut table = Table::new(rows);
    table.with(Style::modern());

    println!("{table}");
}
