use crate::types::ForkbenchResult;
use forkbench_report_model::Scenario;

/// Produces the ordered list of scenarios for a run.
///
/// The runner treats the list as opaque input: scenarios are executed in exactly the order
/// returned here, and the run's result mapping preserves that order. The list must not contain
/// duplicate scenarios; a duplicate selection is rejected before any scenario is executed.
pub trait ScenarioSelector {
    fn select(&self) -> ForkbenchResult<Vec<Scenario>>;
}

impl ScenarioSelector for Vec<Scenario> {
    fn select(&self) -> ForkbenchResult<Vec<Scenario>> {
        Ok(self.clone())
    }
}
