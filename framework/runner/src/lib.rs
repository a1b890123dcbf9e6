mod aggregate;
mod cli;
mod console;
mod host_id;
mod init;
mod launcher;
mod measure;
mod progress;
mod publish;
mod run;
mod scenario;
mod types;

pub mod prelude {
    pub use crate::aggregate::execute_scenarios;
    pub use crate::cli::ForkbenchCli;
    pub use crate::init::init;
    pub use crate::run::{run, run_main, run_suite};
    pub use crate::scenario::ScenarioSelector;
    pub use crate::types::ForkbenchResult;
    pub use forkbench_core::prelude::*;
    pub use forkbench_report_model::{Run, Scenario, VM_KEY};
}
