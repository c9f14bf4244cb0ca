pub mod callbacks;
pub mod config;
pub mod division;
pub mod error;
pub mod factory;
pub mod meter;
pub mod pattern;
pub mod pipeline;
pub mod report;
pub mod sequence;
pub mod threading;
pub mod timespan;

pub use callbacks::{
    DivisionCallback, FuseByCountsCallback, FuseCounts, Remainder, SplitByDurationsCallback,
    SplitByRoundedRatiosCallback,
};
pub use config::Plan;
pub use division::Division;
pub use error::*;
pub use meter::{MeterClass, MeterClassifier, StandardMeterClassifier};
pub use pipeline::{DivisionPipeline, PipelineOutput, Step};
pub use report::Report;
pub use sequence::DivisionSequence;
pub use timespan::{Offset, Timespan};

/// Run a YAML division plan and render the flattened result as YAML.
/// This is the main entry point for the library.
pub fn run_plan(source: &str) -> Result<String, BacaError> {
    let output = Plan::from_yaml(source)?.run()?;
    Report::new(&output, false).to_yaml()
}

/// Like [`run_plan()`], also listing the subsequences left by the last step
pub fn run_plan_nested(source: &str) -> Result<String, BacaError> {
    let output = Plan::from_yaml(source)?.run()?;
    Report::new(&output, true).to_yaml()
}
