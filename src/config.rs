//! # Division Plans
//!
//! A plan is a YAML document naming the input divisions and the pipeline steps
//! to run over them. It is read in two stages: serde fills the `Raw*` structs
//! (kebab-case keys, fractions as `"n/d"` strings), then [`Plan::from_yaml()`]
//! validates them into typed callbacks. Every problem found on the way is a
//! [`BacaError::PlanError`] or, for valid syntax with invalid values, the
//! callback's own [`BacaError::ConfigurationError`].
//!
//! ## Format
//! ```yaml
//! divisions: ["5/8", "6/8", { pair: "3/4", payload: coda }]
//! start-offset: "0"
//! steps:
//!   - split-by-durations:
//!       durations: ["1/4"]
//!       cyclic: true
//!       remainder: left
//!       remainder-fuse-threshold: "1/8"
//!       compound-meter-multiplier: "3/2"
//!       pattern-rotation-index: -1
//!   - fuse-by-counts: { counts: [2, 1], cyclic: false }
//!   - split-by-rounded-ratios: { ratios: [[1, 1], [2, 1]] }
//!   - compound-quarter-divisions
//!   - strict-quarter-divisions
//!   - fuse-compound-quarter-divisions: [2]
//!   - rotate: 1
//!   - flatten
//! ```
//!
//! `counts` may also be the word `infinite`.
//!
//! ## Example
//! ```rust
//! use baca::Plan;
//!
//! let plan = Plan::from_yaml(r#"
//! divisions: ["5/8"]
//! steps:
//!   - split-by-durations: { durations: ["1/4"], cyclic: true }
//! "#)?;
//! let output = plan.run()?;
//! assert_eq!(output.divisions.len(), 3);
//! # Ok::<(), baca::BacaError>(())
//! ```

use crate::callbacks::{
    FuseByCountsCallback, FuseCounts, Remainder, SplitByDurationsCallback,
    SplitByRoundedRatiosCallback,
};
use crate::division::Division;
use crate::error::BacaError;
use crate::factory;
use crate::pipeline::{DivisionPipeline, PipelineOutput, Step};
use crate::sequence::DivisionSequence;
use crate::timespan::Offset;
use log::debug;
use serde::Deserialize;

/// Fraction written as `"n/d"`, `"n"` or a bare integer
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum RawFraction {
    Whole(i64),
    Text(String),
}

/// Input division, bare or with a payload
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum RawDivision {
    Bare(RawFraction),
    Labeled {
        pair: RawFraction,
        payload: Option<String>,
    },
}

/// Raw plan for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RawPlan {
    #[serde(default)]
    pub divisions: Vec<RawDivision>,
    pub start_offset: Option<RawFraction>,
    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    pub steps: Vec<RawStep>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "kebab-case")]
pub enum RawStep {
    SplitByDurations(RawSplitByDurations),
    SplitByRoundedRatios(RawSplitByRoundedRatios),
    FuseByCounts(RawFuseByCounts),
    QuarterDivisions,
    CompoundQuarterDivisions,
    StrictQuarterDivisions,
    FuseCompoundQuarterDivisions(RawCounts),
    Rotate(i64),
    Flatten,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RawSplitByDurations {
    #[serde(default)]
    pub durations: Vec<RawFraction>,
    #[serde(default)]
    pub cyclic: bool,
    pub compound_meter_multiplier: Option<RawFraction>,
    #[serde(default)]
    pub pattern_rotation_index: i64,
    #[serde(default)]
    pub remainder: Remainder,
    pub remainder_fuse_threshold: Option<RawFraction>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RawSplitByRoundedRatios {
    #[serde(default)]
    pub ratios: Vec<Vec<i64>>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RawFuseByCounts {
    pub counts: RawCounts,
    pub cyclic: Option<bool>, // Cyclic unless set to false
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum RawCounts {
    List(Vec<usize>),
    Keyword(String),
}

/// Validated plan: input divisions plus the pipeline to run on them
#[derive(Debug, Clone)]
pub struct Plan {
    pub divisions: DivisionSequence,
    pub pipeline: DivisionPipeline,
}

impl Plan {
    /// Parse and validate a YAML plan.
    pub fn from_yaml(source: &str) -> Result<Plan, BacaError> {
        let raw: RawPlan =
            serde_yaml::from_str(source).map_err(|e| BacaError::PlanError(e.to_string()))?;
        Plan::from_raw(raw)
    }

    pub fn from_raw(raw: RawPlan) -> Result<Plan, BacaError> {
        let divisions = raw
            .divisions
            .iter()
            .map(parse_division)
            .collect::<Result<DivisionSequence, _>>()?;
        let divisions = match &raw.start_offset {
            Some(start) => divisions.anchored(parse_offset(start)?),
            None => divisions,
        };

        let mut pipeline = DivisionPipeline::new();
        for step in raw.steps {
            for step in parse_step(step)? {
                pipeline = pipeline.push(step);
            }
        }
        debug!(
            "plan with {} divisions and {} steps",
            divisions.len(),
            pipeline.steps().len()
        );
        Ok(Plan {
            divisions,
            pipeline,
        })
    }

    pub fn run(&self) -> Result<PipelineOutput, BacaError> {
        self.pipeline.run(&self.divisions)
    }
}

/// Most raw steps map to one pipeline step. `strict-quarter-divisions` is a split and a flatten.
fn parse_step(step: RawStep) -> Result<Vec<Step>, BacaError> {
    let step = match step {
        RawStep::SplitByDurations(raw) => Step::SplitByDurations(parse_split_by_durations(&raw)?),
        RawStep::SplitByRoundedRatios(raw) => {
            Step::SplitByRoundedRatios(SplitByRoundedRatiosCallback::new(raw.ratios)?)
        }
        RawStep::FuseByCounts(raw) => {
            let callback = FuseByCountsCallback::builder(parse_counts(&raw.counts)?)
                .cyclic(raw.cyclic.unwrap_or(true))
                .build()?;
            Step::FuseByCounts(callback)
        }
        RawStep::QuarterDivisions => Step::SplitByDurations(factory::quarter_divisions()),
        RawStep::CompoundQuarterDivisions => {
            Step::SplitByDurations(factory::compound_quarter_divisions())
        }
        RawStep::StrictQuarterDivisions => {
            return Ok(factory::strict_quarter_divisions().steps().to_vec());
        }
        RawStep::FuseCompoundQuarterDivisions(counts) => {
            let callback = FuseByCountsCallback::builder(parse_counts(&counts)?)
                .secondary(factory::compound_quarter_divisions())
                .build()?;
            Step::FuseByCounts(callback)
        }
        RawStep::Rotate(n) => Step::Rotate(n),
        RawStep::Flatten => Step::Flatten,
    };
    Ok(vec![step])
}

fn parse_split_by_durations(raw: &RawSplitByDurations) -> Result<SplitByDurationsCallback, BacaError> {
    let durations = raw
        .durations
        .iter()
        .map(parse_fraction)
        .collect::<Result<Vec<_>, _>>()?;
    let mut builder = SplitByDurationsCallback::builder()
        .durations(&durations)
        .cyclic(raw.cyclic)
        .pattern_rotation_index(raw.pattern_rotation_index)
        .remainder(raw.remainder);
    if let Some(multiplier) = &raw.compound_meter_multiplier {
        builder = builder.compound_meter_multiplier(parse_offset(multiplier)?);
    }
    if let Some(threshold) = &raw.remainder_fuse_threshold {
        builder = builder.remainder_fuse_threshold(parse_fraction(threshold)?);
    }
    builder.build()
}

fn parse_counts(raw: &RawCounts) -> Result<FuseCounts, BacaError> {
    match raw {
        RawCounts::List(counts) => Ok(FuseCounts::Counts(counts.clone())),
        RawCounts::Keyword(word) if word.trim() == "infinite" => Ok(FuseCounts::Infinite),
        RawCounts::Keyword(word) => Err(BacaError::PlanError(format!(
            "counts must be a list or 'infinite': {}",
            word
        ))),
    }
}

fn parse_division(raw: &RawDivision) -> Result<Division, BacaError> {
    match raw {
        RawDivision::Bare(fraction) => Ok(Division::from(parse_fraction(fraction)?)),
        RawDivision::Labeled { pair, payload } => {
            let division = Division::from(parse_fraction(pair)?);
            Ok(match payload {
                Some(payload) => division.with_payload(payload.clone()),
                None => division,
            })
        }
    }
}

/// Parse `"n/d"` or a whole number into a non-reduced pair.
pub fn parse_fraction(raw: &RawFraction) -> Result<(i64, i64), BacaError> {
    let text = match raw {
        RawFraction::Whole(n) => return Ok((*n, 1)),
        RawFraction::Text(text) => text.trim(),
    };
    let (numerator, denominator) = match text.split_once('/') {
        Some((numerator, denominator)) => (numerator.trim(), denominator.trim()),
        None => (text, "1"),
    };
    let numerator: i64 = numerator
        .parse()
        .map_err(|_| BacaError::PlanError(format!("Invalid numerator: {}", text)))?;
    let denominator: i64 = denominator
        .parse()
        .map_err(|_| BacaError::PlanError(format!("Invalid denominator: {}", text)))?;
    if denominator == 0 {
        return Err(BacaError::PlanError(format!("Zero denominator: {}", text)));
    }
    Ok((numerator, denominator))
}

fn parse_offset(raw: &RawFraction) -> Result<Offset, BacaError> {
    let (numerator, denominator) = parse_fraction(raw)?;
    Ok(Offset::new(numerator, denominator))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> RawFraction {
        RawFraction::Text(s.to_string())
    }

    #[test]
    fn test_parse_fraction() {
        assert_eq!(parse_fraction(&text("5/8")).unwrap(), (5, 8));
        assert_eq!(parse_fraction(&text(" 2 / 4 ")).unwrap(), (2, 4));
        assert_eq!(parse_fraction(&text("3")).unwrap(), (3, 1));
        assert_eq!(parse_fraction(&RawFraction::Whole(2)).unwrap(), (2, 1));
        assert!(parse_fraction(&text("1/0")).is_err());
        assert!(parse_fraction(&text("x/4")).is_err());
    }

    #[test]
    fn test_plan_with_offset_and_payload() {
        let plan = Plan::from_yaml(
            r#"
divisions: ["3/8", { pair: "2/4", payload: coda }]
start-offset: "1/2"
"#,
        )
        .unwrap();
        assert_eq!(plan.divisions.len(), 2);
        assert_eq!(plan.divisions[0].start_offset(), Some(Offset::new(1, 2)));
        assert_eq!(plan.divisions[1].start_offset(), Some(Offset::new(7, 8)));
        assert_eq!(plan.divisions[1].payload.as_deref(), Some("coda"));
        assert!(plan.pipeline.steps().is_empty());
    }

    #[test]
    fn test_plan_steps() {
        let plan = Plan::from_yaml(
            r#"
divisions: ["5/8"]
steps:
  - split-by-durations:
      durations: ["1/4"]
      cyclic: true
      remainder: left
      remainder-fuse-threshold: "1/8"
  - fuse-by-counts: { counts: infinite }
  - split-by-rounded-ratios: { ratios: [[2, 3]] }
  - compound-quarter-divisions
  - rotate: -1
  - flatten
"#,
        )
        .unwrap();
        let names: Vec<&str> = plan.pipeline.steps().iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec![
                "split-by-durations",
                "fuse-by-counts",
                "split-by-rounded-ratios",
                "split-by-durations",
                "rotate",
                "flatten"
            ]
        );
        let output = plan.run().unwrap();
        assert_eq!(output.divisions.duration(), Offset::new(5, 8));
    }

    #[test]
    fn test_plan_steps_with_values() {
        let plan = Plan::from_yaml(
            r#"
divisions: ["3/8", "3/8", "5/8"]
steps:
  - fuse-compound-quarter-divisions: [2]
  - rotate: 1
"#,
        )
        .unwrap();
        let output = plan.run().unwrap();
        assert_eq!(
            output.divisions,
            DivisionSequence::from_pairs(&[(1, 8), (3, 8), (3, 8), (1, 4), (1, 4)])
        );
    }

    #[test]
    fn test_plan_errors() {
        assert!(matches!(
            Plan::from_yaml("divisions: [\"5/0\"]"),
            Err(BacaError::PlanError(_))
        ));
        assert!(matches!(
            Plan::from_yaml("unknown-key: 1"),
            Err(BacaError::PlanError(_))
        ));
        assert!(matches!(
            Plan::from_yaml("steps:\n  - fuse-by-counts: { counts: some }"),
            Err(BacaError::PlanError(_))
        ));
        assert!(matches!(
            Plan::from_yaml("steps:\n  - fuse-by-counts: { counts: [0] }"),
            Err(BacaError::ConfigurationError(_))
        ));
        assert!(matches!(
            Plan::from_yaml("steps:\n  - split-by-durations: { durations: [\"-1/4\"] }"),
            Err(BacaError::ConfigurationError(_))
        ));
    }
}
