//! Serializable view of pipeline results.
//!
//! ```rust
//! use baca::{DivisionPipeline, DivisionSequence, Report};
//!
//! let output = DivisionPipeline::new().run(&DivisionSequence::from_pairs(&[(3, 8)]).anchored(0))?;
//! let yaml = Report::new(&output, false).to_yaml()?;
//! assert!(yaml.contains("pair: 3/8"));
//! assert!(yaml.contains("start-offset:"));
//! # Ok::<(), baca::BacaError>(())
//! ```

use crate::division::Division;
use crate::error::BacaError;
use crate::pipeline::PipelineOutput;
use crate::sequence::DivisionSequence;
use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct DivisionReport {
    pub pair: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_offset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

impl From<&Division> for DivisionReport {
    fn from(division: &Division) -> Self {
        let (numerator, denominator) = division.pair();
        DivisionReport {
            pair: format!("{}/{}", numerator, denominator),
            start_offset: division.start_offset().map(|offset| offset.to_string()),
            payload: division.payload.clone(),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Report {
    pub count: usize,
    pub total: String,
    pub divisions: Vec<DivisionReport>,
    /// Subsequences left by the last step, only with `--nested`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<Vec<DivisionReport>>>,
}

impl Report {
    pub fn new(output: &PipelineOutput, nested: bool) -> Self {
        let groups = nested.then(|| output.nested.iter().map(entries).collect());
        Report {
            count: output.divisions.len(),
            total: output.divisions.duration().to_string(),
            divisions: entries(&output.divisions),
            groups,
        }
    }

    pub fn to_yaml(&self) -> Result<String, BacaError> {
        serde_yaml::to_string(self).map_err(|e| BacaError::RenderError(e.to_string()))
    }
}

fn entries(sequence: &DivisionSequence) -> Vec<DivisionReport> {
    sequence.iter().map(DivisionReport::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timespan::Offset;

    #[test]
    fn test_division_report_fields() {
        let division = Division::new(2, 8)
            .with_start_offset(Offset::new(3, 4))
            .with_payload("a");
        let report = DivisionReport::from(&division);
        assert_eq!(report.pair, "2/8");
        assert_eq!(report.start_offset.as_deref(), Some("3/4"));
        assert_eq!(report.payload.as_deref(), Some("a"));

        let bare = DivisionReport::from(&Division::new(5, 8));
        assert_eq!(bare.start_offset, None);
    }

    #[test]
    fn test_report_groups_only_when_nested() {
        let sequence = DivisionSequence::from_pairs(&[(1, 4), (1, 8)]);
        let output = PipelineOutput {
            nested: vec![sequence.clone()],
            divisions: sequence,
        };
        let flat = Report::new(&output, false);
        assert_eq!(flat.count, 2);
        assert_eq!(flat.total, "3/8");
        assert!(flat.groups.is_none());
        assert!(!flat.to_yaml().unwrap().contains("groups"));

        let nested = Report::new(&output, true);
        assert_eq!(nested.groups.as_ref().map(|g| g.len()), Some(1));
        assert!(nested.to_yaml().unwrap().contains("groups:"));
    }
}
