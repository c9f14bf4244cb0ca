//! Integration tests for baca
//!
//! Drives the public API from raw pairs through callbacks and pipelines, and
//! the YAML plan path end to end.

use baca::callbacks::FuseByCountsCallback;
use baca::threading::{to_divisions, DivisionInput};
use baca::{
    factory, run_plan, run_plan_nested, BacaError, Division, DivisionCallback, DivisionPipeline,
    DivisionSequence, FuseCounts, Offset, Plan, Remainder, SplitByDurationsCallback,
};

fn d(n: i64, den: i64) -> Division {
    Division::new(n, den)
}

fn quarters(remainder: Remainder) -> SplitByDurationsCallback {
    SplitByDurationsCallback::builder()
        .durations(&[(1, 4)])
        .cyclic(true)
        .remainder(remainder)
        .remainder_fuse_threshold((1, 8))
        .build()
        .unwrap()
}

#[test]
fn test_split_sums_to_input() {
    let callback = SplitByDurationsCallback::builder()
        .durations(&[(3, 16), (1, 4), (1, 8)])
        .cyclic(true)
        .pattern_rotation_index(1)
        .build()
        .unwrap();
    let input = [d(5, 8), d(7, 8), d(3, 4), d(11, 16)];
    let result = callback.call(&input).unwrap();
    assert_eq!(result.len(), input.len());
    for (parts, division) in result.iter().zip(input.iter()) {
        let total: Offset = parts.iter().map(|p| p.duration()).sum();
        assert_eq!(total, division.duration(), "parts of {}", division);
    }
}

#[test]
fn test_split_result_is_contiguous_from_first_offset() {
    let input = DivisionSequence::from_pairs(&[(5, 8), (6, 8), (3, 4)]).anchored(Offset::new(1, 2));
    let nested = input.split_by_durations(&factory::compound_quarter_divisions()).unwrap();
    let flat = DivisionSequence::flatten(&nested);
    assert_eq!(flat.start_offset(), Some(Offset::new(1, 2)));
    assert!(flat.is_contiguous());
    assert_eq!(flat.duration(), input.duration());
    // 6/8 is compound: two dotted quarters
    let pairs: Vec<(i64, i64)> = nested[1].iter().map(|division| division.pair()).collect();
    assert_eq!(pairs, vec![(3, 8), (3, 8)]);
}

#[test]
fn test_rotation_round_trip() {
    let sequence = DivisionSequence::from_pairs(&[(1, 4), (3, 8), (5, 16), (1, 2)]).anchored(0);
    for n in -5..=5 {
        assert_eq!(sequence.rotate(n).rotate(-n), sequence);
    }
    let rotated = sequence.rotate(1);
    assert_eq!(rotated[0], d(1, 2).with_start_offset(0));
    assert!(rotated.is_contiguous());
}

#[test]
fn test_rounded_ratio_split_is_exact() {
    let callback = factory::split_by_rounded_ratios(vec![vec![1, 1, 1], vec![2, 1]]).unwrap();
    let result = callback.call(&[d(7, 8), d(5, 16), d(4, 4)]).unwrap();
    assert_eq!(result[0], vec![d(2, 8), d(3, 8), d(2, 8)]);
    assert_eq!(result[1], vec![d(3, 16), d(2, 16)]);
    assert_eq!(result[2], vec![d(1, 4), d(2, 4), d(1, 4)]);
    for (parts, numerator) in result.iter().zip([7, 5, 4]) {
        assert_eq!(parts.iter().map(|p| p.numerator).sum::<i64>(), numerator);
    }
}

#[test]
fn test_subtraction_shrinks_from_the_start() {
    let whole = d(4, 1).with_start_offset(10);
    let head = d(2, 1).with_start_offset(10);
    assert_eq!(whole.subtract(&head).unwrap(), d(2, 1).with_start_offset(12));
    assert_eq!(head.subtract(&whole).unwrap(), d(-2, 1).with_start_offset(12));
    assert!(matches!(
        whole.subtract(&whole),
        Err(BacaError::AmbiguousSubtraction { .. })
    ));
}

#[test]
fn test_remainder_fuse_threshold() {
    let right = quarters(Remainder::Right).call(&[d(5, 8)]).unwrap();
    assert_eq!(right, vec![vec![d(1, 4), d(3, 8)]]);
    let left = quarters(Remainder::Left).call(&[d(5, 8)]).unwrap();
    assert_eq!(left, vec![vec![d(3, 8), d(1, 4)]]);
}

#[test]
fn test_empty_pattern_keeps_division_and_offset() {
    let callback = SplitByDurationsCallback::builder().build().unwrap();
    let division = d(7, 16).with_start_offset(3);
    assert_eq!(callback.call(&[division.clone()]).unwrap(), vec![vec![division]]);
}

#[test]
fn test_fuse_by_counts_keeps_overhang() {
    let callback = factory::fuse_divisions(&[2]).unwrap();
    let result = callback
        .call(&[d(2, 8), d(2, 8), d(4, 8), d(4, 8), d(2, 4)])
        .unwrap();
    assert_eq!(result, vec![vec![d(4, 8)], vec![d(8, 8)], vec![d(2, 4)]]);
}

#[test]
fn test_nested_input_threads_offsets() {
    let input = DivisionInput::Nested(vec![
        DivisionInput::Pair(3, 8),
        DivisionInput::Nested(vec![DivisionInput::Pair(1, 4), DivisionInput::Pair(1, 4)]),
    ]);
    let (tree, stop) = to_divisions(input, Some(Offset::from_integer(0)));
    assert_eq!(stop, Some(Offset::new(7, 8)));
    let flat = DivisionSequence::new(tree.flatten());
    assert!(flat.is_contiguous());
    assert_eq!(flat[2], d(1, 4).with_start_offset(Offset::new(5, 8)));
}

#[test]
fn test_pipeline_with_secondary_split() {
    let pipeline = DivisionPipeline::new()
        .fuse_by_counts(
            FuseByCountsCallback::builder(FuseCounts::Infinite)
                .secondary(factory::quarter_divisions())
                .build()
                .unwrap(),
        )
        .rotate(1);
    let input = DivisionSequence::from_pairs(&[(3, 8), (3, 8)]).anchored(0);
    let output = pipeline.run(&input).unwrap();
    // 6/8 fused, split by quarters, last quarter rotated to the front
    assert_eq!(
        output.divisions,
        DivisionSequence::from_pairs(&[(1, 4), (1, 4), (1, 4)]).anchored(0)
    );
}

#[test]
fn test_plan_yaml_report() {
    let yaml = run_plan(
        r#"
divisions: ["5/8", { pair: "3/4", payload: coda }]
start-offset: "0"
steps:
  - split-by-durations:
      durations: ["1/4"]
      cyclic: true
      remainder: left
"#,
    )
    .unwrap();
    assert!(yaml.contains("count: 6"));
    assert!(yaml.contains("total: 11/8"));
    assert!(yaml.contains("pair: 1/8"));
    assert!(!yaml.contains("groups"));
}

#[test]
fn test_plan_yaml_nested() {
    let source = r#"
divisions: ["6/8", "2/4"]
steps:
  - compound-quarter-divisions
"#;
    let yaml = run_plan_nested(source).unwrap();
    assert!(yaml.contains("groups:"));
    let output = Plan::from_yaml(source).unwrap().run().unwrap();
    assert_eq!(output.nested.len(), 2);
    assert_eq!(output.nested[0].as_slice(), &[d(3, 8), d(3, 8)]);
}

#[test]
fn test_plan_errors() {
    assert!(matches!(
        run_plan("divisions: [\"5/8\"]\nsteps:\n  - explode"),
        Err(BacaError::PlanError(_))
    ));
    assert!(matches!(
        run_plan("divisions: [\"-5/8\"]\nsteps:\n  - quarter-divisions"),
        Err(BacaError::InvalidOperation(_))
    ));
}
