use clap::{Args, Command, FromArgMatches};
use rstest::rstest;
use std::io::Write;
use strokeforge::config::{ValidationParams, MAX_GRID_SIZE, MAX_RESAMPLE_POINTS};
use strokeforge::error::StrokeForgeError;
use tempfile::NamedTempFile;

fn write_json(body: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", body).unwrap();
    file
}

/// Parses `args` the way the binary does, returning both the struct and the raw matches.
fn parse_cli(args: &[&str]) -> (ValidationParams, clap::ArgMatches) {
    let cmd = ValidationParams::augment_args(Command::new("test"));
    let matches = cmd.get_matches_from(std::iter::once("test").chain(args.iter().copied()));
    let params = ValidationParams::from_arg_matches(&matches).unwrap();
    (params, matches)
}

#[test]
fn test_defaults_are_the_reference_constants() {
    let p = ValidationParams::default();
    assert_eq!(p.resample_points, 16);
    assert_eq!(p.min_total_points, 5);
    assert_eq!(p.min_extent, 8.0);
    assert_eq!(p.loop_closure_ratio, 0.3);
    assert_eq!(p.loop_min_diagonal, 10.0);
    assert_eq!(p.dtw_saturation, 1.2);
    assert_eq!(p.grid_size, 64);
    assert_eq!(p.pass_threshold, 0.35);
    assert!((p.weight_dtw + p.weight_image + p.weight_stroke_count - 1.0).abs() < 1e-6);
    assert!(p.check().is_ok());
}

#[test]
fn test_cli_defaults_match_default_impl() {
    let (params, _) = parse_cli(&[]);
    assert_eq!(params, ValidationParams::default());
}

#[test]
fn test_partial_file_keeps_defaults() {
    let file = write_json(r#"{ "pass_threshold": 0.5, "grid_size": 32 }"#);
    let p = ValidationParams::load_from_file(file.path()).unwrap();
    assert_eq!(p.pass_threshold, 0.5);
    assert_eq!(p.grid_size, 32);
    assert_eq!(p.resample_points, 16);
}

#[test]
fn test_invalid_file_values_rejected() {
    let file = write_json(r#"{ "pass_threshold": 1.5 }"#);
    let err = ValidationParams::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, StrokeForgeError::Config(_)));
}

#[test]
fn test_malformed_file_is_json_error() {
    let file = write_json("{ not json");
    let err = ValidationParams::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, StrokeForgeError::Json(_)));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = ValidationParams::load_from_file("/nonexistent/params.json").unwrap_err();
    assert!(matches!(err, StrokeForgeError::Io(_)));
}

#[test]
fn test_check_rejects_nonsense() {
    let cases = [
        ValidationParams {
            grid_size: 0,
            ..Default::default()
        },
        ValidationParams {
            dtw_saturation: 0.0,
            ..Default::default()
        },
        ValidationParams {
            weight_image: -0.1,
            ..Default::default()
        },
        ValidationParams {
            iou_weight: f32::NAN,
            ..Default::default()
        },
        ValidationParams {
            grid_size: 200_000,
            ..Default::default()
        },
        ValidationParams {
            resample_points: 5_000,
            ..Default::default()
        },
        ValidationParams {
            min_extent: f32::NAN,
            ..Default::default()
        },
        ValidationParams {
            loop_closure_ratio: -1.0,
            ..Default::default()
        },
    ];
    for p in cases {
        assert!(p.check().is_err(), "{:?}", p);
    }
}

#[rstest]
#[case::huge_grid(ValidationParams { grid_size: 200_000, ..Default::default() })]
#[case::huge_resample(ValidationParams { resample_points: 1_000_000, ..Default::default() })]
#[case::huge_dilation(ValidationParams { dilation_radius: 65, ..Default::default() })]
#[case::huge_coverage(ValidationParams { coverage_radius: 1_000, ..Default::default() })]
#[case::nan_saturation(ValidationParams { dtw_saturation: f32::NAN, ..Default::default() })]
#[case::nan_epsilon(ValidationParams { path_epsilon: f32::NAN, ..Default::default() })]
#[case::negative_epsilon(ValidationParams { path_epsilon: -1.0, ..Default::default() })]
#[case::nan_extent(ValidationParams { min_extent: f32::NAN, ..Default::default() })]
#[case::negative_closure(ValidationParams { loop_closure_ratio: -0.3, ..Default::default() })]
#[case::infinite_diagonal(ValidationParams { loop_min_diagonal: f32::INFINITY, ..Default::default() })]
#[case::nan_curvature(ValidationParams { straight_curvature_max: f32::NAN, ..Default::default() })]
#[case::negative_wrong_shape(ValidationParams { wrong_shape_score: -0.2, ..Default::default() })]
#[case::nan_unknown(ValidationParams { unknown_score: f32::NAN, ..Default::default() })]
#[case::neutral_above_one(ValidationParams { neutral_score: 1.5, ..Default::default() })]
#[case::nan_threshold(ValidationParams { pass_threshold: f32::NAN, ..Default::default() })]
fn test_check_rejects_out_of_range(#[case] params: ValidationParams) {
    assert!(matches!(params.check(), Err(StrokeForgeError::Config(_))));
}

#[rstest]
#[case::largest_grid(ValidationParams { grid_size: MAX_GRID_SIZE, ..Default::default() })]
#[case::largest_resample(ValidationParams { resample_points: MAX_RESAMPLE_POINTS, ..Default::default() })]
#[case::zero_extent(ValidationParams { min_extent: 0.0, ..Default::default() })]
#[case::threshold_bounds(ValidationParams { pass_threshold: 0.0, unknown_score: 1.0, ..Default::default() })]
fn test_check_accepts_limits(#[case] params: ValidationParams) {
    assert!(params.check().is_ok(), "{:?}", params);
}

#[test]
fn test_oversized_grid_file_rejected() {
    let file = write_json(r#"{ "grid_size": 200000 }"#);
    let err = ValidationParams::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, StrokeForgeError::Config(_)));
}

#[test]
fn test_explicit_flags_override_file() {
    let file = write_json(r#"{ "pass_threshold": 0.5, "min_extent": 12.0 }"#);
    let mut params = ValidationParams::load_from_file(file.path()).unwrap();

    let (cli, matches) = parse_cli(&["--pass-threshold", "0.6"]);
    params.merge_from_cli(&cli, &matches);

    assert_eq!(params.pass_threshold, 0.6);
    // Not given on the command line: file value survives the CLI default
    assert_eq!(params.min_extent, 12.0);
}
