use crate::error::{SfResult, StrokeForgeError};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Upper bound on `grid_size`; two grids of this side are allocated per call.
pub const MAX_GRID_SIZE: usize = 1024;
/// Upper bound on `resample_points`; DTW cost grows with its square.
pub const MAX_RESAMPLE_POINTS: usize = 1024;

/// Every threshold and weight of the validation pipeline.
#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationParams {
    // === NORMALIZATION ===
    #[arg(long, default_value_t = 16)]
    pub resample_points: usize,
    #[arg(long, default_value_t = 1.0)]
    pub path_epsilon: f32,

    // === HARD GATES ===
    #[arg(long, default_value_t = 5)]
    pub min_total_points: usize,
    #[arg(long, default_value_t = 8.0)]
    pub min_extent: f32,

    // === LOOP DETECTION ===
    #[arg(long, default_value_t = 0.3)]
    pub loop_closure_ratio: f32,
    #[arg(long, default_value_t = 10.0)]
    pub loop_min_diagonal: f32,
    #[arg(long, default_value_t = 5)]
    pub loop_min_points: usize,
    #[arg(long, default_value_t = 2)]
    pub angular_loop_max_strokes: usize,

    // === FIXED SCORES ===
    #[arg(long, default_value_t = 0.2)]
    pub wrong_shape_score: f32,
    #[arg(long, default_value_t = 0.5)]
    pub unknown_score: f32,
    #[arg(long, default_value_t = 0.5)]
    pub neutral_score: f32,

    // === DTW ===
    // Average distance at which the DTW score reaches zero
    #[arg(long, default_value_t = 1.2)]
    pub dtw_saturation: f32,

    // === RASTER ===
    #[arg(long, default_value_t = 64)]
    pub grid_size: usize,
    #[arg(long, default_value_t = 1)]
    pub dilation_radius: usize,
    #[arg(long, default_value_t = 2)]
    pub coverage_radius: usize,
    #[arg(long, default_value_t = 0.4)]
    pub iou_weight: f32,
    #[arg(long, default_value_t = 0.6)]
    pub coverage_weight: f32,

    // === TOTAL ===
    #[arg(long, default_value_t = 0.30)]
    pub weight_dtw: f32,
    #[arg(long, default_value_t = 0.45)]
    pub weight_image: f32,
    #[arg(long, default_value_t = 0.25)]
    pub weight_stroke_count: f32,
    #[arg(long, default_value_t = 0.35)]
    pub pass_threshold: f32,

    // === ADVISORY ===
    #[arg(long, default_value_t = 1.15)]
    pub straight_curvature_max: f32,
}

impl Default for ValidationParams {
    fn default() -> Self {
        Self {
            resample_points: 16,
            path_epsilon: 1.0,
            min_total_points: 5,
            min_extent: 8.0,
            loop_closure_ratio: 0.3,
            loop_min_diagonal: 10.0,
            loop_min_points: 5,
            angular_loop_max_strokes: 2,
            wrong_shape_score: 0.2,
            unknown_score: 0.5,
            neutral_score: 0.5,
            dtw_saturation: 1.2,
            grid_size: 64,
            dilation_radius: 1,
            coverage_radius: 2,
            iou_weight: 0.4,
            coverage_weight: 0.6,
            weight_dtw: 0.30,
            weight_image: 0.45,
            weight_stroke_count: 0.25,
            pass_threshold: 0.35,
            straight_curvature_max: 1.15,
        }
    }
}

impl ValidationParams {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SfResult<Self> {
        let content = fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&content)?;
        params.check()?;
        Ok(params)
    }

    /// Rejects parameter sets that would make the pipeline meaningless
    /// or its buffers unbounded.
    pub fn check(&self) -> SfResult<()> {
        let counts = [
            ("resample_points", self.resample_points, 2, MAX_RESAMPLE_POINTS),
            ("grid_size", self.grid_size, 1, MAX_GRID_SIZE),
            ("dilation_radius", self.dilation_radius, 0, self.grid_size),
            ("coverage_radius", self.coverage_radius, 0, self.grid_size),
        ];
        for (name, v, min, max) in counts {
            if v < min || v > max {
                return Err(StrokeForgeError::Config(format!(
                    "{} must lie in [{}, {}] (got {})",
                    name, min, max, v
                )));
            }
        }

        let magnitudes = [
            ("path_epsilon", self.path_epsilon),
            ("min_extent", self.min_extent),
            ("loop_closure_ratio", self.loop_closure_ratio),
            ("loop_min_diagonal", self.loop_min_diagonal),
            ("dtw_saturation", self.dtw_saturation),
            ("iou_weight", self.iou_weight),
            ("coverage_weight", self.coverage_weight),
            ("weight_dtw", self.weight_dtw),
            ("weight_image", self.weight_image),
            ("weight_stroke_count", self.weight_stroke_count),
            ("straight_curvature_max", self.straight_curvature_max),
        ];
        for (name, v) in magnitudes {
            if !v.is_finite() || v < 0.0 {
                return Err(StrokeForgeError::Config(format!(
                    "{} must be a non-negative number (got {})",
                    name, v
                )));
            }
        }
        if self.dtw_saturation == 0.0 {
            return Err(StrokeForgeError::Config(
                "dtw_saturation must be positive".into(),
            ));
        }

        let unit = [
            ("wrong_shape_score", self.wrong_shape_score),
            ("unknown_score", self.unknown_score),
            ("neutral_score", self.neutral_score),
            ("pass_threshold", self.pass_threshold),
        ];
        for (name, v) in unit {
            // NaN fails `contains`
            if !(0.0..=1.0).contains(&v) {
                return Err(StrokeForgeError::Config(format!(
                    "{} must lie in [0, 1] (got {})",
                    name, v
                )));
            }
        }
        Ok(())
    }

    pub fn merge_from_cli(&mut self, cli_params: &ValidationParams, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$field = cli_params.$field.clone();
                }
            };
        }

        update_if_present!(resample_points);
        update_if_present!(path_epsilon);

        update_if_present!(min_total_points);
        update_if_present!(min_extent);

        update_if_present!(loop_closure_ratio);
        update_if_present!(loop_min_diagonal);
        update_if_present!(loop_min_points);
        update_if_present!(angular_loop_max_strokes);

        update_if_present!(wrong_shape_score);
        update_if_present!(unknown_score);
        update_if_present!(neutral_score);

        update_if_present!(dtw_saturation);

        update_if_present!(grid_size);
        update_if_present!(dilation_radius);
        update_if_present!(coverage_radius);
        update_if_present!(iou_weight);
        update_if_present!(coverage_weight);

        update_if_present!(weight_dtw);
        update_if_present!(weight_image);
        update_if_present!(weight_stroke_count);
        update_if_present!(pass_threshold);

        update_if_present!(straight_curvature_max);
    }
}
