use crate::geometry::{Point, Stroke, StrokeSet, CANVAS_EXTENT};
use crate::scorer::normalize::resample_by_arc_length;
use crate::scorer::{ReasonCode, Scorer};
use crate::templates::TemplateLibrary;
use fastrand::Rng;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;

pub struct CalibrationOptions {
    pub trials: usize,
    /// Max per-axis displacement of each sample, in canvas units.
    pub jitter: f32,
    /// Samples per synthesized stroke.
    pub samples: usize,
    pub seed: Option<u64>,
}

impl Default for CalibrationOptions {
    fn default() -> Self {
        Self {
            trials: 200,
            jitter: 3.0,
            samples: 12,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalibrationRow {
    pub symbol: char,
    pub trials: usize,
    pub pass_rate: f32,
    pub mean_score: f32,
    pub min_score: f32,
    /// Most frequent rejection, if any trial failed.
    pub top_failure: Option<ReasonCode>,
}

/// A hand-drawn-looking copy of `template`: each stroke densified to
/// `samples` points, then every point displaced by up to `jitter` and kept
/// on the canvas.
pub fn synthesize_attempt(template: &[Stroke], rng: &mut Rng, jitter: f32, samples: usize) -> StrokeSet {
    template
        .iter()
        .map(|s| {
            let dense = resample_by_arc_length(&s.points, samples);
            let base = if dense.is_empty() { s.points.clone() } else { dense };
            let pts = base
                .into_iter()
                .map(|p| {
                    let dx = (rng.f32() * 2.0 - 1.0) * jitter;
                    let dy = (rng.f32() * 2.0 - 1.0) * jitter;
                    Point::new(
                        (p.x + dx).clamp(0.0, CANVAS_EXTENT),
                        (p.y + dy).clamp(0.0, CANVAS_EXTENT),
                    )
                })
                .collect();
            Stroke::new(pts)
        })
        .collect()
}

fn calibrate_symbol(
    scorer: &Scorer,
    symbol: char,
    template: &[Stroke],
    opts: &CalibrationOptions,
    salt: u64,
) -> CalibrationRow {
    let mut rng = match opts.seed {
        Some(s) => Rng::with_seed(s.wrapping_add(salt)),
        None => Rng::new(),
    };

    let mut passes = 0usize;
    let mut total = 0.0f32;
    let mut min_score = f32::MAX;
    let mut failures: HashMap<ReasonCode, usize> = HashMap::new();

    for _ in 0..opts.trials {
        let attempt = synthesize_attempt(template, &mut rng, opts.jitter, opts.samples);
        let res = scorer.validate(&attempt, symbol, Some(template));
        total += res.score;
        min_score = min_score.min(res.score);
        if res.valid {
            passes += 1;
        } else {
            *failures.entry(res.reason).or_default() += 1;
        }
    }

    let n = opts.trials.max(1) as f32;
    CalibrationRow {
        symbol,
        trials: opts.trials,
        pass_rate: passes as f32 / n,
        mean_score: total / n,
        min_score: if opts.trials > 0 { min_score } else { 0.0 },
        top_failure: failures
            .into_iter()
            .max_by_key(|&(reason, count)| (count, std::cmp::Reverse(reason as u8)))
            .map(|(reason, _)| reason),
    }
}

/// Pass rates of jittered template copies, one row per symbol (parallel across symbols).
pub fn run_calibration(
    scorer: &Scorer,
    library: &TemplateLibrary,
    symbols: &[char],
    opts: &CalibrationOptions,
) -> Vec<CalibrationRow> {
    symbols
        .par_iter()
        .filter_map(|&c| library.get(c).map(|t| (c, t)))
        .map(|(c, t)| calibrate_symbol(scorer, c, t, opts, c as u64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesized_attempt_shape() {
        let template = vec![Stroke::from_pairs(&[(10.0, 50.0), (90.0, 50.0)])];
        let mut rng = Rng::with_seed(7);
        let attempt = synthesize_attempt(&template, &mut rng, 2.0, 12);
        assert_eq!(attempt.len(), 1);
        assert_eq!(attempt[0].len(), 12);
        assert!(attempt[0].points.iter().all(|p| (p.y - 50.0).abs() <= 2.0));
    }

    #[test]
    fn test_clean_copies_always_pass() {
        let scorer = Scorer::default();
        let opts = CalibrationOptions {
            trials: 5,
            jitter: 0.0,
            samples: 12,
            seed: Some(1),
        };
        let rows = run_calibration(&scorer, TemplateLibrary::builtin(), &['ㄱ', 'ㅏ'], &opts);
        assert_eq!(rows.len(), 2);
        for row in rows {
            assert_eq!(row.pass_rate, 1.0, "{:?}", row);
            assert!(row.top_failure.is_none());
        }
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let scorer = Scorer::default();
        let opts = CalibrationOptions {
            trials: 10,
            jitter: 6.0,
            samples: 10,
            seed: Some(42),
        };
        let lib = TemplateLibrary::builtin();
        let a = run_calibration(&scorer, lib, &['ㅁ'], &opts);
        let b = run_calibration(&scorer, lib, &['ㅁ'], &opts);
        assert_eq!(a[0].mean_score, b[0].mean_score);
    }
}
