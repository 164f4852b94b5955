use super::dtw::average_best_distance;
use super::normalize::normalize_stroke;
use super::raster::similarity;
use super::shape::{any_loop, classify_direction, direction_angle, set_aspect_ratio};
use super::types::{ReasonCode, ScoreDetails, ValidationResult};
use super::Scorer;
use crate::catalog::CharacterPattern;
use crate::geometry::{total_points, BoundingBox, Point, Stroke};
use tracing::debug;

/// Runs the gate pipeline, then the weighted soft scoring.
/// Pure: the result depends only on the arguments and the scorer's catalog/params.
pub fn validate(
    scorer: &Scorer,
    strokes: &[Stroke],
    symbol: char,
    template: Option<&[Stroke]>,
) -> ValidationResult {
    let p = &scorer.params;
    let strokes: Vec<Stroke> = strokes.iter().filter(|s| !s.is_empty()).cloned().collect();
    let count = strokes.len();

    // 1. Unknown symbol: lenient fixed-confidence acceptance
    let Some(pattern) = scorer.catalog().get(symbol) else {
        debug!("'{}' not in catalog, lenient accept", symbol);
        return ValidationResult::unknown(count > 0, p.unknown_score);
    };

    // 2. Stroke-count floor
    let min_strokes = pattern.effective_min_strokes();
    if count < min_strokes {
        debug!("'{}': {} strokes < min {}", symbol, count, min_strokes);
        return ValidationResult::rejected(ReasonCode::NeedMoreStrokes, 0.0);
    }

    // 3. Minimum ink
    let ink = total_points(&strokes);
    if ink < p.min_total_points {
        debug!("'{}': {} points < {}", symbol, ink, p.min_total_points);
        return ValidationResult::rejected(ReasonCode::DrawMore, 0.0);
    }

    // 4. Minimum extent
    if let Some(bb) = BoundingBox::of_set(&strokes) {
        if bb.width() < p.min_extent && bb.height() < p.min_extent {
            debug!(
                "'{}': extent {:.1}x{:.1} below {}",
                symbol,
                bb.width(),
                bb.height(),
                p.min_extent
            );
            return ValidationResult::rejected(ReasonCode::TooSmall, 0.0);
        }
    }

    // 5. Structural gate: loops vs. angular shapes
    let has_loop = any_loop(&strokes, &scorer.loop_rule());
    if pattern.is_angular_only() && has_loop && count <= p.angular_loop_max_strokes {
        debug!("'{}': loop drawn for angular symbol", symbol);
        return ValidationResult::rejected(ReasonCode::WrongShape, p.wrong_shape_score);
    }
    if pattern.is_circular && !has_loop {
        debug!("'{}': circular symbol without a loop", symbol);
        return ValidationResult::rejected(ReasonCode::NeedCircularShape, p.wrong_shape_score);
    }

    // 6. Soft scoring
    let mut d = ScoreDetails {
        dtw_score: p.neutral_score,
        image_score: p.neutral_score,
        stroke_count_score: stroke_count_score(count, pattern.expected_strokes),
        ..Default::default()
    };

    if let Some(template) = template.filter(|t| !t.is_empty()) {
        if let Some(avg) = dtw_average(scorer, &strokes, template) {
            d.dtw_score = (1.0 - avg / p.dtw_saturation).clamp(0.0, 1.0);
        }
        let img = similarity(&strokes, template, &scorer.raster_options());
        d.image_score = img.similarity;
        d.iou = Some(img.iou);
        d.coverage = Some(img.coverage);
    }

    annotate_advisory(&mut d, &strokes, pattern);

    // 7. Weighted total
    let score = p.weight_dtw * d.dtw_score
        + p.weight_image * d.image_score
        + p.weight_stroke_count * d.stroke_count_score;

    // 8. Decision
    let valid = score >= p.pass_threshold;
    debug!(
        "'{}': dtw={:.3} image={:.3} count={:.3} -> {:.3} ({})",
        symbol,
        d.dtw_score,
        d.image_score,
        d.stroke_count_score,
        score,
        if valid { "pass" } else { "fail" }
    );

    ValidationResult {
        valid,
        score,
        reason: if valid {
            ReasonCode::Pass
        } else {
            ReasonCode::TryAgain
        },
        details: Some(d),
    }
}

pub fn stroke_count_score(submitted: usize, expected: usize) -> f32 {
    let expected = expected.max(1) as f32;
    let diff = (submitted as f32 - expected).abs();
    (1.0 - diff / expected).clamp(0.0, 1.0)
}

fn dtw_average(scorer: &Scorer, strokes: &[Stroke], template: &[Stroke]) -> Option<f32> {
    let p = &scorer.params;
    let norm = |s: &Stroke| -> Vec<Point> {
        normalize_stroke(&s.points, p.resample_points, p.path_epsilon)
    };
    let user: Vec<Vec<Point>> = strokes.iter().map(norm).collect();
    let tmpl: Vec<Vec<Point>> = template.iter().map(norm).collect();
    average_best_distance(&user, &tmpl)
}

fn annotate_advisory(d: &mut ScoreDetails, strokes: &[Stroke], pattern: &CharacterPattern) {
    d.aspect_ratio = set_aspect_ratio(strokes);
    d.aspect_in_range = match (pattern.aspect_ratio, d.aspect_ratio) {
        (Some(range), Some(ratio)) => Some(range.contains(ratio)),
        _ => None,
    };

    let mut compared = 0usize;
    let mut agreed = 0usize;
    for (stroke, hint) in strokes.iter().zip(pattern.stroke_hints) {
        let (Some(expected), Some(angle)) = (hint.direction, direction_angle(&stroke.points))
        else {
            continue;
        };
        compared += 1;
        if classify_direction(angle) == expected {
            agreed += 1;
        }
    }
    d.direction_agreement = if compared > 0 {
        Some(agreed as f32 / compared as f32)
    } else {
        None
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_count_score() {
        assert_eq!(stroke_count_score(2, 2), 1.0);
        assert_eq!(stroke_count_score(1, 2), 0.5);
        assert_eq!(stroke_count_score(6, 2), 0.0);
        assert_eq!(stroke_count_score(0, 0), 0.0);
    }
}
