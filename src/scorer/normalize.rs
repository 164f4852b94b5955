use crate::geometry::{BoundingBox, Point};

/// Path length below which a stroke carries no usable shape.
pub const DEFAULT_PATH_EPSILON: f32 = 1.0;

/// Resamples to `n` points evenly spaced along the polyline.
/// Returns an empty Vec for strokes that are too short to describe a shape.
pub fn resample_by_arc_length(points: &[Point], n: usize) -> Vec<Point> {
    resample_with_epsilon(points, n, DEFAULT_PATH_EPSILON)
}

pub fn resample_with_epsilon(points: &[Point], n: usize, epsilon: f32) -> Vec<Point> {
    if points.len() < 2 || n == 0 {
        return Vec::new();
    }

    // Cumulative arc length at each original vertex
    let mut cum = Vec::with_capacity(points.len());
    cum.push(0.0f32);
    for w in points.windows(2) {
        let last = cum[cum.len() - 1];
        cum.push(last + w[0].dist(&w[1]));
    }
    let total = cum[cum.len() - 1];

    if total < epsilon {
        return Vec::new();
    }
    if n == 1 {
        return vec![points[0]];
    }

    let last_idx = points.len() - 1;
    let mut out = Vec::with_capacity(n);
    let mut seg = 1;

    for i in 0..n {
        if i == n - 1 {
            out.push(points[last_idx]);
            break;
        }
        let target = total * (i as f32) / ((n - 1) as f32);
        while seg < last_idx && cum[seg] < target {
            seg += 1;
        }
        let a = points[seg - 1];
        let b = points[seg];
        let span = cum[seg] - cum[seg - 1];
        let t = if span > 0.0 {
            ((target - cum[seg - 1]) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        out.push(Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t));
    }

    out
}

/// Centers on the bounding-box midpoint and divides by the larger side,
/// so the result is independent of where and how large the stroke was drawn.
pub fn normalize_scale_and_center(points: &[Point]) -> Vec<Point> {
    if points.len() < 2 {
        return Vec::new();
    }
    let Some(bb) = BoundingBox::from_points(points.iter()) else {
        return Vec::new();
    };

    let side = bb.width().max(bb.height());
    let scale = if side > 0.0 { side } else { 1.0 };
    let c = bb.center();

    points
        .iter()
        .map(|p| Point::new((p.x - c.x) / scale, (p.y - c.y) / scale))
        .collect()
}

/// Resample then scale/center: the form the sequence matcher consumes.
pub fn normalize_stroke(points: &[Point], n: usize, epsilon: f32) -> Vec<Point> {
    normalize_scale_and_center(&resample_with_epsilon(points, n, epsilon))
}
