use crate::catalog::{Direction, StrokeKind};
use crate::config::ValidationParams;
use crate::geometry::{BoundingBox, Point, Stroke};

/// Thresholds for deciding that a stroke closes on itself.
#[derive(Debug, Clone, Copy)]
pub struct LoopRule {
    pub closure_ratio: f32,
    pub min_diagonal: f32,
    pub min_points: usize,
}

impl From<&ValidationParams> for LoopRule {
    fn from(p: &ValidationParams) -> Self {
        Self {
            closure_ratio: p.loop_closure_ratio,
            min_diagonal: p.loop_min_diagonal,
            min_points: p.loop_min_points,
        }
    }
}

impl Default for LoopRule {
    fn default() -> Self {
        Self::from(&ValidationParams::default())
    }
}

/// Start and end meet (relative to the stroke's own size) on a stroke big
/// enough and sampled densely enough to be a deliberate loop.
pub fn is_closed_loop(stroke: &Stroke, rule: &LoopRule) -> bool {
    if stroke.len() < rule.min_points {
        return false;
    }
    let (Some(start), Some(end), Some(bb)) = (stroke.first(), stroke.last(), stroke.bounds())
    else {
        return false;
    };
    let diagonal = bb.diagonal();
    start.dist(end) < diagonal * rule.closure_ratio && diagonal > rule.min_diagonal
}

pub fn any_loop(strokes: &[Stroke], rule: &LoopRule) -> bool {
    strokes.iter().any(|s| is_closed_loop(s, rule))
}

/// Angle of the start→end vector in degrees, in [0, 360).
/// 0 = right, 90 = down (canvas y grows downward).
pub fn direction_angle(points: &[Point]) -> Option<f32> {
    if points.len() < 2 {
        return None;
    }
    let start = points[0];
    let end = points[points.len() - 1];
    let angle = (end.y - start.y).atan2(end.x - start.x).to_degrees();
    Some(if angle < 0.0 { angle + 360.0 } else { angle })
}

pub fn classify_direction(angle: f32) -> Direction {
    let a = angle.rem_euclid(360.0);
    if !(45.0..315.0).contains(&a) {
        Direction::Right
    } else if a < 135.0 {
        Direction::Down
    } else if a < 225.0 {
        Direction::Left
    } else {
        Direction::Up
    }
}

/// Path length over chord length. 1.0 is perfectly straight.
pub fn curvature(points: &[Point]) -> f32 {
    if points.len() < 3 {
        return 0.0;
    }
    let chord = points[0].dist(&points[points.len() - 1]);
    if chord < 1.0 {
        return f32::INFINITY;
    }
    let path: f32 = points.windows(2).map(|w| w[0].dist(&w[1])).sum();
    path / chord
}

pub fn classify_kind(stroke: &Stroke, rule: &LoopRule, straight_max: f32) -> StrokeKind {
    if is_closed_loop(stroke, rule) {
        StrokeKind::Loop
    } else if curvature(&stroke.points) <= straight_max {
        StrokeKind::Straight
    } else {
        StrokeKind::Curved
    }
}

/// Aspect ratio of the whole attempt, `None` for a flat drawing.
pub fn set_aspect_ratio(strokes: &[Stroke]) -> Option<f32> {
    BoundingBox::of_set(strokes).and_then(|bb| bb.aspect_ratio())
}
