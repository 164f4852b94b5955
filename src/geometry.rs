use crate::error::{SfResult, StrokeForgeError};
use serde::{Deserialize, Serialize};

/// Side length of the drawing surface; coordinates live in `0..=CANVAS_EXTENT`.
pub const CANVAS_EXTENT: f32 = 100.0;

/// A sample on the drawing surface, in the 0..100 canvas convention.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline(always)]
    pub fn dist(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// One pen-down to pen-up gesture.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stroke {
    pub points: Vec<Point>,
}

pub type StrokeSet = Vec<Stroke>;

impl Stroke {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn from_pairs(pairs: &[(f32, f32)]) -> Self {
        Self {
            points: pairs.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&Point> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Point> {
        self.points.last()
    }

    /// Total Euclidean length of the polyline.
    pub fn path_length(&self) -> f32 {
        self.points.windows(2).map(|w| w[0].dist(&w[1])).sum()
    }

    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.points.iter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl BoundingBox {
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bb = BoundingBox {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in iter {
            bb.min_x = bb.min_x.min(p.x);
            bb.min_y = bb.min_y.min(p.y);
            bb.max_x = bb.max_x.max(p.x);
            bb.max_y = bb.max_y.max(p.y);
        }
        Some(bb)
    }

    /// Bounds of every point of every stroke in the set.
    pub fn of_set(strokes: &[Stroke]) -> Option<Self> {
        Self::from_points(strokes.iter().flat_map(|s| s.points.iter()))
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn diagonal(&self) -> f32 {
        let w = self.width();
        let h = self.height();
        (w * w + h * h).sqrt()
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Width over height; `None` for a flat (zero-height) box.
    pub fn aspect_ratio(&self) -> Option<f32> {
        let h = self.height();
        if h > 0.0 {
            Some(self.width() / h)
        } else {
            None
        }
    }
}

pub fn total_points(strokes: &[Stroke]) -> usize {
    strokes.iter().map(Stroke::len).sum()
}

/// Rejects coordinates the engine must never see: non-finite values and
/// anything outside the canvas.
pub fn validate_stroke_set(strokes: &[Stroke]) -> SfResult<()> {
    for (si, stroke) in strokes.iter().enumerate() {
        for (pi, p) in stroke.points.iter().enumerate() {
            let bad = |v: f32| !v.is_finite() || !(0.0..=CANVAS_EXTENT).contains(&v);
            if bad(p.x) || bad(p.y) {
                return Err(StrokeForgeError::InvalidPoint {
                    stroke: si,
                    point: pi,
                    x: p.x,
                    y: p.y,
                });
            }
        }
    }
    Ok(())
}

/// Drops empty strokes after validating the rest.
pub fn sanitize_stroke_set(strokes: StrokeSet) -> SfResult<StrokeSet> {
    validate_stroke_set(&strokes)?;
    Ok(strokes.into_iter().filter(|s| !s.is_empty()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_length_of_l_shape() {
        let s = Stroke::from_pairs(&[(0.0, 0.0), (3.0, 0.0), (3.0, 4.0)]);
        assert!((s.path_length() - 7.0).abs() < 1e-6);
    }

    #[test]
    fn test_bounds_over_set() {
        let set = vec![
            Stroke::from_pairs(&[(10.0, 20.0), (30.0, 20.0)]),
            Stroke::from_pairs(&[(15.0, 5.0), (15.0, 60.0)]),
        ];
        let bb = BoundingBox::of_set(&set).unwrap();
        assert_eq!(bb.width(), 20.0);
        assert_eq!(bb.height(), 55.0);
        assert_eq!(bb.center(), Point::new(20.0, 32.5));
    }

    #[test]
    fn test_flat_box_has_no_aspect_ratio() {
        let s = Stroke::from_pairs(&[(10.0, 50.0), (90.0, 50.0)]);
        assert_eq!(s.bounds().unwrap().aspect_ratio(), None);
    }

    #[test]
    fn test_negative_coordinate_rejected() {
        let set = vec![Stroke::from_pairs(&[(10.0, 10.0), (-1.0, 10.0)])];
        match validate_stroke_set(&set) {
            Err(StrokeForgeError::InvalidPoint { stroke, point, .. }) => {
                assert_eq!((stroke, point), (0, 1));
            }
            other => panic!("expected InvalidPoint, got {:?}", other),
        }
    }

    #[test]
    fn test_nan_coordinate_rejected() {
        let set = vec![Stroke::from_pairs(&[(f32::NAN, 10.0)])];
        assert!(validate_stroke_set(&set).is_err());
    }

    #[test]
    fn test_canvas_edge_is_inclusive() {
        let edge = vec![Stroke::from_pairs(&[(0.0, 0.0), (100.0, 100.0)])];
        assert!(validate_stroke_set(&edge).is_ok());

        let beyond = vec![Stroke::from_pairs(&[(50.0, 50.0), (50.0, 100.5)])];
        assert!(matches!(
            validate_stroke_set(&beyond),
            Err(StrokeForgeError::InvalidPoint { point: 1, .. })
        ));
    }

    #[test]
    fn test_sanitize_drops_empty_strokes() {
        let set = vec![
            Stroke::default(),
            Stroke::from_pairs(&[(1.0, 1.0)]),
            Stroke::default(),
        ];
        let clean = sanitize_stroke_set(set).unwrap();
        assert_eq!(clean.len(), 1);
    }
}
