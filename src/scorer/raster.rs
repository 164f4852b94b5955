use crate::geometry::{Point, Stroke, CANVAS_EXTENT};
use serde::Serialize;

/// Square boolean grid, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterGrid {
    size: usize,
    cells: Vec<bool>,
}

impl RasterGrid {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline(always)]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.size && (y as usize) < self.size
    }

    #[inline(always)]
    pub fn get(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.cells[y as usize * self.size + x as usize]
    }

    #[inline(always)]
    fn set(&mut self, x: i32, y: i32) {
        if self.in_bounds(x, y) {
            let idx = y as usize * self.size + x as usize;
            self.cells[idx] = true;
        }
    }

    pub fn count_on(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Marks a drawn cell plus its neighbours within `radius` (square brush).
    /// Cells outside the canvas are dropped.
    fn stamp(&mut self, x: i32, y: i32, radius: i32) {
        if !self.in_bounds(x, y) {
            return;
        }
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                self.set(x + dx, y + dy);
            }
        }
    }

    /// Bresenham line from (x0, y0) to (x1, y1), stamping every visited cell.
    fn draw_line(&mut self, (x0, y0): (i32, i32), (x1, y1): (i32, i32), radius: i32) {
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx - dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.stamp(x, y, radius);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// True if any "on" cell lies within `radius` (Chebyshev) of (x, y).
    fn any_near(&self, x: i32, y: i32, radius: i32) -> bool {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if self.get(x + dx, y + dy) {
                    return true;
                }
            }
        }
        false
    }
}

#[inline(always)]
fn to_cell(v: f32, size: usize) -> i32 {
    ((v / CANVAS_EXTENT) * size as f32).floor() as i32
}

/// Liang-Barsky clip of segment `a`→`b` to the canvas square.
/// Endpoints already on the canvas are returned untouched.
fn clip_to_canvas(a: Point, b: Point) -> Option<(Point, Point)> {
    if ![a.x, a.y, b.x, b.y].iter().all(|v| v.is_finite()) {
        return None;
    }
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;

    for (p, q) in [
        (-dx, a.x),
        (dx, CANVAS_EXTENT - a.x),
        (-dy, a.y),
        (dy, CANVAS_EXTENT - a.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    let at = |t: f32| Point::new(a.x + dx * t, a.y + dy * t);
    let start = if t0 > 0.0 { at(t0) } else { a };
    let end = if t1 < 1.0 { at(t1) } else { b };
    Some((start, end))
}

/// Draws every consecutive point pair of every stroke, thickened by `dilation` cells.
/// Segments are clipped to the canvas first, so stray coordinates cost nothing.
pub fn rasterize(strokes: &[Stroke], size: usize, dilation: usize) -> RasterGrid {
    let mut grid = RasterGrid::new(size);
    let radius = dilation as i32;

    for stroke in strokes {
        for w in stroke.points.windows(2) {
            let Some((p, q)) = clip_to_canvas(w[0], w[1]) else {
                continue;
            };
            let a = (to_cell(p.x, size), to_cell(p.y, size));
            let b = (to_cell(q.x, size), to_cell(q.y, size));
            grid.draw_line(a, b, radius);
        }
    }
    grid
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ImageSimilarity {
    pub iou: f32,
    pub coverage: f32,
    pub similarity: f32,
}

/// Overlap metrics of two grids of equal size.
/// `coverage` is the share of template cells with user ink within `tolerance` cells.
pub fn compare_grids(user: &RasterGrid, template: &RasterGrid, tolerance: usize) -> (f32, f32) {
    debug_assert_eq!(user.size, template.size);
    let size = user.size as i32;
    let tol = tolerance as i32;

    let mut intersection = 0usize;
    let mut union = 0usize;
    let mut template_on = 0usize;
    let mut covered = 0usize;

    for y in 0..size {
        for x in 0..size {
            let u = user.get(x, y);
            let t = template.get(x, y);
            if u && t {
                intersection += 1;
            }
            if u || t {
                union += 1;
            }
            if t {
                template_on += 1;
                if user.any_near(x, y, tol) {
                    covered += 1;
                }
            }
        }
    }

    let iou = if union > 0 {
        intersection as f32 / union as f32
    } else {
        0.0
    };
    let coverage = if template_on > 0 {
        covered as f32 / template_on as f32
    } else {
        0.0
    };
    (iou, coverage)
}

pub struct RasterOptions {
    pub grid_size: usize,
    pub dilation_radius: usize,
    pub coverage_radius: usize,
    pub iou_weight: f32,
    pub coverage_weight: f32,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            grid_size: 64,
            dilation_radius: 1,
            coverage_radius: 2,
            iou_weight: 0.4,
            coverage_weight: 0.6,
        }
    }
}

pub fn similarity(user: &[Stroke], template: &[Stroke], opts: &RasterOptions) -> ImageSimilarity {
    let ug = rasterize(user, opts.grid_size, opts.dilation_radius);
    let tg = rasterize(template, opts.grid_size, opts.dilation_radius);
    let (iou, coverage) = compare_grids(&ug, &tg, opts.coverage_radius);

    ImageSimilarity {
        iou,
        coverage,
        similarity: opts.iou_weight * iou + opts.coverage_weight * coverage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_line_with_thickness() {
        let s = Stroke::from_pairs(&[(10.0, 50.0), (20.0, 50.0)]);
        let g = rasterize(&[s], 10, 1);
        // Cells x=0..=3 (dilated from 1..=2), rows 4..=6
        assert_eq!(g.count_on(), 4 * 3);
        assert!(g.get(0, 4) && g.get(3, 6));
        assert!(!g.get(4, 5));
    }

    #[test]
    fn test_no_dilation_diagonal() {
        let s = Stroke::from_pairs(&[(0.0, 0.0), (45.0, 45.0)]);
        let g = rasterize(&[s], 10, 0);
        assert_eq!(g.count_on(), 5);
        for i in 0..5 {
            assert!(g.get(i, i));
        }
    }

    #[test]
    fn test_single_point_stroke_draws_nothing() {
        let s = Stroke::from_pairs(&[(50.0, 50.0)]);
        assert_eq!(rasterize(&[s], 64, 1).count_on(), 0);
    }

    #[test]
    fn test_far_edge_is_clipped() {
        // x = 100 maps to column `size`, outside the grid
        let s = Stroke::from_pairs(&[(100.0, 100.0), (100.0, 100.0)]);
        assert_eq!(rasterize(&[s], 8, 1).count_on(), 0);
    }

    #[test]
    fn test_off_canvas_endpoint_is_clipped() {
        // Column 32 up to the right border, one row
        let s = Stroke::from_pairs(&[(50.0, 50.0), (1e12, 50.0)]);
        let g = rasterize(&[s], 64, 0);
        assert_eq!(g.count_on(), 32);
        assert!(g.get(32, 32) && g.get(63, 32));

        let outside = Stroke::from_pairs(&[(200.0, 10.0), (300.0, 90.0)]);
        assert_eq!(rasterize(&[outside], 64, 1).count_on(), 0);

        let nan = Stroke::from_pairs(&[(f32::NAN, 10.0), (30.0, 30.0)]);
        assert_eq!(rasterize(&[nan], 64, 1).count_on(), 0);
    }

    #[test]
    fn test_clip_keeps_on_canvas_segments_exact() {
        let a = Point::new(12.3, 45.6);
        let b = Point::new(78.9, 0.1);
        assert_eq!(clip_to_canvas(a, b), Some((a, b)));
    }

    #[test]
    fn test_empty_grids_score_zero() {
        let sim = similarity(&[], &[], &RasterOptions::default());
        assert_eq!(sim.iou, 0.0);
        assert_eq!(sim.coverage, 0.0);
        assert_eq!(sim.similarity, 0.0);
    }

    #[test]
    fn test_coverage_tolerates_small_offset() {
        let t = Stroke::from_pairs(&[(10.0, 50.0), (90.0, 50.0)]);
        let u = Stroke::from_pairs(&[(10.0, 53.0), (90.0, 53.0)]);
        let sim = similarity(&[u], &[t], &RasterOptions::default());
        assert_eq!(sim.coverage, 1.0);
        assert!(sim.iou < 1.0);
    }
}
