use crate::error::SfResult;
use crate::geometry::{sanitize_stroke_set, Point, Stroke, StrokeSet};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// A point as the drawing surface may send it: `{"x":..,"y":..}` or `[x, y]`.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum RawPoint {
    Object { x: f32, y: f32 },
    Pair([f32; 2]),
}

impl From<RawPoint> for Point {
    fn from(raw: RawPoint) -> Self {
        match raw {
            RawPoint::Object { x, y } => Point::new(x, y),
            RawPoint::Pair([x, y]) => Point::new(x, y),
        }
    }
}

pub type RawStrokes = Vec<Vec<RawPoint>>;

/// Converts raw strokes, rejecting bad coordinates and dropping empty strokes.
pub fn from_raw(raw: RawStrokes) -> SfResult<StrokeSet> {
    let strokes = raw
        .into_iter()
        .map(|s| Stroke::new(s.into_iter().map(Point::from).collect()))
        .collect();
    sanitize_stroke_set(strokes)
}

pub fn read_strokes_json<R: Read>(reader: R) -> SfResult<StrokeSet> {
    let raw: RawStrokes = serde_json::from_reader(reader)?;
    from_raw(raw)
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    stroke: usize,
    x: f32,
    y: f32,
}

/// Rows of `stroke,x,y`; strokes are ordered by first appearance of their index.
pub fn read_strokes_csv<R: Read>(reader: R) -> SfResult<StrokeSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut order: Vec<usize> = Vec::new();
    let mut strokes: StrokeSet = Vec::new();
    let mut rows = 0;

    for result in rdr.deserialize() {
        let row: CsvRow = result?;
        rows += 1;
        let slot = match order.iter().position(|&id| id == row.stroke) {
            Some(i) => i,
            None => {
                order.push(row.stroke);
                strokes.push(Stroke::default());
                strokes.len() - 1
            }
        };
        strokes[slot].points.push(Point::new(row.x, row.y));
    }

    debug!("Read {} CSV rows into {} strokes", rows, strokes.len());
    sanitize_stroke_set(strokes)
}

/// Dispatches on extension: `.csv` is CSV, anything else JSON.
pub fn load_strokes<P: AsRef<Path>>(path: P) -> SfResult<StrokeSet> {
    let path = path.as_ref();
    info!("📂 Loading strokes from {}", path.display());
    let file = File::open(path)?;

    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    if is_csv {
        read_strokes_csv(file)
    } else {
        read_strokes_json(file)
    }
}
