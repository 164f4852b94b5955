pub mod dtw;
pub mod engine;
pub mod normalize;
pub mod raster;
pub mod shape;
pub mod types;

use self::raster::RasterOptions;
use self::shape::LoopRule;
pub use self::types::{ReasonCode, ScoreDetails, ValidationResult};
use crate::catalog::PatternCatalog;
use crate::config::ValidationParams;
use crate::error::SfResult;
use crate::geometry::Stroke;

/// Validation entry point: tuned parameters plus the pattern catalog they apply to.
#[derive(Debug, Clone)]
pub struct Scorer<'c> {
    pub params: ValidationParams,
    catalog: &'c PatternCatalog,
}

impl Scorer<'static> {
    /// Scorer over the built-in Hangul catalog.
    pub fn new(params: ValidationParams) -> SfResult<Self> {
        Self::with_catalog(params, PatternCatalog::hangul())
    }
}

impl Default for Scorer<'static> {
    fn default() -> Self {
        Self {
            params: ValidationParams::default(),
            catalog: PatternCatalog::hangul(),
        }
    }
}

impl<'c> Scorer<'c> {
    pub fn with_catalog(params: ValidationParams, catalog: &'c PatternCatalog) -> SfResult<Self> {
        params.check()?;
        Ok(Self { params, catalog })
    }

    pub fn catalog(&self) -> &'c PatternCatalog {
        self.catalog
    }

    pub fn loop_rule(&self) -> LoopRule {
        LoopRule::from(&self.params)
    }

    pub fn raster_options(&self) -> RasterOptions {
        RasterOptions {
            grid_size: self.params.grid_size,
            dilation_radius: self.params.dilation_radius,
            coverage_radius: self.params.coverage_radius,
            iou_weight: self.params.iou_weight,
            coverage_weight: self.params.coverage_weight,
        }
    }

    /// Validates one attempt. Call once per completed stroke with the full
    /// accumulated stroke set; no state is carried between calls.
    pub fn validate(
        &self,
        strokes: &[Stroke],
        symbol: char,
        template: Option<&[Stroke]>,
    ) -> ValidationResult {
        engine::validate(self, strokes, symbol, template)
    }
}
