use crate::error::SfResult;
use crate::loader::{from_raw, RawStrokes};
use crate::scorer::{Scorer, ValidationResult};
use crate::templates::TemplateLibrary;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// One attempt as sent by the drawing surface.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckRequest {
    pub symbol: String,
    pub strokes: RawStrokes,
    #[serde(default)]
    pub template: Option<RawStrokes>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResponse {
    pub symbol: String,
    pub message: &'static str,
    #[serde(flatten)]
    pub result: ValidationResult,
}

/// Service: validate one attempt. Falls back to the built-in template for
/// the symbol when the request carries none.
pub fn check(scorer: &Scorer, req: &CheckRequest) -> SfResult<ValidationResult> {
    let strokes = from_raw(req.strokes.clone())?;
    let custom = match &req.template {
        Some(t) => Some(from_raw(t.clone())?),
        None => None,
    };

    let mut chars = req.symbol.chars();
    let symbol = match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        // Multi-char or empty identifiers can't be in the catalog
        _ => {
            return Ok(ValidationResult::unknown(
                !strokes.is_empty(),
                scorer.params.unknown_score,
            ))
        }
    };

    let template = custom
        .as_deref()
        .or_else(|| TemplateLibrary::builtin().get(symbol).map(|t| t.as_slice()));

    Ok(scorer.validate(&strokes, symbol, template))
}

/// Service: JSON request in, JSON response out.
pub fn check_json(scorer: &Scorer, request: &str) -> SfResult<String> {
    let req: CheckRequest = serde_json::from_str(request)?;
    let result = check(scorer, &req)?;
    let resp = CheckResponse {
        symbol: req.symbol,
        message: result.reason.message(),
        result,
    };
    Ok(serde_json::to_string(&resp)?)
}

/// Service: validate independent attempts in parallel, preserving order.
pub fn check_batch(scorer: &Scorer, reqs: &[CheckRequest]) -> Vec<SfResult<ValidationResult>> {
    reqs.par_iter().map(|r| check(scorer, r)).collect()
}
