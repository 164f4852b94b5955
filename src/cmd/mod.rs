pub mod calibrate;
pub mod catalog;
pub mod validate;

use strokeforge::error::{SfResult, StrokeForgeError};

/// A command-line symbol must be exactly one character.
pub fn parse_symbol(raw: &str) -> SfResult<char> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(StrokeForgeError::UnknownSymbol(raw.to_string())),
    }
}
