pub mod api;
pub mod calibrate;
pub mod catalog;
pub mod config;
pub mod error;
pub mod geometry;
pub mod loader;
pub mod scorer;
pub mod templates;
// cmd and reports are binary modules, declared from main.rs.

pub use error::{SfResult, StrokeForgeError};
