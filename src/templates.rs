use crate::error::{SfResult, StrokeForgeError};
use crate::geometry::{sanitize_stroke_set, StrokeSet};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, warn};

const BUILTIN_TEMPLATES: &str = include_str!("../data/templates.json");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateEntry {
    pub char: char,
    #[serde(default)]
    pub category: String,
    pub strokes: StrokeSet,
}

/// Reference stroke paths, keyed by symbol.
#[derive(Debug, Clone, Default)]
pub struct TemplateLibrary {
    entries: HashMap<char, TemplateEntry>,
}

impl TemplateLibrary {
    /// Templates shipped with the crate. Parsed once; panics only if the
    /// embedded data is corrupt, which the test suite guards against.
    pub fn builtin() -> &'static TemplateLibrary {
        static LIBRARY: OnceLock<TemplateLibrary> = OnceLock::new();
        LIBRARY.get_or_init(|| {
            Self::from_reader(BUILTIN_TEMPLATES.as_bytes())
                .unwrap_or_else(|e| panic!("❌ Embedded template data is invalid: {}", e))
        })
    }

    pub fn from_reader<R: Read>(reader: R) -> SfResult<Self> {
        let raw: Vec<TemplateEntry> = serde_json::from_reader(reader)?;
        let mut entries = HashMap::with_capacity(raw.len());

        for mut entry in raw {
            entry.strokes = sanitize_stroke_set(std::mem::take(&mut entry.strokes))?;
            if entry.strokes.is_empty() {
                return Err(StrokeForgeError::Validation(format!(
                    "Template '{}' has no strokes",
                    entry.char
                )));
            }
            if let Some(prev) = entries.insert(entry.char, entry) {
                warn!("Duplicate template for '{}', keeping the last one", prev.char);
            }
        }

        debug!("Loaded {} templates", entries.len());
        Ok(Self { entries })
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SfResult<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn get(&self, symbol: char) -> Option<&StrokeSet> {
        self.entries.get(&symbol).map(|e| &e.strokes)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PatternCatalog;

    #[test]
    fn test_builtin_parses() {
        let lib = TemplateLibrary::builtin();
        assert_eq!(lib.len(), 40);
        assert_eq!(lib.get('ㄱ').unwrap().len(), 2);
    }

    #[test]
    fn test_every_catalog_symbol_has_template() {
        let lib = TemplateLibrary::builtin();
        for p in PatternCatalog::hangul().iter() {
            assert!(lib.get(p.symbol).is_some(), "missing template for {}", p.symbol);
        }
    }

    #[test]
    fn test_negative_template_rejected() {
        let json = r#"[{"char": "a", "strokes": [[{"x": -5, "y": 1}, {"x": 2, "y": 2}]]}]"#;
        assert!(matches!(
            TemplateLibrary::from_reader(json.as_bytes()),
            Err(StrokeForgeError::InvalidPoint { .. })
        ));
    }

    #[test]
    fn test_empty_template_rejected() {
        let json = r#"[{"char": "a", "strokes": [[]]}]"#;
        assert!(matches!(
            TemplateLibrary::from_reader(json.as_bytes()),
            Err(StrokeForgeError::Validation(_))
        ));
    }
}
