use serde::Serialize;
use std::sync::OnceLock;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StrokeKind {
    Straight,
    Curved,
    Loop,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StrokeHint {
    pub direction: Option<Direction>,
    pub kind: StrokeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AspectRange {
    pub min: f32,
    pub max: f32,
}

impl AspectRange {
    pub fn contains(&self, ratio: f32) -> bool {
        ratio >= self.min && ratio <= self.max
    }
}

/// Expected structure of one symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterPattern {
    pub symbol: char,
    pub expected_strokes: usize,
    pub min_strokes: Option<usize>,
    pub stroke_hints: &'static [StrokeHint],
    pub aspect_ratio: Option<AspectRange>,
    pub is_angular: bool,
    pub is_circular: bool,
    pub has_circular_part: bool,
}

impl CharacterPattern {
    pub const fn angular(symbol: char, expected_strokes: usize, min_strokes: usize) -> Self {
        Self {
            symbol,
            expected_strokes,
            min_strokes: Some(min_strokes),
            stroke_hints: &[],
            aspect_ratio: None,
            is_angular: true,
            is_circular: false,
            has_circular_part: false,
        }
    }

    pub fn effective_min_strokes(&self) -> usize {
        self.min_strokes
            .unwrap_or_else(|| self.expected_strokes.saturating_sub(1).max(1))
    }

    /// Angular with no curved component: a loop here is a wrong shape.
    pub fn is_angular_only(&self) -> bool {
        self.is_angular && !self.has_circular_part
    }
}

const fn straight(direction: Direction) -> StrokeHint {
    StrokeHint {
        direction: Some(direction),
        kind: StrokeKind::Straight,
    }
}

static HINTS_GIYEOK: [StrokeHint; 2] = [straight(Direction::Right), straight(Direction::Down)];
static HINTS_NIEUN: [StrokeHint; 2] = [straight(Direction::Down), straight(Direction::Right)];
static HINTS_DIGEUT: [StrokeHint; 3] = [
    straight(Direction::Right),
    straight(Direction::Down),
    straight(Direction::Right),
];
static HINTS_SIOT: [StrokeHint; 2] = [straight(Direction::Down), straight(Direction::Down)];
static HINTS_IEUNG: [StrokeHint; 1] = [StrokeHint {
    direction: None,
    kind: StrokeKind::Loop,
}];

fn hangul_patterns() -> Vec<CharacterPattern> {
    use CharacterPattern as P;
    vec![
        // Consonants
        P {
            stroke_hints: &HINTS_GIYEOK,
            aspect_ratio: Some(AspectRange { min: 0.5, max: 2.0 }),
            min_strokes: None,
            ..P::angular('ㄱ', 2, 1)
        },
        P {
            stroke_hints: &HINTS_NIEUN,
            aspect_ratio: Some(AspectRange { min: 0.5, max: 2.0 }),
            min_strokes: None,
            ..P::angular('ㄴ', 2, 1)
        },
        P {
            stroke_hints: &HINTS_DIGEUT,
            aspect_ratio: Some(AspectRange { min: 0.4, max: 2.5 }),
            min_strokes: None,
            ..P::angular('ㄷ', 3, 2)
        },
        P::angular('ㄹ', 6, 4),
        P {
            aspect_ratio: Some(AspectRange { min: 0.6, max: 1.6 }),
            ..P::angular('ㅁ', 4, 3)
        },
        P::angular('ㅂ', 4, 3),
        P {
            stroke_hints: &HINTS_SIOT,
            min_strokes: None,
            ..P::angular('ㅅ', 2, 1)
        },
        P {
            symbol: 'ㅇ',
            expected_strokes: 1,
            min_strokes: None,
            stroke_hints: &HINTS_IEUNG,
            aspect_ratio: Some(AspectRange { min: 0.7, max: 1.4 }),
            is_angular: false,
            is_circular: true,
            has_circular_part: false,
        },
        P::angular('ㅈ', 3, 2),
        P::angular('ㅊ', 4, 3),
        P::angular('ㅋ', 3, 2),
        P::angular('ㅌ', 4, 3),
        P::angular('ㅍ', 4, 3),
        P {
            is_angular: false,
            has_circular_part: true,
            ..P::angular('ㅎ', 3, 2)
        },
        // Vowels
        P::angular('ㅏ', 2, 2),
        P::angular('ㅑ', 3, 2),
        P::angular('ㅓ', 2, 2),
        P::angular('ㅕ', 3, 2),
        P::angular('ㅗ', 2, 2),
        P::angular('ㅛ', 3, 2),
        P::angular('ㅜ', 2, 2),
        P::angular('ㅠ', 3, 2),
        P::angular('ㅡ', 1, 1),
        P::angular('ㅣ', 1, 1),
        // Double consonants
        P::angular('ㄲ', 4, 3),
        P::angular('ㄸ', 6, 4),
        P::angular('ㅃ', 8, 5),
        P::angular('ㅆ', 4, 3),
        P::angular('ㅉ', 6, 4),
        // Complex vowels
        P::angular('ㅐ', 3, 2),
        P::angular('ㅒ', 4, 3),
        P::angular('ㅔ', 3, 2),
        P::angular('ㅖ', 4, 3),
        P::angular('ㅘ', 4, 3),
        P::angular('ㅙ', 5, 4),
        P::angular('ㅚ', 3, 2),
        P::angular('ㅝ', 4, 3),
        P::angular('ㅞ', 5, 4),
        P::angular('ㅟ', 3, 2),
        P::angular('ㅢ', 2, 2),
    ]
}

/// Read-only symbol → pattern table.
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    patterns: Vec<CharacterPattern>,
}

impl PatternCatalog {
    pub fn from_patterns(patterns: Vec<CharacterPattern>) -> Self {
        Self { patterns }
    }

    /// The built-in Hangul jamo catalog, built on first use.
    pub fn hangul() -> &'static PatternCatalog {
        static CATALOG: OnceLock<PatternCatalog> = OnceLock::new();
        CATALOG.get_or_init(|| PatternCatalog::from_patterns(hangul_patterns()))
    }

    pub fn get(&self, symbol: char) -> Option<&CharacterPattern> {
        self.patterns.iter().find(|p| p.symbol == symbol)
    }

    /// Lookup by string; anything that is not exactly one char is a miss.
    pub fn get_str(&self, symbol: &str) -> Option<&CharacterPattern> {
        let mut chars = symbol.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => self.get(c),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CharacterPattern> {
        self.patterns.iter()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_hangul_catalog_size() {
        assert_eq!(PatternCatalog::hangul().len(), 40);
    }

    #[test]
    fn test_min_strokes_default() {
        let giyeok = PatternCatalog::hangul().get('ㄱ').unwrap();
        assert_eq!(giyeok.min_strokes, None);
        assert_eq!(giyeok.effective_min_strokes(), 1);

        let rieul = PatternCatalog::hangul().get('ㄹ').unwrap();
        assert_eq!(rieul.effective_min_strokes(), 4);
    }

    #[test]
    fn test_single_stroke_default_never_zero() {
        let p = CharacterPattern {
            min_strokes: None,
            ..CharacterPattern::angular('x', 1, 1)
        };
        assert_eq!(p.effective_min_strokes(), 1);
    }

    #[test]
    fn test_flags() {
        let cat = PatternCatalog::hangul();
        assert!(cat.get('ㅇ').unwrap().is_circular);
        assert!(!cat.get('ㅎ').unwrap().is_angular_only());
        assert!(cat.get('ㅁ').unwrap().is_angular_only());
    }

    #[test]
    fn test_get_str_rejects_multichar() {
        let cat = PatternCatalog::hangul();
        assert!(cat.get_str("ㄱ").is_some());
        assert!(cat.get_str("ㄱㄴ").is_none());
        assert!(cat.get_str("").is_none());
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!(Direction::from_str("down").unwrap(), Direction::Down);
        assert_eq!(StrokeKind::Loop.to_string(), "loop");
    }
}
