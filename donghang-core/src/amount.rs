//! Amount extraction from colloquial Korean amount phrases.
//!
//! "5천원" / "5천 원" → 5 000, "3만원" → 30 000, "5,000원" → 5 000.

use anyhow::Result;
use regex::Regex;

/// One unit pattern, selected when `marker` occurs anywhere in the text.
struct UnitPattern {
    marker: char,
    re: Regex,
    multiplier: u64,
}

/// Detects a won amount in normalized (lower-cased, trimmed) text.
///
/// Patterns are tried in declaration order, and selection is by marker
/// character rather than by regex success: the first pattern whose marker
/// occurs in the text is the only one evaluated. "5천원" always goes
/// through the "천" pattern, and a malformed "천" phrase yields 0 instead
/// of falling back to the plain "원" pattern.
pub struct AmountExtractor {
    units: Vec<UnitPattern>,
}

impl AmountExtractor {
    pub fn new() -> Result<Self> {
        let units = vec![
            UnitPattern {
                marker: '천',
                re: Regex::new(r"(\d+)\s*천")?,
                multiplier: 1_000,
            },
            UnitPattern {
                marker: '만',
                re: Regex::new(r"(\d+)\s*만")?,
                multiplier: 10_000,
            },
            // Comma grouping is only meaningful for the plain won form.
            UnitPattern {
                marker: '원',
                re: Regex::new(r"(\d+(?:,\d+)?)\s*원")?,
                multiplier: 1,
            },
        ];
        Ok(Self { units })
    }

    /// Extracted amount in won; 0 means "not found".
    pub fn extract(&self, text: &str) -> u64 {
        for unit in &self.units {
            if !text.contains(unit.marker) {
                continue;
            }
            return match unit.re.captures(text) {
                Some(caps) => caps
                    .get(1)
                    .map(|m| m.as_str().replace(',', ""))
                    .and_then(|digits| digits.parse::<u64>().ok())
                    .unwrap_or(0)
                    .saturating_mul(unit.multiplier),
                None => 0,
            };
        }
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> AmountExtractor {
        AmountExtractor::new().unwrap()
    }

    #[test]
    fn test_cheon_multiplies_by_thousand() {
        assert_eq!(extractor().extract("5천원 먹었어"), 5_000);
        assert_eq!(extractor().extract("5천 원"), 5_000);
    }

    #[test]
    fn test_man_multiplies_by_ten_thousand() {
        assert_eq!(extractor().extract("3만원 썼어"), 30_000);
        assert_eq!(extractor().extract("12만 원"), 120_000);
    }

    #[test]
    fn test_plain_won_with_commas() {
        assert_eq!(extractor().extract("5000원"), 5_000);
        assert_eq!(extractor().extract("5,000원 썼다"), 5_000);
    }

    #[test]
    fn test_bare_man_won_without_digit_is_not_found() {
        // "만원" alone means exactly 10 000 in speech, but the pattern
        // requires an explicit leading digit, so it does not parse.
        assert_eq!(extractor().extract("만원 점심 먹었어"), 0);
    }

    #[test]
    fn test_malformed_cheon_does_not_fall_back_to_won() {
        // "천" is present but not adjacent to digits; the "원" pattern is
        // never retried once the "천" marker selected its branch.
        assert_eq!(extractor().extract("천사 5000원"), 0);
    }

    #[test]
    fn test_no_amount_at_all() {
        assert_eq!(extractor().extract("오늘 날씨 어때"), 0);
    }

    #[test]
    fn test_decimal_amounts_take_integer_run_only() {
        // No decimal support; the digits before the separator match.
        assert_eq!(extractor().extract("5.5천원"), 5_000);
    }
}
