// WHY: Title shortening core, two pure stages: normalize then shorten
// No I/O and no shared mutable state, so callers may fan titles out freely

pub mod normalization;
pub mod vocabulary;
pub mod classify;
pub mod suffix;
pub mod short_title;

// Re-export core types
pub use normalization::{normalize, normalize_into, title_case_word};
pub use classify::{classify_token, is_color_token, is_filler_word, is_product_code, TokenKind};
pub use suffix::{extract_suffix, split_suffix, SuffixExtractor, SuffixSplit};
pub use short_title::{generate_short_title, plan_short_title, shorten_with_rules, ShortTitle, TitlePlan};

/// Character budget of a short title
pub const DEFAULT_MAX_CHARS: usize = 60;

/// Limits applied while assembling a short title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortTitleRules {
    /// Maximum length of the final title in characters
    pub max_chars: usize,
    /// Number of words kept when a cap applies
    pub word_cap: usize,
    /// Word count above which a filler-free title without suffix is capped
    pub long_title_threshold: usize,
}

impl Default for ShortTitleRules {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            word_cap: 6,
            long_title_threshold: 8,
        }
    }
}

/// Full pipeline for one title: normalize, then shorten
#[derive(Debug, Clone, Default)]
pub struct TitleShortener {
    rules: ShortTitleRules,
}

impl TitleShortener {
    /// Create shortener with custom rules
    pub fn new(rules: ShortTitleRules) -> Self {
        Self { rules }
    }

    /// Create shortener with the default 60-character rules
    pub fn with_default_rules() -> Self {
        Self::new(ShortTitleRules::default())
    }

    pub fn rules(&self) -> &ShortTitleRules {
        &self.rules
    }

    /// Normalize a raw, possibly absent title
    pub fn normalize(&self, raw: Option<&str>) -> String {
        normalize(raw)
    }

    /// Shorten an already normalized title
    pub fn shorten_normalized(&self, normalized: &str) -> ShortTitle {
        shorten_with_rules(normalized, &self.rules)
    }

    /// Normalize and shorten a raw title
    pub fn shorten(&self, raw: Option<&str>) -> ShortTitle {
        self.shorten_normalized(&normalize(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_pipeline() {
        let shortener = TitleShortener::with_default_rules();

        let short = shortener.shorten(Some("PREMIUM Yoga Mat SKU-1234 Blue 10mm"));
        assert_eq!(short.as_str(), "Premium Yoga Mat - 10mm");
        assert!(short.suffix_retained);

        assert_eq!(shortener.shorten(None).as_str(), "");
    }

    #[test]
    fn test_shortener_respects_rules() {
        let shortener = TitleShortener::new(ShortTitleRules {
            max_chars: 12,
            ..Default::default()
        });
        let short = shortener.shorten(Some("Stainless Steel Water Bottle"));
        assert_eq!(short.as_str(), "Stainless St");
        assert_eq!(shortener.rules().max_chars, 12);
    }

    #[test]
    fn test_default_rules_match_generate_short_title() {
        let shortener = TitleShortener::default();
        let title = "Organic Green Tea Bags for Daily Wellness Support 100ct";
        assert_eq!(shortener.shorten_normalized(title).text, generate_short_title(title));
    }
}
