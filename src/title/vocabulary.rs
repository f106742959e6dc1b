// WHY: Centralized word lists for token classification
// Read-only process-wide data, built once and shared by every worker

use std::collections::HashSet;
use std::sync::OnceLock;

/// Color adjectives dropped from short titles
pub const COLOR_WORDS: &[&str] = &[
    "black", "white", "red", "blue", "green", "yellow", "purple", "orange", "pink",
    "gray", "grey", "brown", "beige", "gold", "silver", "navy", "teal", "maroon",
];

/// Connectors that mark the end of the product-name portion of a title
pub const FILLER_WORDS: &[&str] = &["for", "with", "plus"];

/// Set-backed lookup over the fixed vocabularies
pub struct Vocabulary {
    colors: HashSet<&'static str>,
    fillers: HashSet<&'static str>,
}

impl Vocabulary {
    /// Build lookup sets from the default word lists
    pub fn new() -> Self {
        Self {
            colors: COLOR_WORDS.iter().copied().collect(),
            fillers: FILLER_WORDS.iter().copied().collect(),
        }
    }

    /// Exact match against the color list; callers lowercase first
    pub fn is_color(&self, word: &str) -> bool {
        self.colors.contains(word)
    }

    /// Exact match against the filler list; callers lowercase first
    pub fn is_filler(&self, word: &str) -> bool {
        self.fillers.contains(word)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared vocabulary instance
pub fn vocabulary() -> &'static Vocabulary {
    static SHARED: OnceLock<Vocabulary> = OnceLock::new();
    SHARED.get_or_init(Vocabulary::new)
}
