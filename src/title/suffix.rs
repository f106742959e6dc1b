// WHY: Trailing quantity/unit annotations ("10ml", "2.5 Oz Each") must survive truncation
// Uses one end-anchored regex-automata pattern plus a filler-word lookback

use anyhow::Result;
use regex_automata::meta::Regex;
use std::sync::OnceLock;
use tracing::{debug, warn};

use super::classify::is_filler_word;

/// Optional hyphen, number, optional unit word, optional second unit word, end of text
/// The leftmost match wins, so digits glued to a word ("X200") still split off
pub const MEASUREMENT_PATTERN: &str = r"-?\d+(?:\.\d+)?\s*[A-Za-z]*(?:\s+[A-Za-z]+)?$";

/// Title split into the part to shorten and the detachable measurement suffix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixSplit<'a> {
    /// Text before the suffix, trimmed of whitespace only
    pub prefix: &'a str,
    /// Suffix with leading hyphens removed, `None` when nothing was detached
    pub suffix: Option<&'a str>,
}

impl<'a> SuffixSplit<'a> {
    fn whole(title: &'a str) -> Self {
        Self {
            prefix: title.trim(),
            suffix: None,
        }
    }
}

/// Compiled measurement-suffix matcher
pub struct SuffixExtractor {
    pattern: Regex,
}

impl SuffixExtractor {
    /// Compile the measurement pattern
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(MEASUREMENT_PATTERN)?;
        debug!("Compiled measurement pattern: {}", MEASUREMENT_PATTERN);
        Ok(Self { pattern })
    }

    /// Split a title into prefix and measurement suffix without allocating
    pub fn split<'a>(&self, title: &'a str) -> SuffixSplit<'a> {
        let Some(found) = self.pattern.find(title) else {
            return SuffixSplit::whole(title);
        };

        let before = title[..found.start()].trim();

        // "for 5 years", "with 2 pumps": the number belongs to the sentence
        if before.split_whitespace().last().is_some_and(is_filler_word) {
            debug!("Measurement match in {:?} follows a filler word, keeping title whole", title);
            return SuffixSplit::whole(title);
        }

        let suffix = title[found.range()].trim_start_matches('-');
        SuffixSplit {
            prefix: before,
            suffix: Some(suffix),
        }
    }
}

fn shared_extractor() -> Option<&'static SuffixExtractor> {
    static SHARED: OnceLock<Option<SuffixExtractor>> = OnceLock::new();
    SHARED
        .get_or_init(|| match SuffixExtractor::new() {
            Ok(extractor) => Some(extractor),
            Err(e) => {
                warn!("Measurement pattern failed to compile, suffixes disabled: {}", e);
                None
            }
        })
        .as_ref()
}

/// Split a title into its prefix and measurement suffix using the shared extractor
pub fn split_suffix(title: &str) -> SuffixSplit<'_> {
    match shared_extractor() {
        Some(extractor) => extractor.split(title),
        None => SuffixSplit::whole(title),
    }
}

/// Owned variant returning `(prefix, suffix)`, the suffix empty when none was found
pub fn extract_suffix(title: &str) -> (String, String) {
    let split = split_suffix(title);
    (
        split.prefix.to_string(),
        split.suffix.unwrap_or_default().to_string(),
    )
}
