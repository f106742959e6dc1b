// WHY: Second pipeline stage, assembles the final SEO title from a normalized one
// Planning (steps that pick words) is split from rendering (steps that build the string)

use std::fmt;

use super::classify::{is_color_token, is_filler_word, is_product_code};
use super::suffix::split_suffix;
use super::ShortTitleRules;

/// Words chosen for a short title, borrowed from the source title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitlePlan<'a> {
    /// Filtered, filler-bounded and capped product-name words
    pub main_tokens: Vec<&'a str>,
    /// Measurement suffix kept as the final segment
    pub suffix: Option<&'a str>,
    /// Whether accumulation stopped at a filler word
    pub used_filler: bool,
}

/// Final output of the generator
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShortTitle {
    pub text: String,
    pub suffix_retained: bool,
    /// Whether the character budget cut the assembled title
    pub truncated: bool,
}

impl ShortTitle {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for ShortTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<ShortTitle> for String {
    fn from(title: ShortTitle) -> Self {
        title.text
    }
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == ',' || c == '-'
}

/// Pick the words of a short title: suffix split, token filtering, filler stop and word cap
pub fn plan_short_title<'a>(title: &'a str, rules: &ShortTitleRules) -> TitlePlan<'a> {
    let split = split_suffix(title);

    let mut main_tokens = Vec::new();
    let mut used_filler = false;
    let kept = split
        .prefix
        .split_whitespace()
        .filter(|token| !is_color_token(token) && !is_product_code(token));
    for token in kept {
        if is_filler_word(token) {
            used_filler = true;
            break;
        }
        main_tokens.push(token);
    }

    // Cap only with a suffix, or for long titles that never hit a filler
    let capped = split.suffix.is_some()
        || (!used_filler && main_tokens.len() > rules.long_title_threshold);
    if capped {
        main_tokens.truncate(rules.word_cap);
    }

    TitlePlan {
        main_tokens,
        suffix: split.suffix,
        used_filler,
    }
}

impl TitlePlan<'_> {
    /// Join the words, attach the suffix and enforce the character budget
    pub fn render(&self, rules: &ShortTitleRules) -> ShortTitle {
        let main_text = self.main_tokens.join(" ");
        let assembled = match self.suffix {
            Some(suffix) => format!("{main_text} - {suffix}"),
            None => main_text,
        };

        let trimmed = assembled.trim_matches(is_separator);
        let (text, truncated) = match trimmed.char_indices().nth(rules.max_chars) {
            Some((cut, _)) => (trimmed[..cut].trim_end_matches(is_separator), true),
            None => (trimmed, false),
        };

        ShortTitle {
            text: text.to_string(),
            suffix_retained: self.suffix.is_some(),
            truncated,
        }
    }
}

/// Shorten a normalized title under the given rules
pub fn shorten_with_rules(title: &str, rules: &ShortTitleRules) -> ShortTitle {
    plan_short_title(title, rules).render(rules)
}

/// Shorten a normalized title with the default rules
pub fn generate_short_title(title: &str) -> String {
    shorten_with_rules(title, &ShortTitleRules::default()).text
}
