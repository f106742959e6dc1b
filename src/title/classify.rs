// WHY: Token predicates used to filter title words before assembly
// All predicates are total: punctuation-only and empty tokens are Plain

use super::vocabulary::vocabulary;

/// Minimum cleaned length for a token to count as a product code
pub const MIN_PRODUCT_CODE_LEN: usize = 4;

/// Computed classification of a whitespace-delimited title token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Color,
    ProductCode,
    Filler,
    Measurement,
    Plain,
}

/// True if the token, reduced to its ASCII letters and lowercased, is a color word
pub fn is_color_token(token: &str) -> bool {
    let letters: String = token
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    vocabulary().is_color(&letters)
}

/// True if the token looks like a SKU or model number
///
/// Non-word characters are stripped first. Codes are at least
/// [`MIN_PRODUCT_CODE_LEN`] characters and are either all digits or mix
/// digits with letters. Purely alphabetic tokens never qualify.
pub fn is_product_code(token: &str) -> bool {
    let cleaned: Vec<char> = token
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect();

    if cleaned.len() < MIN_PRODUCT_CODE_LEN {
        return false;
    }

    let has_digit = cleaned.iter().any(|c| c.is_ascii_digit());
    if cleaned.iter().all(|c| c.is_ascii_digit()) {
        return true;
    }

    let has_letter = cleaned.iter().any(|c| c.is_alphabetic());
    has_digit && has_letter
}

/// True if the token, lowercased, is a filler connector
pub fn is_filler_word(token: &str) -> bool {
    vocabulary().is_filler(&token.to_lowercase())
}

/// Token that is a bare quantity with an optional unit glued on, e.g. `10ml`, `2.5`, `-5`
fn is_measurement_token(token: &str) -> bool {
    let body = token.trim_start_matches('-');
    let digits_end = body
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(body.len());
    let (number, unit) = body.split_at(digits_end);

    number.starts_with(|c: char| c.is_ascii_digit())
        && unit.chars().all(|c| c.is_ascii_alphabetic())
}

/// Classify a token; earlier kinds win when more than one applies
pub fn classify_token(token: &str) -> TokenKind {
    if is_color_token(token) {
        TokenKind::Color
    } else if is_product_code(token) {
        TokenKind::ProductCode
    } else if is_filler_word(token) {
        TokenKind::Filler
    } else if is_measurement_token(token) {
        TokenKind::Measurement
    } else {
        TokenKind::Plain
    }
}
