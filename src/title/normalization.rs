// WHY: First pipeline stage, turns a raw listing title into clean ASCII text
// Total over its input: absent titles normalize to the empty string

use std::borrow::Cow;

/// Characters that survive normalization: ASCII alphanumerics, space, `,` `.` `'` `-`
pub fn is_allowed_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, ' ' | ',' | '.' | '\'' | '-')
}

/// Normalize a raw title with a new allocation
pub fn normalize(raw: Option<&str>) -> String {
    let mut result = String::new();
    normalize_into(raw, &mut result);
    result
}

/// Normalize a raw title into supplied buffer
/// WHY: lets batch workers reuse one buffer per chunk
pub fn normalize_into(raw: Option<&str>, buffer: &mut String) {
    buffer.clear();
    let Some(raw) = raw else {
        return;
    };

    let mut spaced = String::with_capacity(raw.len() + 8);
    let mut chars = raw.chars().filter(|c| is_allowed_char(*c)).peekable();
    while let Some(ch) = chars.next() {
        spaced.push(ch);
        // "Widget,Blue" -> "Widget, Blue"
        if matches!(ch, ',' | '.') && chars.peek().is_some_and(|next| !next.is_whitespace()) {
            spaced.push(' ');
        }
    }

    for word in spaced.split_whitespace() {
        if !buffer.is_empty() {
            buffer.push(' ');
        }
        buffer.push_str(&title_case_word(word));
    }

    buffer.retain(|c| c.is_ascii());
}

/// A word is uppercase when it has at least one letter and no lowercase letters
pub fn is_uppercase_word(word: &str) -> bool {
    word.chars().any(|c| c.is_ascii_uppercase()) && !word.chars().any(|c| c.is_ascii_lowercase())
}

/// Map an all-uppercase word to title case, leave anything else untouched
///
/// Casing keys off the first *letter*, not the first character: leading digits
/// and punctuation pass through, that letter stays uppercase and every later
/// letter is lowercased. `"CABLE"` becomes `"Cable"` and `"10ML"` becomes
/// `"10Ml"`. Standalone acronyms are not protected: `"USB"` becomes `"Usb"`.
pub fn title_case_word(word: &str) -> Cow<'_, str> {
    if !is_uppercase_word(word) {
        return Cow::Borrowed(word);
    }

    let mut seen_letter = false;
    let mapped = word
        .chars()
        .map(|c| {
            if !c.is_ascii_alphabetic() {
                c
            } else if seen_letter {
                c.to_ascii_lowercase()
            } else {
                seen_letter = true;
                c.to_ascii_uppercase()
            }
        })
        .collect();
    Cow::Owned(mapped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_absent_and_empty() {
        assert_eq!(normalize(None), "");
        assert_eq!(normalize(Some("")), "");
        assert_eq!(normalize(Some("   ")), "");
        assert_eq!(normalize(Some("!!!***")), "");
    }

    #[test]
    fn test_normalize_removes_disallowed_chars() {
        let input = "Deluxe* Coffee Mug (12 oz) #1 Seller! @Home";
        assert_eq!(normalize(Some(input)), "Deluxe Coffee Mug 12 oz 1 Seller Home");
    }

    #[test]
    fn test_normalize_inserts_space_after_punctuation() {
        assert_eq!(normalize(Some("Widget,Blue")), "Widget, Blue");
        assert_eq!(normalize(Some("Large.Heavy Duty")), "Large. Heavy Duty");
        assert_eq!(normalize(Some("Ends with period.")), "Ends with period.");
        assert_eq!(normalize(Some("Already, spaced")), "Already, spaced");
    }

    #[test]
    fn test_normalize_splits_decimals() {
        // Decimal points are punctuation like any other period
        assert_eq!(normalize(Some("Oil 2.5oz")), "Oil 2. 5oz");
    }

    #[test]
    fn test_normalize_title_cases_uppercase_words() {
        assert_eq!(normalize(Some("SUPER DEAL Garden Hose")), "Super Deal Garden Hose");
        assert_eq!(normalize(Some("USB Cable")), "Usb Cable");
        assert_eq!(normalize(Some("iPhone McDonald eBay")), "iPhone McDonald eBay");
        assert_eq!(normalize(Some("PACK OF 10ML")), "Pack Of 10Ml");
    }

    #[test]
    fn test_normalize_strips_non_ascii() {
        assert_eq!(normalize(Some("Café Crème Brûlée Set")), "Caf Crme Brle Set");
        assert_eq!(normalize(Some("Rust 🦀 Mug")), "Rust Mug");
    }

    #[test]
    fn test_normalize_collapses_and_trims_whitespace() {
        assert_eq!(normalize(Some("  Leading and   trailing  ")), "Leading and trailing");
        // Tabs are not in the allowed set and vanish outright
        assert_eq!(normalize(Some("Tab\tJoined")), "TabJoined");
    }

    #[test]
    fn test_normalize_into_buffer_reuse() {
        let mut buffer = String::new();

        normalize_into(Some("FIRST TITLE"), &mut buffer);
        assert_eq!(buffer, "First Title");

        normalize_into(None, &mut buffer);
        assert_eq!(buffer, "");

        normalize_into(Some("second,title"), &mut buffer);
        assert_eq!(buffer, "second, title");
    }

    #[test]
    fn test_title_case_word() {
        assert_eq!(title_case_word("CABLE"), "Cable");
        assert_eq!(title_case_word("O'NEIL"), "O'neil");
        assert_eq!(title_case_word("X-RAY"), "X-ray");
        assert_eq!(title_case_word("Cable"), "Cable");
        assert_eq!(title_case_word("1234"), "1234");
        assert_eq!(title_case_word("10ML"), "10Ml");
        assert_eq!(title_case_word("-2PK"), "-2Pk");
        assert!(matches!(title_case_word("lower"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_normalize_output_alphabet() {
        let inputs = [
            "Tab\tsep\nline",
            "Ünïcödé — dash “quotes”",
            "$$$ 100% OFF!!! <b>Bold</b>",
            ",leading comma",
        ];
        for input in &inputs {
            let result = normalize(Some(*input));
            assert!(result.chars().all(is_allowed_char), "Disallowed char in {:?}", result);
            assert_eq!(result, result.trim(), "Untrimmed output for {:?}", input);
        }
    }
}
