use std::sync::LazyLock;

use regex::Regex;

/// Keywords that mark a message as a price question. Matched as plain
/// substrings (no word boundaries): "pricey" and "costs" count, which is the
/// long-standing behavior callers depend on.
pub const PRICE_KEYWORDS: [&str; 7] =
    ["price", "cost", "value", "worth", "expensive", "cheap", "retail"];

pub fn is_price_query(text: &str) -> bool {
    let normalized = text.to_lowercase();
    PRICE_KEYWORDS.iter().any(|keyword| normalized.contains(keyword))
}

/// Ordered candidate rules for spotting a set number in free text. The full
/// `NNNN(N)-N` form must come before the bare digit run, otherwise a valid
/// number like `10179-1` would be truncated at the hyphen.
static SET_NUMBER_RULES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\b(\d{4,5}-\d+)\b",
        r"\b(\d{4,5})\b",
        r"\bset\s+(\d{4,5})\b",
        r"#(\d{4,5})\b",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("set number rules are static"))
    .collect()
});

/// Append the default variant suffix when the number lacks one. Idempotent:
/// an already-suffixed number passes through unchanged.
pub fn normalize_set_number(raw: &str) -> String {
    if raw.contains('-') {
        raw.to_string()
    } else {
        format!("{raw}-1")
    }
}

/// First-match-wins extraction over the ordered rule list, case-insensitive.
pub fn extract_set_number(text: &str) -> Option<String> {
    let normalized = text.to_lowercase();
    SET_NUMBER_RULES.iter().find_map(|rule| {
        rule.captures(&normalized)
            .and_then(|captures| captures.get(1))
            .map(|matched| normalize_set_number(matched.as_str()))
    })
}

/// Derive search terms from a message that carried no set number: keep
/// alphanumeric tokens longer than 3 characters, minus the price keywords.
pub fn search_terms(text: &str) -> Vec<String> {
    tokenize(&text.to_lowercase())
        .into_iter()
        .filter(|token| token.len() > 3 && !PRICE_KEYWORDS.contains(&token.as_str()))
        .collect()
}

fn tokenize(text: &str) -> Vec<String> {
    let mut sanitized = String::with_capacity(text.len());
    for character in text.chars() {
        if character.is_ascii_alphanumeric() {
            sanitized.push(character);
        } else {
            sanitized.push(' ');
        }
    }
    sanitized.split_whitespace().map(|token| token.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::{extract_set_number, is_price_query, normalize_set_number, search_terms};

    #[test]
    fn price_keywords_match_as_substrings() {
        assert!(is_price_query("What's the PRICE of 75192?"));
        assert!(is_price_query("is this set expensive"));
        assert!(is_price_query("how much does it cost"));
        assert!(is_price_query("resale values dropped")); // substring semantics
        assert!(!is_price_query("hello"));
        assert!(!is_price_query("tell me about the Millennium Falcon"));
    }

    #[test]
    fn full_set_number_is_preferred_over_bare_digits() {
        assert_eq!(extract_set_number("How much does 10179-1 cost?").as_deref(), Some("10179-1"));
        assert_eq!(extract_set_number("set 75192-1 please").as_deref(), Some("75192-1"));
    }

    #[test]
    fn bare_digit_run_gains_default_variant() {
        assert_eq!(extract_set_number("What's the price of 75192?").as_deref(), Some("75192-1"));
        assert_eq!(extract_set_number("price of #10030").as_deref(), Some("10030-1"));
        assert_eq!(extract_set_number("SET 6989 worth anything?").as_deref(), Some("6989-1"));
    }

    #[test]
    fn text_without_set_number_yields_nothing() {
        assert_eq!(extract_set_number("no numbers here"), None);
        assert_eq!(extract_set_number("price of 123"), None);
        assert_eq!(extract_set_number("order 123456 shipped"), None);
    }

    #[test]
    fn normalization_is_idempotent() {
        for raw in ["75192", "75192-1", "10179-2"] {
            let once = normalize_set_number(raw);
            let twice = normalize_set_number(&once);
            assert_eq!(once, twice);
            assert!(twice.contains('-'));
        }
    }

    #[test]
    fn search_terms_drop_price_keywords_and_short_tokens() {
        let terms = search_terms("What is the price of the big falcon set?");
        assert_eq!(terms, vec!["what".to_string(), "falcon".to_string()]);
    }

    #[test]
    fn search_terms_strip_punctuation() {
        let terms = search_terms("value of the castle, please!");
        assert_eq!(terms, vec!["castle".to_string(), "please".to_string()]);
    }
}
