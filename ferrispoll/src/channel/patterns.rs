//! Prompt pattern helpers.

use regex::bytes::Regex;

/// Combine several prompt patterns into one alternation.
///
/// Inline flags such as `(?mi)` stay scoped to their own branch.
pub fn combine_patterns<'a>(patterns: impl IntoIterator<Item = &'a Regex>) -> Result<Regex, regex::Error> {
    let combined = patterns
        .into_iter()
        .map(|p| format!("(?:{})", p.as_str()))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&combined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_prompt_matches_each_branch() {
        let exec = Regex::new(r"(?mi)^[\w.\-]{1,63}>\s?$").unwrap();
        let privileged = Regex::new(r"(?mi)^[\w.\-]{1,63}#\s?$").unwrap();
        let combined = combine_patterns([&exec, &privileged]).unwrap();

        assert!(combined.is_match(b"router>"));
        assert!(combined.is_match(b"router#"));
        assert!(!combined.is_match(b"router$"));
    }
}
