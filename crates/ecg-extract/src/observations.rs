//! Observation list splitting.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Numbering delimiter used in the source text: digits, period, one
    /// whitespace character (`"1. "`, `"12. "`).
    static ref ITEM_DELIMITER: Regex = Regex::new(r"\d+\.\s").unwrap();
}

/// Split an observation section into formatted, renumbered observation lines.
///
/// Segments are split on the source numbering delimiter, trimmed, and
/// re-prefixed with their own sequential 1-based index, so gaps or repeats in
/// the source numbering disappear. The text before the first delimiter is the
/// empty preamble and is discarded. A section with no numbering at all is one
/// single observation; a blank section yields nothing.
pub fn split_observations(section: &str) -> Vec<String> {
    let section = section.trim();
    if section.is_empty() {
        return Vec::new();
    }

    let segments: Vec<&str> = ITEM_DELIMITER.split(section).collect();
    if segments.len() == 1 {
        return vec![format!("1. {}", section)];
    }

    segments
        .into_iter()
        .skip(1)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .enumerate()
        .map(|(index, segment)| format!("{}. {}", index + 1, segment))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_splits_numbered_observations() {
        let items =
            split_observations("1. Sinus rhythm 2. Mild tachycardia 3. Normal axis");
        assert_eq!(
            items,
            vec![
                "1. Sinus rhythm".to_string(),
                "2. Mild tachycardia".to_string(),
                "3. Normal axis".to_string(),
            ]
        );
    }

    #[test]
    fn test_renumbers_gappy_source_numbering() {
        let items = split_observations("2. First finding 7. Second finding");
        assert_eq!(
            items,
            vec!["1. First finding".to_string(), "2. Second finding".to_string()]
        );
    }

    #[test]
    fn test_drops_segments_that_trim_to_nothing() {
        let items = split_observations("1.  2. Real finding");
        assert_eq!(items, vec!["1. Real finding".to_string()]);
    }

    #[test]
    fn test_unnumbered_section_becomes_single_item() {
        let items = split_observations("Normal study");
        assert_eq!(items, vec!["1. Normal study".to_string()]);
    }

    #[test]
    fn test_whitespace_only_section_yields_nothing() {
        assert!(split_observations("   \n\t ").is_empty());
        assert!(split_observations("").is_empty());
    }

    #[test]
    fn test_preamble_before_first_number_is_discarded() {
        let items = split_observations("Findings follow: 1. Sinus rhythm");
        assert_eq!(items, vec!["1. Sinus rhythm".to_string()]);
    }

    #[test]
    fn test_multiline_observations() {
        let items = split_observations("1. Sinus rhythm\n2. Normal axis\n");
        assert_eq!(
            items,
            vec!["1. Sinus rhythm".to_string(), "2. Normal axis".to_string()]
        );
    }
}
