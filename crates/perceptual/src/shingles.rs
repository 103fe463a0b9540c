//! Word-level k-shingling over canonical text.
//!
//! A shingle is `width` consecutive tokens joined by single spaces. Only the
//! distinct shingles matter for Jaccard similarity, so the output is a set.

use std::collections::HashSet;

use crate::config::PerceptualError;

/// Distinct shingles of one document.
pub type ShingleSet = HashSet<String>;

/// Build the shingle set of canonical text.
///
/// The caller must pass canonical text (tokens separated by single spaces);
/// this function splits on `' '` and performs no normalization.
///
/// - `width == 0` → [`PerceptualError::InvalidShingleWidth`]
/// - empty text → [`PerceptualError::EmptyText`]
/// - fewer than `width` tokens → `Ok` with an empty set
pub fn build_shingles(canonical_text: &str, width: usize) -> Result<ShingleSet, PerceptualError> {
    if width == 0 {
        return Err(PerceptualError::InvalidShingleWidth { width });
    }
    if canonical_text.is_empty() {
        return Err(PerceptualError::EmptyText);
    }

    let tokens: Vec<&str> = canonical_text.split(' ').collect();
    if tokens.len() < width {
        return Ok(ShingleSet::new());
    }

    let mut shingles = ShingleSet::with_capacity(tokens.len() - width + 1);
    for window in tokens.windows(width) {
        shingles.insert(window.join(" "));
    }
    Ok(shingles)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> ShingleSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn width_zero_is_invalid() {
        assert_eq!(
            build_shingles("a b c", 0),
            Err(PerceptualError::InvalidShingleWidth { width: 0 })
        );
    }

    #[test]
    fn empty_text_is_invalid_even_for_valid_width() {
        assert_eq!(build_shingles("", 2), Err(PerceptualError::EmptyText));
    }

    #[test]
    fn width_checked_before_text() {
        assert_eq!(
            build_shingles("", 0),
            Err(PerceptualError::InvalidShingleWidth { width: 0 })
        );
    }

    #[test]
    fn too_short_text_yields_empty_set() {
        let shingles = build_shingles("lonely", 2).expect("short text is not an error");
        assert!(shingles.is_empty());
        let shingles = build_shingles("a b", 3).expect("short text is not an error");
        assert!(shingles.is_empty());
    }

    #[test]
    fn exact_width_yields_one_shingle() {
        let shingles = build_shingles("a b c", 3).expect("shingles");
        assert_eq!(shingles, set(&["a b c"]));
    }

    #[test]
    fn width_one_yields_distinct_tokens() {
        let shingles = build_shingles("to be or not to be", 1).expect("shingles");
        assert_eq!(shingles, set(&["to", "be", "or", "not"]));
    }

    #[test]
    fn cat_sat_on_the_mat() {
        let shingles = build_shingles("the cat sat on the mat", 2).expect("shingles");
        assert_eq!(
            shingles,
            set(&["the cat", "cat sat", "sat on", "on the", "the mat"])
        );
    }

    #[test]
    fn repeated_shingles_collapse() {
        let shingles = build_shingles("a b a b a b", 2).expect("shingles");
        assert_eq!(shingles, set(&["a b", "b a"]));
    }

    #[test]
    fn count_bounded_by_window_count() {
        let text = "one two three four five six seven";
        let tokens = text.split(' ').count();
        for width in 1..=tokens {
            let shingles = build_shingles(text, width).expect("shingles");
            assert_eq!(shingles.len(), tokens - width + 1);
        }
        assert!(build_shingles(text, tokens + 1)
            .expect("shingles")
            .is_empty());
    }

    #[test]
    fn shingle_content_is_order_preserving_within_window() {
        let shingles = build_shingles("x y z", 2).expect("shingles");
        assert!(shingles.contains("x y"));
        assert!(shingles.contains("y z"));
        assert!(!shingles.contains("y x"));
    }
}
