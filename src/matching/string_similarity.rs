//! Text normalization and the character-overlap similarity heuristic.
//!
//! The fuzzy thresholds in [`super::config`] (0.70 for names, 0.60 for
//! institutions) were tuned against exactly this heuristic. Swapping in an edit
//! distance or Jaro-Winkler score silently changes every verdict band, so the
//! two must only ever move together.

/// Canonicalize free text for comparison.
///
/// Lower-cases, then drops every character that is not an ASCII lowercase
/// letter or digit. Whitespace, punctuation and diacritics do not survive.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Order-insensitive single-character overlap ratio in `[0, 1]`.
///
/// The longer input is `b` unless `a` is strictly longer. Each character of
/// the shorter input counts once if it occurs anywhere in the longer input,
/// repeats included, and the count is divided by the longer input's length.
/// Two empty inputs are identical (1.0).
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    let a_len = a.chars().count();
    let b_len = b.chars().count();
    let (longer, shorter, longer_len) = if a_len > b_len {
        (a, b, a_len)
    } else {
        (b, a, b_len)
    };

    if longer_len == 0 {
        return 1.0;
    }

    let matches = shorter.chars().filter(|&c| longer.contains(c)).count();
    matches as f64 / longer_len as f64
}

/// Substring containment in either direction.
#[must_use]
pub fn contains_either(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_everything_but_ascii_alnum() {
        assert_eq!(normalize("Anna University, Chennai"), "annauniversitychennai");
        assert_eq!(normalize("CERT_2024_001"), "cert2024001");
        assert_eq!(normalize("  B.E. (Mech) "), "bemech");
        assert_eq!(normalize("José Müller"), "josmller");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("---"), "");
    }

    #[test]
    fn test_normalize_idempotent_examples() {
        for s in ["Priya Sharma", "ÀÉÎ 123", "x_y-z", "İstanbul"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_similarity_identity_and_empty() {
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("priyasharma", "priyasharma"), 1.0);
    }

    #[test]
    fn test_similarity_one_letter_typo() {
        // 10 of 11 characters of "priyasharme" occur in "priyasharma"
        let sim = similarity("priyasharme", "priyasharma");
        assert!((sim - 10.0 / 11.0).abs() < 1e-9);
        assert!(sim > 0.70);
    }

    #[test]
    fn test_similarity_counts_repeats_leniently() {
        // every 'a' in the shorter string counts, even against a single 'a'
        assert_eq!(similarity("aaaa", "abcdefgh"), 0.5);
    }

    #[test]
    fn test_similarity_one_side_empty() {
        assert_eq!(similarity("", "abc"), 0.0);
        assert_eq!(similarity("abc", ""), 0.0);
    }

    #[test]
    fn test_similarity_equal_length_uses_second_as_longer() {
        // longer = "abcc": 'a','b','c' of "abcd" occur → 3/4
        assert_eq!(similarity("abcd", "abcc"), 0.75);
        // longer = "abcd": all four chars of "abcc" occur → 4/4
        assert_eq!(similarity("abcc", "abcd"), 1.0);
    }

    #[test]
    fn test_contains_either() {
        assert!(contains_either("annauniversity", "anna"));
        assert!(contains_either("anna", "annauniversity"));
        assert!(!contains_either("anna", "madras"));
    }
}
