use std::collections::HashSet;

/// Which text canonicalization a stage applies before comparing strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextNormalization {
    /// Lowercase and trim only
    #[default]
    Loose,
    /// Lowercase, trim, strip punctuation, collapse whitespace
    Strict,
}

impl TextNormalization {
    pub fn apply(&self, text: &str) -> String {
        match self {
            TextNormalization::Loose => normalize_loose(text),
            TextNormalization::Strict => normalize(text),
        }
    }
}

/// Canonicalize text for comparison
///
/// Lowercases, trims, removes every character that is neither alphanumeric
/// nor whitespace, and collapses whitespace runs to a single space.
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lowercase and trim, keeping punctuation and inner whitespace intact
pub fn normalize_loose(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Word set of the strictly normalized text
pub fn word_set(text: &str) -> HashSet<String> {
    normalize(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Jaccard similarity of the word sets of two texts
///
/// Returns 0.0 when both word sets are empty.
pub fn jaccard_similarity(a: &str, b: &str) -> f64 {
    set_similarity(&word_set(a), &word_set(b))
}

/// Jaccard similarity of two precomputed word sets
pub fn set_similarity(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}
