use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Words dropped before stemming. Includes common English function words
/// plus photography terms ("picture", "camera", ...) that appear in almost
/// every description and would dilute scores. Changing this list changes
/// every score in the system.
static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "the", "is", "are", "was", "were", "of", "in", "on", "at", "for", "to", "by",
        "with", "picture", "photo", "image", "photograph", "view", "camera", "lens", "shot",
        "taken", "exposure", "and", "but", "or", "as", "if", "it", "its", "this", "that", "these",
        "those", "my", "your", "he", "she", "him", "her", "they", "them", "i", "you", "me", "us",
        "we", "be", "have", "do", "say", "get", "make", "go", "know", "take", "see", "come",
        "think", "look", "want", "give", "use", "find", "tell", "ask", "work", "seem", "feel",
        "try", "leave", "call",
    ]
    .into_iter()
    .collect()
});

pub(crate) fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_words_and_domain_terms_are_stopwords() {
        for word in ["the", "of", "with", "picture", "photo", "camera", "exposure"] {
            assert!(is_stopword(word), "{word:?} should be a stopword");
        }
    }

    #[test]
    fn descriptive_words_are_kept() {
        for word in ["iceberg", "sunset", "mountain", "vintage", "auto"] {
            assert!(!is_stopword(word), "{word:?} should not be a stopword");
        }
    }
}
