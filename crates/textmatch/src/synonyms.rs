use std::collections::HashMap;

use once_cell::sync::Lazy;

const BASE_SYNONYMS: &str = include_str!("../data/synonym_map.json");
const GLOVE_NEIGHBORS: &str = include_str!("../data/glove_neighbors.json");

/// Surface word -> synonym words, merged from the curated synonym map and
/// the GloVe-derived nearest-neighbor list. Keys present in both sources
/// keep the concatenation of both value lists; duplicates are harmless
/// because tokenization enforces set semantics. Scoring is undefined
/// without this table, so a malformed dictionary aborts at first use.
static SYNONYMS: Lazy<HashMap<String, Vec<String>>> = Lazy::new(|| {
    let mut merged: HashMap<String, Vec<String>> = HashMap::new();
    for source in [BASE_SYNONYMS, GLOVE_NEIGHBORS] {
        let table: HashMap<String, Vec<String>> =
            serde_json::from_str(source).expect("embedded synonym dictionary must be valid JSON");
        for (word, mut neighbors) in table {
            merged.entry(word).or_default().append(&mut neighbors);
        }
    }
    merged
});

/// Synonyms of an unstemmed surface word, if any.
pub(crate) fn synonyms_of(word: &str) -> Option<&'static [String]> {
    SYNONYMS.get(word).map(Vec::as_slice)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_by_surface_word() {
        let synonyms = synonyms_of("car").expect("car should have synonyms");
        assert!(synonyms.iter().any(|s| s == "automobile"));
        assert!(synonyms_of("cars").is_none());
    }

    #[test]
    fn overlapping_keys_merge_both_dictionaries() {
        // "car" appears in the curated map and the GloVe neighbor list.
        let synonyms = synonyms_of("car").expect("car should have synonyms");
        assert!(synonyms.iter().any(|s| s == "vehicle"));
        assert!(synonyms.iter().any(|s| s == "truck"));
    }
}
