use std::collections::HashSet;

use once_cell::sync::Lazy;
use rust_stemmers::{Algorithm, Stemmer};

use crate::stopwords::is_stopword;
use crate::synonyms::synonyms_of;

static STEMMER: Lazy<Stemmer> = Lazy::new(|| Stemmer::create(Algorithm::English));

/// Stopword and length filter applied to surface words and to synonym words
/// before stemming. Single letters carry no signal.
fn keep(word: &str) -> bool {
    word.chars().count() > 1 && !is_stopword(word)
}

/// Core tokenizer: lowercases, splits on anything that is not a Unicode
/// letter, filters, stems, and collects the unique stems. When
/// `expand_synonyms` is set, each surviving *surface* word (pre-stem) is
/// also looked up in the synonym table and its synonyms are filtered and
/// stemmed into the same set. Expansion is keyed on the surface word so a
/// query for "cars" does not expand, matching the table's unstemmed keys.
pub(crate) fn stemmed_token_set(text: &str, expand_synonyms: bool) -> HashSet<String> {
    let mut stems = HashSet::new();
    if text.is_empty() {
        return stems;
    }

    let lowered = text.to_lowercase();
    for word in lowered.split(|c: char| !c.is_alphabetic()) {
        if word.is_empty() || !keep(word) {
            continue;
        }
        stems.insert(STEMMER.stem(word).into_owned());

        if expand_synonyms {
            if let Some(neighbors) = synonyms_of(word) {
                for synonym in neighbors {
                    if keep(synonym) {
                        stems.insert(STEMMER.stem(synonym).into_owned());
                    }
                }
            }
        }
    }
    stems
}

/// Unique stemmed tokens of `s`, synonyms included. Order is unspecified.
///
/// # Examples
///
/// ```rust
/// let mut stems = textmatch::tokens("Icebergs of Iceland");
/// stems.sort();
/// assert_eq!(stems, ["iceberg", "iceland"]);
/// ```
pub fn tokens(s: &str) -> Vec<String> {
    stemmed_token_set(s, true).into_iter().collect()
}
