use meta::PhotoMetadata;

use crate::tokenize::stemmed_token_set;

/// Bonus for a photo stem that appears literally in the query.
const ORIGINAL_MATCH_BONUS: f32 = 10.0;
/// Bonus for a photo stem that only appears among the query's synonyms.
const SYNONYM_MATCH_BONUS: f32 = 1.5;

/// Relevance of `photo` to `query`; non-negative, higher is better.
///
/// Synonym expansion is applied to the query side only. Expanding the photo
/// side as well would hand long descriptions extra synonym hits and collapse
/// the 10.0/1.5 gap between literal and synonym matches.
///
/// # Examples
///
/// ```rust
/// use meta::PhotoMetadata;
///
/// let photo = PhotoMetadata {
///     photo_id: "p1".into(),
///     photo_description: "Icebergs of Iceland".into(),
///     ..Default::default()
/// };
/// assert!(textmatch::score("icebergs", &photo) > 0.0);
/// assert_eq!(textmatch::score("sahara dunes", &photo), 0.0);
/// ```
pub fn score(query: &str, photo: &PhotoMetadata) -> f32 {
    let query_literals = stemmed_token_set(query, false);
    let query_expanded = stemmed_token_set(query, true);

    let mut photo_text = String::new();
    for field in [
        &photo.photo_description,
        &photo.ai_description,
        &photo.photo_location_country,
        &photo.photo_location_city,
    ] {
        if !field.is_empty() {
            photo_text.push_str(field);
            photo_text.push(' ');
        }
    }

    let photo_stems = stemmed_token_set(&photo_text, false);
    if photo_stems.is_empty() {
        return 0.0;
    }

    let mut raw = 0.0f32;
    for stem in &photo_stems {
        if query_literals.contains(stem) {
            raw += ORIGINAL_MATCH_BONUS;
        } else if query_expanded.contains(stem) {
            raw += SYNONYM_MATCH_BONUS;
        }
    }
    if raw == 0.0 {
        return 0.0;
    }

    // Unique-stem count, so repeating one keyword cannot inflate the score.
    raw / (1.0 + photo_stems.len() as f32).ln()
}
