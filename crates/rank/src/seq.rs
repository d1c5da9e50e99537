use meta::PhotoMetadata;

use crate::collector::{ScoredPhoto, TopK};

/// Single-threaded reference ranker: scores every candidate into one
/// bounded heap and returns the top `k` in rank order.
pub fn rank_sequential(query: &str, photos: &[PhotoMetadata], k: usize) -> Vec<PhotoMetadata> {
    if k == 0 || photos.is_empty() {
        return Vec::new();
    }

    let mut top = TopK::new(k);
    for photo in photos {
        top.offer(ScoredPhoto {
            photo: photo.clone(),
            score: textmatch::score(query, photo),
        });
    }
    top.into_ranked()
}
