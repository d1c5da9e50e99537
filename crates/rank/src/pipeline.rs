use std::thread;

use meta::PhotoMetadata;

use crate::collector::{Collector, ScoredPhoto};
use crate::{available_workers, clamp_workers};

/// Pipelined ranker: one producer feeds the candidate channel, `scorers`
/// workers score candidates into the result channel, and a single
/// collector folds results into one shared top-K heap.
///
/// The candidate channel is bounded at the candidate count, so with the
/// cheap token scorer the producer effectively never blocks; shrink it to
/// exercise real backpressure once scoring gets heavier. The result
/// channel is bounded at `2 * scorers`. Both close when their senders
/// drop, which is what terminates the workers and then the collector.
///
/// Because a single thread performs every `offer` and the rank order is
/// total, the output is identical to the sequential ranker's.
pub fn rank_pipeline(
    query: &str,
    photos: &[PhotoMetadata],
    k: usize,
    scorers: usize,
) -> Vec<PhotoMetadata> {
    if k == 0 || photos.is_empty() {
        return Vec::new();
    }

    let scorers = clamp_workers(scorers, photos.len(), available_workers());
    let (candidate_tx, candidate_rx) = crossbeam_channel::bounded::<PhotoMetadata>(photos.len());
    let (scored_tx, scored_rx) = crossbeam_channel::bounded::<ScoredPhoto>(2 * scorers);
    let collector = Collector::new(k);

    thread::scope(|scope| {
        for _ in 0..scorers {
            let candidate_rx = candidate_rx.clone();
            let scored_tx = scored_tx.clone();
            scope.spawn(move || {
                for photo in candidate_rx {
                    let score = textmatch::score(query, &photo);
                    if scored_tx.send(ScoredPhoto { photo, score }).is_err() {
                        break;
                    }
                }
            });
        }
        // The workers hold their own clones; dropping these hands channel
        // closure over to them.
        drop(candidate_rx);
        drop(scored_tx);

        let collector = &collector;
        scope.spawn(move || {
            for scored in scored_rx {
                collector.offer(scored);
            }
        });

        for photo in photos {
            if candidate_tx.send(photo.clone()).is_err() {
                break;
            }
        }
        drop(candidate_tx);
    });

    collector.into_ranked()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank_sequential;

    fn photo(id: &str, description: &str, downloads: u64) -> PhotoMetadata {
        PhotoMetadata {
            photo_id: id.to_string(),
            photo_description: description.to_string(),
            stats_downloads: downloads,
            ..Default::default()
        }
    }

    #[test]
    fn matches_the_sequential_ranker() {
        let photos: Vec<PhotoMetadata> = (0..120)
            .map(|i| {
                photo(
                    &format!("p{i:03}"),
                    match i % 4 {
                        0 => "glacier lagoon at dawn",
                        1 => "glacier hike",
                        2 => "city street at night",
                        _ => "portrait",
                    },
                    (i % 11) as u64,
                )
            })
            .collect();

        let expected = rank_sequential("glacier at dawn", &photos, 7);
        for scorers in [1, 2, 4, 16] {
            let ranked = rank_pipeline("glacier at dawn", &photos, 7, scorers);
            assert_eq!(ranked, expected, "scorers={scorers}");
        }
    }

    #[test]
    fn degenerate_inputs_return_empty() {
        let photos = [photo("A", "foo", 0)];
        assert!(rank_pipeline("foo", &photos, 0, 4).is_empty());
        assert!(rank_pipeline("foo", &[], 5, 4).is_empty());
    }

    #[test]
    fn zero_scorers_defaults_and_completes() {
        let photos = [photo("A", "foo", 0), photo("B", "foo bar", 2)];
        let ranked = rank_pipeline("foo", &photos, 2, 0);
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn single_result_with_many_scorers() {
        let photos = [photo("A", "foo", 0), photo("B", "foo", 9)];
        let ranked = rank_pipeline("foo", &photos, 1, 32);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].photo_id, "B");
    }
}
