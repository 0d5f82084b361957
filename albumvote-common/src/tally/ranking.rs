//! Top-N ranking
//!
//! Entries are ordered by vote count descending, with ties broken by album
//! identifier ascending. Identifiers are unique map keys, so this is a total
//! order and the output never depends on hash map iteration order.

use std::cmp::Ordering;

use super::store::VoteTally;
use crate::models::RankedEntry;

/// Ranking length used by the top albums view
pub const DEFAULT_TOP_N: usize = 10;

/// Rank a tally snapshot and keep the first `n` entries
///
/// Pure function over a caller-supplied snapshot. Returns every entry when
/// fewer than `n` exist and an empty vector when `n` is zero.
pub fn top_n(tally: &VoteTally, n: usize) -> Vec<RankedEntry> {
    if n == 0 {
        return Vec::new();
    }

    let mut entries: Vec<RankedEntry> = tally
        .iter()
        .map(|(id, &votes)| RankedEntry::new(id.clone(), votes))
        .collect();

    entries.sort_unstable_by(compare_entries);
    entries.truncate(n);
    entries
}

fn compare_entries(a: &RankedEntry, b: &RankedEntry) -> Ordering {
    b.votes.cmp(&a.votes).then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(pairs: &[(&str, u64)]) -> VoteTally {
        pairs.iter().map(|(id, v)| (id.to_string(), *v)).collect()
    }

    #[test]
    fn test_descending_by_votes() {
        let ranked = top_n(&tally(&[("x", 3), ("y", 1), ("z", 7)]), 10);
        assert_eq!(
            ranked,
            vec![
                RankedEntry::new("z", 7),
                RankedEntry::new("x", 3),
                RankedEntry::new("y", 1),
            ]
        );
    }

    #[test]
    fn test_ties_broken_by_id_ascending() {
        let ranked = top_n(&tally(&[("a", 5), ("b", 3), ("c", 5)]), 2);
        assert_eq!(
            ranked,
            vec![RankedEntry::new("a", 5), RankedEntry::new("c", 5)]
        );
        assert!(ranked.iter().all(|e| e.id != "b"));
    }

    #[test]
    fn test_truncates_to_n() {
        let input = tally(&[("a", 1), ("b", 2), ("c", 3), ("d", 4)]);
        let ranked = top_n(&input, 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].id, "d");
        assert_eq!(ranked[1].id, "c");
    }

    #[test]
    fn test_zero_n_is_empty() {
        assert!(top_n(&tally(&[("a", 1)]), 0).is_empty());
    }

    #[test]
    fn test_empty_tally_is_empty() {
        assert!(top_n(&VoteTally::new(), 10).is_empty());
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let input: VoteTally = (0..200)
            .map(|i| (format!("album{:03}", i), (i % 7) as u64))
            .collect();

        let first = top_n(&input, 50);
        for _ in 0..20 {
            assert_eq!(top_n(&input, 50), first);
        }
    }

    #[test]
    fn test_same_contents_different_insertion_order() {
        let forward = tally(&[("m", 2), ("k", 2), ("q", 2), ("a", 9)]);
        let mut backward = VoteTally::new();
        for (id, votes) in [("a", 9), ("q", 2), ("k", 2), ("m", 2)] {
            backward.insert(id.to_string(), votes);
        }

        assert_eq!(top_n(&forward, 10), top_n(&backward, 10));
        let ids: Vec<_> = top_n(&forward, 10).into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["a", "k", "m", "q"]);
    }
}
