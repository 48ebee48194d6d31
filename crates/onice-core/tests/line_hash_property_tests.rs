//! Property tests for line canonicalization

use onice_core::line::{canonicalize, hash_line_key, line_hash, line_key};
use onice_core::model::OnIcePlayer;
use proptest::prelude::*;
use std::collections::BTreeSet;

fn skater_set() -> impl Strategy<Value = Vec<i64>> {
    proptest::collection::btree_set(8_400_000i64..8_490_000, 0..=6)
        .prop_map(|set| set.into_iter().collect())
}

proptest! {
    #[test]
    fn hash_is_order_independent(ids in skater_set(), seed in any::<u64>()) {
        let mut shuffled = ids.clone();
        // Deterministic rotation + reversal stands in for an arbitrary permutation
        if !shuffled.is_empty() {
            let k = (seed as usize) % shuffled.len();
            shuffled.rotate_left(k);
        }
        if seed % 2 == 0 {
            shuffled.reverse();
        }
        prop_assert_eq!(line_hash(&ids), line_hash(&shuffled));
    }

    #[test]
    fn canonicalize_ignores_discovery_order(ids in skater_set(), goalie in 8_300_000i64..8_399_999) {
        let forward: Vec<_> = ids.iter().copied().map(OnIcePlayer::skater)
            .chain(std::iter::once(OnIcePlayer::goalie(goalie)))
            .collect();
        let backward: Vec<_> = std::iter::once(OnIcePlayer::goalie(goalie))
            .chain(ids.iter().rev().copied().map(OnIcePlayer::skater))
            .collect();

        let a = canonicalize(1, 10, 1, &forward).record;
        let b = canonicalize(2, 20, 99, &backward).record;

        prop_assert_eq!(&a.line_hash, &b.line_hash);
        prop_assert_eq!(a.skaters, b.skaters);
        prop_assert_eq!(a.goalie_id, Some(goalie));
    }

    #[test]
    fn goalie_does_not_affect_hash(ids in skater_set(), g1 in 1i64..100, g2 in 100i64..200) {
        let with = |g: i64| -> Vec<OnIcePlayer> {
            ids.iter().copied().map(OnIcePlayer::skater)
                .chain(std::iter::once(OnIcePlayer::goalie(g)))
                .collect()
        };
        prop_assert_eq!(
            canonicalize(1, 1, 1, &with(g1)).record.line_hash,
            canonicalize(1, 1, 1, &with(g2)).record.line_hash
        );
    }

    #[test]
    fn distinct_sets_hash_differently(a in skater_set(), b in skater_set()) {
        let sa: BTreeSet<_> = a.iter().collect();
        let sb: BTreeSet<_> = b.iter().collect();
        prop_assume!(sa != sb);
        prop_assert_ne!(line_hash(&a), line_hash(&b));
    }

    #[test]
    fn slots_are_ascending_and_distinct(ids in proptest::collection::vec(1i64..50, 0..12)) {
        let players: Vec<_> = ids.iter().copied().map(OnIcePlayer::skater).collect();
        let record = canonicalize(1, 1, 1, &players).record;
        let filled: Vec<i64> = record.skater_ids().collect();
        prop_assert!(filled.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(filled.len() <= 6);
        // Filled slots are a prefix
        let first_empty = record.skaters.iter().position(Option::is_none).unwrap_or(6);
        prop_assert!(record.skaters[first_empty..].iter().all(Option::is_none));
    }
}

#[test]
fn test_hash_matches_key_digest() {
    assert_eq!(line_hash(&[102, 101]), hash_line_key("101-102"));
    assert_eq!(line_key(&[102, 101]), "101-102");
}

#[test]
fn test_known_digest_of_empty_line() {
    // SHA-256 of the empty string
    assert_eq!(
        line_hash(&[]).as_str(),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}
