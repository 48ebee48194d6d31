//! Line canonicalization
//!
//! Turns one team's on-ice player list into an [`OnIceRecord`]: the goalie
//! goes to the goalie slot, skaters are sorted into slots 1..6, and the
//! sorted skater set is hashed into a [`LineHash`].
//!
//! ## Determinism
//!
//! The hash depends only on the *set* of skater ids. Discovery order, the
//! goalie, the team, the event and the game never influence it, so the same
//! five skaters produce the same hash everywhere. Distinct-line aggregation
//! downstream relies on this.
//!
//! ## Anomalies
//!
//! Odd snapshots (two goalies, seven skaters, a repeated id) are absorbed by
//! fixed rules and reported as [`LineAnomaly`] values, never as errors.

use sha2::{Digest, Sha256};

use crate::model::{LineHash, OnIcePlayer, OnIceRecord, SKATER_SLOTS};

/// Separator between ids in the canonical line key
pub const LINE_KEY_SEPARATOR: &str = "-";

/// Data-shape anomaly observed while canonicalizing one team's snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineAnomaly {
    /// More than one goalie on the ice. The last one in snapshot order keeps
    /// the goalie slot; the others are counted as skaters.
    MultipleGoalies { kept: i64, demoted: Vec<i64> },
    /// More skaters than slots. Dropped ids are missing from the slots but
    /// still part of the line key.
    ExtraSkaters { dropped: Vec<i64> },
    /// The same player id was listed more than once
    DuplicatePlayer { player_id: i64 },
}

/// Output of [`canonicalize`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canonicalized {
    pub record: OnIceRecord,
    pub anomalies: Vec<LineAnomaly>,
}

/// Canonical key for a skater set: ascending ids joined by `-`
///
/// The input is sorted and deduplicated first, so any permutation yields the
/// same key. An empty set yields `""`.
pub fn line_key(skater_ids: &[i64]) -> String {
    let mut ids = skater_ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    join_ids(&ids)
}

/// Hash of a skater set (order-independent)
pub fn line_hash(skater_ids: &[i64]) -> LineHash {
    hash_line_key(&line_key(skater_ids))
}

/// Hash an already-canonical line key
pub fn hash_line_key(key: &str) -> LineHash {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    LineHash::from_hex(hex::encode(hasher.finalize()))
}

/// Build the on-ice record for one team at one event
///
/// `players` is the team's on-ice list in snapshot order.
pub fn canonicalize(
    game_pk: i64,
    team_id: i64,
    event_idx: i64,
    players: &[OnIcePlayer],
) -> Canonicalized {
    let mut anomalies = Vec::new();

    let goalies: Vec<i64> = players
        .iter()
        .filter(|p| p.is_goalie)
        .map(|p| p.player_id)
        .collect();
    let mut skaters: Vec<i64> = players
        .iter()
        .filter(|p| !p.is_goalie)
        .map(|p| p.player_id)
        .collect();

    let goalie_id = goalies.last().copied();
    if let Some(kept) = goalie_id {
        // Demoted goalies are distinct and in snapshot order; a repeated
        // goalie id is reported once as a duplicate.
        let mut demoted: Vec<i64> = Vec::new();
        let mut repeated: Vec<i64> = Vec::new();
        for (i, &g) in goalies.iter().enumerate() {
            if goalies[..i].contains(&g) {
                if !repeated.contains(&g) {
                    repeated.push(g);
                }
            } else if g != kept {
                demoted.push(g);
            }
        }
        anomalies.extend(
            repeated
                .into_iter()
                .map(|player_id| LineAnomaly::DuplicatePlayer { player_id }),
        );
        if !demoted.is_empty() {
            anomalies.push(LineAnomaly::MultipleGoalies {
                kept,
                demoted: demoted.clone(),
            });
        }
        skaters.extend(demoted);
    }

    skaters.sort_unstable();
    let mut last_reported = None;
    for pair in skaters.windows(2) {
        if pair[0] == pair[1] && last_reported != Some(pair[0]) {
            anomalies.push(LineAnomaly::DuplicatePlayer {
                player_id: pair[0],
            });
            last_reported = Some(pair[0]);
        }
    }
    skaters.dedup();

    let mut slots = [None; SKATER_SLOTS];
    for (slot, id) in slots.iter_mut().zip(skaters.iter()) {
        *slot = Some(*id);
    }
    if skaters.len() > SKATER_SLOTS {
        anomalies.push(LineAnomaly::ExtraSkaters {
            dropped: skaters[SKATER_SLOTS..].to_vec(),
        });
    }

    let line_hash = hash_line_key(&join_ids(&skaters));

    Canonicalized {
        record: OnIceRecord {
            game_pk,
            team_id,
            event_idx,
            line_hash,
            goalie_id,
            skaters: slots,
        },
        anomalies,
    }
}

fn join_ids(sorted: &[i64]) -> String {
    sorted
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(LINE_KEY_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(id: i64) -> OnIcePlayer {
        OnIcePlayer::skater(id)
    }

    fn g(id: i64) -> OnIcePlayer {
        OnIcePlayer::goalie(id)
    }

    #[test]
    fn test_two_skaters_and_goalie() {
        let out = canonicalize(1, 10, 5, &[s(101), s(102), g(103)]);
        let r = out.record;

        assert_eq!(r.skater(1), Some(101));
        assert_eq!(r.skater(2), Some(102));
        assert_eq!(r.skater(3), None);
        assert_eq!(r.goalie_id, Some(103));
        assert_eq!(r.line_hash, hash_line_key("101-102"));
        assert!(out.anomalies.is_empty());
    }

    #[test]
    fn test_goalie_only_hashes_empty_key() {
        let out = canonicalize(1, 10, 5, &[g(30)]);
        assert_eq!(out.record.skater_count(), 0);
        assert_eq!(out.record.goalie_id, Some(30));
        assert_eq!(out.record.line_hash, hash_line_key(""));
    }

    #[test]
    fn test_empty_net_leaves_goalie_slot_empty() {
        let out = canonicalize(1, 10, 5, &[s(1), s(2), s(3), s(4), s(5), s(6)]);
        assert_eq!(out.record.goalie_id, None);
        assert_eq!(out.record.skater_count(), 6);
        assert!(out.anomalies.is_empty());
    }

    #[test]
    fn test_skaters_sorted_numerically_not_lexically() {
        let out = canonicalize(1, 10, 5, &[s(900), s(80), s(7000)]);
        assert_eq!(
            out.record.skater_ids().collect::<Vec<_>>(),
            vec![80, 900, 7000]
        );
        assert_eq!(out.record.line_hash, hash_line_key("80-900-7000"));
    }

    #[test]
    fn test_last_goalie_wins_and_others_become_skaters() {
        let out = canonicalize(1, 10, 5, &[g(31), s(5), g(35)]);
        assert_eq!(out.record.goalie_id, Some(35));
        assert_eq!(out.record.skater_ids().collect::<Vec<_>>(), vec![5, 31]);
        assert_eq!(
            out.anomalies,
            vec![LineAnomaly::MultipleGoalies {
                kept: 35,
                demoted: vec![31]
            }]
        );
    }

    #[test]
    fn test_repeated_demoted_goalie_is_reported_once() {
        let out = canonicalize(1, 10, 5, &[g(31), g(31), g(35)]);
        assert_eq!(out.record.goalie_id, Some(35));
        assert_eq!(out.record.skater_ids().collect::<Vec<_>>(), vec![31]);
        assert_eq!(
            out.anomalies,
            vec![
                LineAnomaly::DuplicatePlayer { player_id: 31 },
                LineAnomaly::MultipleGoalies {
                    kept: 35,
                    demoted: vec![31]
                },
            ]
        );
    }

    #[test]
    fn test_repeated_kept_goalie_is_not_demoted() {
        let out = canonicalize(1, 10, 5, &[g(31), g(35), g(31)]);
        assert_eq!(out.record.goalie_id, Some(31));
        assert_eq!(out.record.skater_ids().collect::<Vec<_>>(), vec![35]);
        assert_eq!(
            out.anomalies,
            vec![
                LineAnomaly::DuplicatePlayer { player_id: 31 },
                LineAnomaly::MultipleGoalies {
                    kept: 31,
                    demoted: vec![35]
                },
            ]
        );
    }

    #[test]
    fn test_same_goalie_listed_twice() {
        let out = canonicalize(1, 10, 5, &[g(30), s(2), g(30)]);
        assert_eq!(out.record.goalie_id, Some(30));
        assert_eq!(out.record.skater_ids().collect::<Vec<_>>(), vec![2]);
        assert_eq!(
            out.anomalies,
            vec![LineAnomaly::DuplicatePlayer { player_id: 30 }]
        );
    }

    #[test]
    fn test_extra_skaters_dropped_from_slots() {
        let players: Vec<_> = (1..=7).map(s).collect();
        let out = canonicalize(1, 10, 5, &players);
        assert_eq!(out.record.skater(6), Some(6));
        assert_eq!(
            out.anomalies,
            vec![LineAnomaly::ExtraSkaters { dropped: vec![7] }]
        );
        assert_eq!(out.record.line_hash, hash_line_key("1-2-3-4-5-6-7"));
    }

    #[test]
    fn test_duplicate_skater_collapsed() {
        let out = canonicalize(1, 10, 5, &[s(4), s(2), s(4)]);
        assert_eq!(out.record.skater_ids().collect::<Vec<_>>(), vec![2, 4]);
        assert_eq!(
            out.anomalies,
            vec![LineAnomaly::DuplicatePlayer { player_id: 4 }]
        );
    }

    #[test]
    fn test_line_key_formatting() {
        assert_eq!(line_key(&[3, 1, 2]), "1-2-3");
        assert_eq!(line_key(&[]), "");
        assert_eq!(line_key(&[-1, 1]), "-1-1");
    }

    #[test]
    fn test_hash_is_lowercase_hex() {
        let h = line_hash(&[8478402, 8471214]);
        assert_eq!(h.as_str().len(), 64);
        assert!(h
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }
}
