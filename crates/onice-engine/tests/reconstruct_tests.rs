// Integration tests for concurrent reconstruction

mod common;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use common::{events, ScriptedSource, AWAY, GAME, HOME};
use onice_core::errors::ExErrorKind;
use onice_core::line::{line_hash, LineAnomaly};
use onice_core::model::{Event, OnIcePlayer, TeamOnIce};
use onice_engine::{reconstruct, ReconstructOptions};
use onice_feed::GameSnapshot;

fn options(max_in_flight: usize) -> ReconstructOptions {
    ReconstructOptions { max_in_flight }
}

#[tokio::test]
async fn test_two_records_per_event_sorted_and_unique() {
    let evs = events(25);
    let source = Arc::new(ScriptedSource::new(evs.clone()));

    let result = reconstruct(source.clone(), GAME, &evs, &options(4)).await.unwrap();

    assert_eq!(result.records.len(), 50);
    assert!(result.anomalies.is_empty());
    assert_eq!(source.snapshot_fetches(), 25);

    let keys: HashSet<(i64, i64)> = result
        .records
        .iter()
        .map(|r| (r.team_id, r.event_idx))
        .collect();
    assert_eq!(keys.len(), 50, "every (team_id, event_idx) pair is unique");

    let order: Vec<(i64, i64)> = result.records.iter().map(|r| (r.event_idx, r.team_id)).collect();
    let mut sorted = order.clone();
    sorted.sort();
    assert_eq!(order, sorted);
    assert_eq!(order[0], (0, HOME));
    assert_eq!(order[1], (0, AWAY));
}

#[tokio::test]
async fn test_records_carry_canonical_lines() {
    let evs = events(2);
    let source = Arc::new(ScriptedSource::new(evs.clone()));

    let result = reconstruct(source, GAME, &evs, &options(16)).await.unwrap();

    let away_0 = result
        .records
        .iter()
        .find(|r| r.team_id == AWAY && r.event_idx == 0)
        .unwrap();
    assert_eq!(away_0.goalie_id, Some(31));
    assert_eq!(
        away_0.skaters,
        [Some(101), Some(102), Some(103), Some(104), Some(105), None]
    );
    assert_eq!(away_0.line_hash, line_hash(&[101, 102, 103, 104, 105]));

    let away_1 = result
        .records
        .iter()
        .find(|r| r.team_id == AWAY && r.event_idx == 1)
        .unwrap();
    assert_ne!(away_0.line_hash, away_1.line_hash);

    let home_hashes: HashSet<_> = result
        .records
        .iter()
        .filter(|r| r.team_id == HOME)
        .map(|r| r.line_hash.clone())
        .collect();
    assert_eq!(home_hashes.len(), 1);
}

#[tokio::test]
async fn test_empty_event_list_fetches_nothing() {
    let source = Arc::new(ScriptedSource::new(Vec::new()));

    let result = reconstruct(source.clone(), GAME, &[], &options(4)).await.unwrap();

    assert!(result.records.is_empty());
    assert_eq!(source.snapshot_fetches(), 0);
}

#[tokio::test]
async fn test_duplicate_event_idx_is_rejected_before_fetching() {
    let mut evs = events(3);
    evs.push(Event::new(1, "2022-11-20T19:00:00Z"));
    let source = Arc::new(ScriptedSource::new(events(3)));

    let err = reconstruct(source.clone(), GAME, &evs, &options(4)).await.unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    assert_eq!(err.event_idx(), Some(1));
    assert_eq!(source.snapshot_fetches(), 0);
}

#[tokio::test]
async fn test_single_failure_fails_whole_game_with_event_context() {
    let evs = events(10);
    let source = Arc::new(ScriptedSource::new(evs.clone()).failing_at(7));

    let err = reconstruct(source, GAME, &evs, &options(16)).await.unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::ExternalService);
    assert_eq!(err.game_pk(), Some(GAME));
    assert_eq!(err.event_idx(), Some(7));
    assert!(err.message().contains("503"));
}

#[tokio::test]
async fn test_failure_does_not_wait_for_hanging_siblings() {
    let evs = events(6);
    let source = Arc::new(
        ScriptedSource::new(evs.clone())
            .slow_at(1)
            .slow_at(2)
            .failing_at(4),
    );

    let outcome = tokio::time::timeout(
        Duration::from_secs(5),
        reconstruct(source.clone(), GAME, &evs, &options(16)),
    )
    .await
    .expect("reconstruct must return once a fetch fails");

    assert_eq!(outcome.unwrap_err().event_idx(), Some(4));

    // Aborted siblings release their fetch instead of sleeping it out
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(source.in_flight(), 0);
    assert!(source.completed_fetches() <= 3);
}

#[tokio::test]
async fn test_in_flight_fetches_are_bounded() {
    let evs = events(20);
    let source = Arc::new(ScriptedSource::new(evs.clone()).with_delay(Duration::from_millis(10)));

    let result = reconstruct(source.clone(), GAME, &evs, &options(3)).await.unwrap();

    assert_eq!(result.records.len(), 40);
    assert_eq!(source.snapshot_fetches(), 20);
    assert!(
        source.max_in_flight_seen() <= 3,
        "saw {} concurrent fetches",
        source.max_in_flight_seen()
    );
}

#[tokio::test]
async fn test_zero_max_in_flight_still_makes_progress() {
    let evs = events(3);
    let source = Arc::new(ScriptedSource::new(evs.clone()));

    let result = reconstruct(source.clone(), GAME, &evs, &options(0)).await.unwrap();

    assert_eq!(result.records.len(), 6);
    assert_eq!(source.max_in_flight_seen(), 1);
}

#[tokio::test]
async fn test_anomalies_are_reported_with_record_context() {
    let evs = events(2);
    let odd = GameSnapshot {
        away: TeamOnIce {
            team_id: AWAY,
            players: vec![
                OnIcePlayer::goalie(30),
                OnIcePlayer::skater(101),
                OnIcePlayer::goalie(31),
            ],
        },
        home: TeamOnIce {
            team_id: HOME,
            players: vec![OnIcePlayer::goalie(41)],
        },
    };
    let source = Arc::new(ScriptedSource::new(evs.clone()).with_snapshot(1, odd));

    let result = reconstruct(source, GAME, &evs, &options(4)).await.unwrap();

    assert_eq!(result.anomalies.len(), 1);
    let found = &result.anomalies[0];
    assert_eq!((found.event_idx, found.team_id), (1, AWAY));
    assert_eq!(
        found.anomaly,
        LineAnomaly::MultipleGoalies {
            kept: 31,
            demoted: vec![30]
        }
    );

    let home_1 = result
        .records
        .iter()
        .find(|r| r.team_id == HOME && r.event_idx == 1)
        .unwrap();
    assert_eq!(home_1.skater_count(), 0);
    assert_eq!(home_1.line_hash, line_hash(&[]));
}

#[tokio::test]
async fn test_snapshot_with_same_team_on_both_sides_is_rejected() {
    let evs = events(2);
    let mut clash = common::snapshot_for(1);
    clash.home.team_id = AWAY;
    let source = Arc::new(ScriptedSource::new(evs.clone()).with_snapshot(1, clash));

    let err = reconstruct(source, GAME, &evs, &options(4)).await.unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    assert_eq!(err.event_idx(), Some(1));
    assert_eq!(err.team_id(), Some(AWAY));
}

#[tokio::test]
async fn test_dropping_the_future_cancels_fetches() {
    let evs = events(4);
    let source = Arc::new(ScriptedSource::new(evs.clone()).slow_at(0).slow_at(1));

    let outcome = tokio::time::timeout(
        Duration::from_millis(100),
        reconstruct(source.clone(), GAME, &evs, &options(16)),
    )
    .await;
    assert!(outcome.is_err(), "slow fetches keep reconstruct pending");

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(source.in_flight(), 0);
}
