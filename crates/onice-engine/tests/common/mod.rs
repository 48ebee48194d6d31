// Scripted in-memory snapshot source shared by the engine integration tests

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use onice_core::errors::{ExError, ExErrorKind};
use onice_core::model::{Event, GameInfo, OnIcePlayer, TeamOnIce};
use onice_core::timecode::{encode, TimeCode};
use onice_feed::{GameFeed, GameSnapshot, Result, SnapshotSource};

pub const GAME: i64 = 2022020287;
pub const AWAY: i64 = 10;
pub const HOME: i64 = 6;

pub fn event_time(idx: i64) -> String {
    format!("2022-11-20T18:{:02}:{:02}Z", idx / 60, idx % 60)
}

pub fn events(count: i64) -> Vec<Event> {
    (0..count).map(|idx| Event::new(idx, event_time(idx))).collect()
}

pub fn game_info() -> GameInfo {
    GameInfo {
        game_pk: GAME,
        season: "20222023".to_string(),
        game_type: "R".to_string(),
        start_time: "2022-11-20T18:00:00Z".to_string(),
        away_team_id: AWAY,
        home_team_id: HOME,
    }
}

/// Away alternates between two five-man units; home never changes
pub fn snapshot_for(event_idx: i64) -> GameSnapshot {
    let away_skaters: [i64; 5] = if event_idx % 2 == 0 {
        [105, 101, 104, 102, 103]
    } else {
        [203, 201, 202, 205, 204]
    };
    let mut away: Vec<OnIcePlayer> = away_skaters.iter().map(|&id| OnIcePlayer::skater(id)).collect();
    away.insert(2, OnIcePlayer::goalie(31));

    let mut home: Vec<OnIcePlayer> = (1..=5).map(|n| OnIcePlayer::skater(600 + n)).collect();
    home.push(OnIcePlayer::goalie(41));

    GameSnapshot {
        away: TeamOnIce {
            team_id: AWAY,
            players: away,
        },
        home: TeamOnIce {
            team_id: HOME,
            players: home,
        },
    }
}

#[derive(Default)]
pub struct ScriptedSource {
    events: Vec<Event>,
    by_time_code: HashMap<TimeCode, i64>,
    failing: HashSet<i64>,
    slow: HashSet<i64>,
    overrides: Mutex<HashMap<i64, GameSnapshot>>,
    delay: Duration,

    pub game_fetches: AtomicUsize,
    pub snapshot_fetches: AtomicUsize,
    pub completed_fetches: AtomicUsize,
    in_flight: AtomicUsize,
    pub max_in_flight_seen: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(events: Vec<Event>) -> Self {
        let by_time_code = events
            .iter()
            .map(|e| (encode(&e.date_time), e.event_idx))
            .collect();
        Self {
            events,
            by_time_code,
            ..Self::default()
        }
    }

    /// Fail the snapshot fetch for this event with an upstream error
    pub fn failing_at(mut self, event_idx: i64) -> Self {
        self.failing.insert(event_idx);
        self
    }

    /// Make this event's fetch hang far longer than any test waits
    pub fn slow_at(mut self, event_idx: i64) -> Self {
        self.slow.insert(event_idx);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_snapshot(self, event_idx: i64, snapshot: GameSnapshot) -> Self {
        self.overrides
            .lock()
            .unwrap()
            .insert(event_idx, snapshot);
        self
    }

    pub fn snapshot_fetches(&self) -> usize {
        self.snapshot_fetches.load(Ordering::SeqCst)
    }

    pub fn game_fetches(&self) -> usize {
        self.game_fetches.load(Ordering::SeqCst)
    }

    pub fn max_in_flight_seen(&self) -> usize {
        self.max_in_flight_seen.load(Ordering::SeqCst)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn completed_fetches(&self) -> usize {
        self.completed_fetches.load(Ordering::SeqCst)
    }
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl SnapshotSource for ScriptedSource {
    async fn fetch_game(&self, game_pk: i64) -> Result<GameFeed> {
        self.game_fetches.fetch_add(1, Ordering::SeqCst);
        assert_eq!(game_pk, GAME);
        Ok(GameFeed {
            game: game_info(),
            events: self.events.clone(),
        })
    }

    async fn fetch_snapshot(&self, game_pk: i64, time_code: &TimeCode) -> Result<GameSnapshot> {
        self.snapshot_fetches.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        let _guard = InFlight(&self.in_flight);
        self.max_in_flight_seen.fetch_max(now, Ordering::SeqCst);

        let event_idx = *self
            .by_time_code
            .get(time_code)
            .unwrap_or_else(|| panic!("unexpected time code {}", time_code));

        if self.slow.contains(&event_idx) {
            tokio::time::sleep(Duration::from_secs(60)).await;
        } else if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if self.failing.contains(&event_idx) {
            return Err(ExError::new(ExErrorKind::ExternalService)
                .with_op("fetch_snapshot")
                .with_game_pk(game_pk)
                .with_message("503 Service Unavailable"));
        }

        self.completed_fetches.fetch_add(1, Ordering::SeqCst);
        let scripted = self.overrides.lock().unwrap().get(&event_idx).cloned();
        Ok(scripted.unwrap_or_else(|| snapshot_for(event_idx)))
    }
}
