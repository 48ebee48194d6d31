//! reqwest-backed snapshot source
//!
//! One shared client per process; every request is a single GET with no
//! retry. Non-2xx answers and undecodable bodies are errors.

use std::time::Duration;

use async_trait::async_trait;
use onice_core::errors::{ExError, ExErrorKind};
use onice_core::timecode::TimeCode;
use reqwest::Client;

use crate::errors::{bad_status, from_reqwest, Result};
use crate::source::{GameFeed, GameSnapshot, SnapshotSource};
use crate::wire::{decode_game, decode_snapshot};

pub const DEFAULT_API_BASE: &str = "https://statsapi.web.nhl.com/api/v1";

/// Connection settings for the live feed
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: concat!("onice/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Clone)]
pub struct HttpSnapshotSource {
    client: Client,
    base_url: String,
}

impl HttpSnapshotSource {
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                ExError::new(ExErrorKind::Internal)
                    .with_op("build_http_client")
                    .with_message(e.to_string())
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Live-feed URL for a game, optionally pinned to a time-code
    pub fn feed_url(&self, game_pk: i64, time_code: Option<&TimeCode>) -> String {
        match time_code {
            Some(code) => format!(
                "{}/game/{}/feed/live?timecode={}",
                self.base_url, game_pk, code
            ),
            None => format!("{}/game/{}/feed/live", self.base_url, game_pk),
        }
    }

    async fn get_bytes(&self, op: &str, url: String) -> Result<Vec<u8>> {
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| from_reqwest(op, e))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(bad_status(op, status, &text));
        }

        let body = resp.bytes().await.map_err(|e| from_reqwest(op, e))?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl SnapshotSource for HttpSnapshotSource {
    async fn fetch_game(&self, game_pk: i64) -> Result<GameFeed> {
        let url = self.feed_url(game_pk, None);
        tracing::debug!(game_pk, url = %url, "Fetching game feed");

        let body = self
            .get_bytes("fetch_game", url)
            .await
            .map_err(|e| e.with_game_pk(game_pk))?;
        decode_game(&body).map_err(|e| e.with_game_pk(game_pk))
    }

    async fn fetch_snapshot(&self, game_pk: i64, time_code: &TimeCode) -> Result<GameSnapshot> {
        let url = self.feed_url(game_pk, Some(time_code));
        tracing::trace!(game_pk, time_code = %time_code, "Fetching snapshot");

        let body = self
            .get_bytes("fetch_snapshot", url)
            .await
            .map_err(|e| e.with_game_pk(game_pk))?;
        decode_snapshot(&body).map_err(|e| e.with_game_pk(game_pk))
    }
}
