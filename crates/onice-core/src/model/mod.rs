pub mod event;
pub mod game;
pub mod on_ice;
pub mod status;

pub use event::{Contributor, Coordinates, Event, EventResult, Score};
pub use game::GameInfo;
pub use on_ice::{LineHash, OnIcePlayer, OnIceRecord, TeamOnIce, SKATER_SLOTS};
pub use status::GameStatus;
