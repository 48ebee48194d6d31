//! Table-level repositories
//!
//! Write helpers take a `&Transaction` so callers control atomicity; read
//! helpers take any `&Connection`.

pub mod game_repo;
pub mod line_repo;
pub mod on_ice_repo;

pub use game_repo::GameRepo;
pub use line_repo::{LineRepo, SkaterLine};
pub use on_ice_repo::OnIceRepo;
