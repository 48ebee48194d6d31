//! onice core - on-ice reconstruction kernel
//!
//! Pure, synchronous building blocks shared by the fetcher, the store and
//! the engine:
//! - Domain model (events, game info, on-ice records, ledger status)
//! - Timestamp codec for the time-coded snapshot endpoint
//! - Line canonicalization and hashing
//! - Error facility (`ExError`) and structured logging facility

pub mod errors;
pub mod line;
pub mod logging_facility;
pub mod model;
pub mod timecode;

// Referenced by the logging macros
#[doc(hidden)]
pub use onice_core_types as core_types;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, OnIceError, Result};
pub use line::{canonicalize, line_hash, Canonicalized, LineAnomaly};
pub use model::{Event, GameInfo, GameStatus, LineHash, OnIcePlayer, OnIceRecord, TeamOnIce};
pub use timecode::TimeCode;
