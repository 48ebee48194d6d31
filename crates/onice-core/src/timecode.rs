//! Timestamp codec for the snapshot endpoint
//!
//! The live feed can be queried "as of" a moment using a compact time-code:
//! the event's timestamp with the date/time punctuation stripped,
//! `2022-11-20T18:07:32Z` becoming `20221120_180732`.
//!
//! The transformation is purely textual. No parsing or timezone conversion
//! happens here, so whatever offset the feed wrote is what the endpoint sees.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Encoded time-code accepted by the snapshot endpoint
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeCode(String);

impl TimeCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TimeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Encode an event timestamp as a snapshot time-code
///
/// Drops every `-`, `:` and `Z`, and turns the `T` separator into `_`.
///
/// ```
/// use onice_core::timecode::encode;
///
/// assert_eq!(encode("2022-11-20T18:07:32Z").as_str(), "20221120_180732");
/// ```
pub fn encode(event_timestamp: &str) -> TimeCode {
    let code = event_timestamp
        .chars()
        .filter(|c| !matches!(c, '-' | ':' | 'Z'))
        .map(|c| if c == 'T' { '_' } else { c })
        .collect();
    TimeCode(code)
}
