//! Canonical schema constants for structured logging
//!
//! The op wrapper macros emit these, and the test capture layer reads them
//! back, so both sides agree on the names.

pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
