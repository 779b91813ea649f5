//! Canonical field keys and event names for structured logging
//!
//! Every boundary log line and captured test event uses these keys, so
//! log queries and assertions never drift apart.

pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";
pub const FIELD_TRACE_ID: &str = "trace_id";

// Entity identifiers
pub const FIELD_SNIPPET_ID: &str = "snippet_id";
pub const FIELD_CALLER: &str = "caller";

// Collection sizes
pub const FIELD_COUNT: &str = "count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
