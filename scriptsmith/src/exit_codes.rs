//! Stable exit codes for scriptsmith CLI commands.

/// Command succeeded, possibly with degraded model output.
pub const OK: i32 = 0;
/// Terminal failure: unreadable input, invalid configuration, or a failed write.
pub const INVALID: i32 = 1;
