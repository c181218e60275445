//! Exit code constants for the CLI application.
//!
//! Every command maps success to [`SUCCESS`] and any failure, including a
//! single unreadable hand in a batch, to [`ERROR`].

/// Success exit code (standard Unix convention).
pub const SUCCESS: i32 = 0;

/// General error exit code.
pub const ERROR: i32 = 2;
