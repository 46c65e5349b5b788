//! Cadence intervals and network bounds.
//!
//! Millisecond values on a monotonic clock supplied by the caller; nothing in
//! the shared crate reads time on its own.

/// Primary conditions/forecast fetch interval (15 minutes).
pub const PRIMARY_INTERVAL_MS: u64 = 15 * 60 * 1000;

/// UV index fetch interval (30 minutes).
pub const UV_INTERVAL_MS: u64 = 30 * 60 * 1000;

/// Busy-indicator animation step.
pub const ANIMATION_INTERVAL_MS: u64 = 120;

/// Clock redraw check.
pub const CLOCK_INTERVAL_MS: u64 = 1000;

/// Per-attempt timeout for a provider call.
pub const HTTP_TIMEOUT_MS: u32 = 6000;

/// Retries after the first attempt for transient failures.
pub const HTTP_RETRIES: u8 = 2;

const _: () = assert!(ANIMATION_INTERVAL_MS < CLOCK_INTERVAL_MS);
const _: () = assert!(CLOCK_INTERVAL_MS < PRIMARY_INTERVAL_MS);
const _: () = assert!(PRIMARY_INTERVAL_MS <= UV_INTERVAL_MS);
const _: () = assert!((HTTP_TIMEOUT_MS as u64) * (HTTP_RETRIES as u64 + 1) < PRIMARY_INTERVAL_MS);
