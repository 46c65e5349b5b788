//! Timing constants for the simulator.
//!
//! These constants use `std::time::Duration` which is not available in `no_std`
//! environments, so they are defined here rather than in the common crate.

use std::time::Duration;

/// Target frame time (~50 FPS). The main loop sleeps if frame completes early.
pub const FRAME_TIME: Duration = Duration::from_millis(20);

/// Primary poll interval for the demo, short enough to watch updates land.
pub const DEMO_PRIMARY_INTERVAL_MS: u64 = 20_000;

/// UV poll interval for the demo.
pub const DEMO_UV_INTERVAL_MS: u64 = 45_000;
