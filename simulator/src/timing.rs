//! Timing constants for the simulator.
//!
//! These use `std::time::Duration`, which is not available in `no_std`, so
//! they are derived here from the millisecond constants in the common crate.

use std::time::Duration;

use nasmon_common::config::TICK_INTERVAL_MS;

/// Target tick period. The main loop sleeps if a tick completes early.
pub const TICK_TIME: Duration = Duration::from_millis(TICK_INTERVAL_MS);

/// Gap between two bell rings of one alert pattern.
pub const BELL_GAP: Duration = Duration::from_millis(100);

/// Rings per alert pattern, matching the three buzzer tones on the device.
pub const BELL_RINGS: u32 = 3;
