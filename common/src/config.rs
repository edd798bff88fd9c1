//! Compile-time configuration for the NAS monitor.
//!
//! All tunables are `const` so they land in flash and cost nothing per tick.
//! [`MonitorConfig`] bundles the values the engine consults at runtime; it is
//! built once at start-up (normally via `Default`) and never reloaded.

use crate::canvas::Orientation;

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels (ST7789 on Pimoroni PIM715, landscape: 320x240)
pub const SCREEN_WIDTH: u32 = 320;

/// Display height in pixels
pub const SCREEN_HEIGHT: u32 = 240;

/// Header bar height in pixels.
pub const HEADER_HEIGHT: u32 = 26;

/// Height of the body area below the header.
pub const BODY_HEIGHT: u32 = SCREEN_HEIGHT - HEADER_HEIGHT;

/// Left margin used by every screen.
pub const MARGIN_X: i32 = 8;

// =============================================================================
// Telemetry Configuration
// =============================================================================

/// Number of drive temperature channels reported by `UPDATE`.
pub const DRIVE_COUNT: usize = 5;

/// System temperature plus one per drive.
pub const TEMP_COUNT: usize = DRIVE_COUNT + 1;

/// Maximum number of storage pools kept for display. Further `POOL:` lines are dropped.
pub const MAX_POOLS: usize = 4;

/// Longest input line (bytes, excluding the newline) the line assembler accepts.
pub const LINE_CAPACITY: usize = 128;

// =============================================================================
// Timing Configuration
// =============================================================================

/// Time without an `UPDATE` before the display enters the "no data" error state.
pub const STALE_TIMEOUT_MS: u64 = 60_000;

/// Minimum time between two accepted button presses (shared by all buttons).
pub const DEBOUNCE_MS: u64 = 200;

/// Sleep between polling ticks.
pub const TICK_INTERVAL_MS: u64 = 50;

const _: () = assert!(TICK_INTERVAL_MS < DEBOUNCE_MS);
const _: () = assert!(DEBOUNCE_MS < STALE_TIMEOUT_MS);

// =============================================================================
// Runtime Bundle
// =============================================================================

/// Engine settings, fixed for the life of the process.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonitorConfig {
    /// Alert threshold in degrees Celsius (strictly-greater triggers).
    pub temp_threshold: f32,
    /// Staleness timeout for the watchdog.
    pub stale_timeout_ms: u64,
    /// Global button debounce window.
    pub debounce_ms: u64,
    /// Orientation requested from the display at start-up.
    pub orientation: Orientation,
}

impl MonitorConfig {
    /// Configuration built from the compile-time defaults.
    pub const fn new() -> Self {
        Self {
            temp_threshold: crate::thresholds::TEMP_THRESHOLD,
            stale_timeout_ms: STALE_TIMEOUT_MS,
            debounce_ms: DEBOUNCE_MS,
            orientation: Orientation::Landscape,
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_constants() {
        let config = MonitorConfig::default();
        assert_eq!(config.temp_threshold, 52.0);
        assert_eq!(config.stale_timeout_ms, 60_000);
        assert_eq!(config.debounce_ms, 200);
        assert_eq!(config.orientation, Orientation::Landscape);
    }

    #[test]
    fn test_layout_fits_screen() {
        assert_eq!(HEADER_HEIGHT + BODY_HEIGHT, SCREEN_HEIGHT);
        assert_eq!(TEMP_COUNT, 6, "system sensor plus five drives");
    }
}
