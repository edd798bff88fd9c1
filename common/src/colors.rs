//! Display palette, keyed by semantic role.
//!
//! Screens never pick raw colours; they ask for a role (`BG_ALERT`,
//! `BAR_WARN`, ...) so the palette can be retuned in one place.
//!
//! ## Rgb565 Color Format
//!
//! Rgb565 uses 16 bits per pixel: 5 bits red, 6 bits green, 5 bits blue.
//! This is native to the ST7789 and needs no conversion when flushed.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

use crate::thresholds::TempBand;

// =============================================================================
// Base Colors
// =============================================================================

/// Pure black (0, 0, 0).
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white (31, 63, 31).
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure red (31, 0, 0).
pub const RED: Rgb565 = Rgb565::RED;

/// Pure green (0, 63, 0).
pub const GREEN: Rgb565 = Rgb565::GREEN;

/// Pure yellow (31, 63, 0).
pub const YELLOW: Rgb565 = Rgb565::YELLOW;

/// Orange warning color. RGB565: (31, 32, 0).
pub const ORANGE: Rgb565 = Rgb565::new(31, 32, 0);

/// Mid gray for secondary labels. RGB565: (16, 32, 16).
pub const GRAY: Rgb565 = Rgb565::new(16, 32, 16);

/// Dark gray for empty bar tracks. RGB565: (6, 12, 6).
pub const DARK_GRAY: Rgb565 = Rgb565::new(6, 12, 6);

/// Deep navy header. RGB565: (0, 10, 12).
pub const NAVY: Rgb565 = Rgb565::new(0, 10, 12);

/// Dark red alert background, dark enough for white text. RGB565: (18, 0, 0).
pub const DARK_RED: Rgb565 = Rgb565::new(18, 0, 0);

// =============================================================================
// Semantic Roles
// =============================================================================

/// Background while everything is nominal.
pub const BG_NORMAL: Rgb565 = BLACK;

/// Background while data is stale or any alert predicate holds.
pub const BG_ALERT: Rgb565 = DARK_RED;

/// Header bar fill.
pub const HEADER: Rgb565 = NAVY;

/// Temperature bar below the warning band.
pub const BAR_SAFE: Rgb565 = GREEN;

/// Temperature bar inside the warning band.
pub const BAR_WARN: Rgb565 = ORANGE;

/// Temperature bar above the alert threshold.
pub const BAR_CRITICAL: Rgb565 = RED;

/// Unfilled part of a temperature bar.
pub const BAR_TRACK: Rgb565 = DARK_GRAY;

/// Values and titles.
pub const TEXT_PRIMARY: Rgb565 = WHITE;

/// Labels and hints.
pub const TEXT_SECONDARY: Rgb565 = GRAY;

/// Status text for a "Healthy" label.
pub const STATUS_OK: Rgb565 = GREEN;

/// Status text for any other label.
pub const STATUS_BAD: Rgb565 = RED;

/// "NO DATA" banner text.
pub const NO_DATA_TEXT: Rgb565 = YELLOW;

/// Bar colour for a temperature band.
#[inline]
pub const fn bar_color(band: TempBand) -> Rgb565 {
    match band {
        TempBand::Safe => BAR_SAFE,
        TempBand::Warning => BAR_WARN,
        TempBand::Critical => BAR_CRITICAL,
    }
}

/// Status text colour: healthy labels are green, everything else red.
#[inline]
pub const fn status_color(healthy: bool) -> Rgb565 {
    if healthy { STATUS_OK } else { STATUS_BAD }
}
