//! Temperature threshold configuration.
//!
//! One alert threshold drives both the audible alert and the bar colouring.
//! Bars turn to the warning colour `TEMP_WARN_MARGIN` degrees below it.
//!
//! | Reading | Band |
//! |---------|------|
//! | `< TEMP_THRESHOLD - TEMP_WARN_MARGIN` | [`TempBand::Safe`] |
//! | `TEMP_THRESHOLD - TEMP_WARN_MARGIN ..= TEMP_THRESHOLD` | [`TempBand::Warning`] |
//! | `> TEMP_THRESHOLD` | [`TempBand::Critical`] |

// =============================================================================
// Temperature Thresholds
// =============================================================================

/// Alert threshold in degrees Celsius. Any reading strictly above it raises
/// the high-temperature alert.
pub const TEMP_THRESHOLD: f32 = 52.0;

/// Width of the warning band below the threshold.
pub const TEMP_WARN_MARGIN: f32 = 5.0;

/// Temperature that fills a bar completely. Readings above it are clamped.
pub const BAR_FULL_SCALE: f32 = 80.0;

const _: () = assert!(TEMP_WARN_MARGIN > 0.0);
const _: () = assert!(TEMP_THRESHOLD < BAR_FULL_SCALE);

// =============================================================================
// Bands
// =============================================================================

/// Colour band of a temperature reading.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TempBand {
    /// Comfortably below the threshold.
    Safe,
    /// Within `TEMP_WARN_MARGIN` of the threshold (inclusive on both ends).
    Warning,
    /// Strictly above the threshold.
    Critical,
}

impl TempBand {
    /// Classify a reading against `threshold`.
    pub fn classify(
        temp: f32,
        threshold: f32,
    ) -> Self {
        if temp > threshold {
            Self::Critical
        } else if temp >= threshold - TEMP_WARN_MARGIN {
            Self::Warning
        } else {
            Self::Safe
        }
    }
}

/// Check if a reading should raise the high-temperature alert.
#[inline]
pub fn is_over_threshold(
    temp: f32,
    threshold: f32,
) -> bool {
    temp > threshold
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
#[allow(clippy::assertions_on_constants)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        assert_eq!(TempBand::classify(46.9, TEMP_THRESHOLD), TempBand::Safe);
        assert_eq!(TempBand::classify(47.0, TEMP_THRESHOLD), TempBand::Warning);
        assert_eq!(TempBand::classify(52.0, TEMP_THRESHOLD), TempBand::Warning);
        assert_eq!(TempBand::classify(52.1, TEMP_THRESHOLD), TempBand::Critical);
    }

    #[test]
    fn test_unset_reading_is_safe() {
        assert_eq!(TempBand::classify(0.0, TEMP_THRESHOLD), TempBand::Safe);
    }

    #[test]
    fn test_threshold_is_strict() {
        assert!(!is_over_threshold(52.0, TEMP_THRESHOLD), "52.0 is not above 52.0");
        assert!(is_over_threshold(52.01, TEMP_THRESHOLD));
    }

    #[test]
    fn test_custom_threshold() {
        assert_eq!(TempBand::classify(40.0, 40.0), TempBand::Warning);
        assert_eq!(TempBand::classify(34.9, 40.0), TempBand::Safe);
    }
}
