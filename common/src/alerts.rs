//! Alert edge detection.
//!
//! Two predicates are evaluated against the snapshot every tick: any
//! temperature above the threshold, and storage health not `"Healthy"`. Each
//! fires the alert pattern once when it turns true and stays quiet while it
//! remains true. Returning to false re-arms it.

use crate::telemetry::TelemetrySnapshot;
use crate::thresholds::is_over_threshold;

/// Audible (or otherwise noticeable) alert output.
///
/// `play_alert_pattern` blocks until the pattern has finished; the tick that
/// triggered it is delayed by the same amount.
pub trait AlertSink {
    fn play_alert_pattern(&mut self);
}

/// Current value of both alert predicates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AlertConditions {
    pub high_temperature: bool,
    pub storage_problem: bool,
}

impl AlertConditions {
    pub fn evaluate(
        snapshot: &TelemetrySnapshot,
        threshold: f32,
    ) -> Self {
        Self {
            high_temperature: snapshot
                .temperatures()
                .iter()
                .any(|&t| is_over_threshold(t, threshold)),
            storage_problem: !snapshot.storage_health.is_healthy(),
        }
    }

    #[inline]
    pub const fn any(&self) -> bool { self.high_temperature || self.storage_problem }
}

/// Predicates that turned true on this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlertEdges {
    pub high_temperature: bool,
    pub storage_problem: bool,
}

impl AlertEdges {
    #[inline]
    pub const fn any(&self) -> bool { self.high_temperature || self.storage_problem }

    /// Number of alert patterns to play.
    #[inline]
    pub const fn count(&self) -> usize { self.high_temperature as usize + self.storage_problem as usize }

    /// Play one pattern per fired predicate.
    pub fn play<S: AlertSink + ?Sized>(
        &self,
        sink: &mut S,
    ) {
        for _ in 0..self.count() {
            sink.play_alert_pattern();
        }
    }
}

/// Rising-edge detector over [`AlertConditions`].
#[derive(Clone, Copy, Debug, Default)]
pub struct AlertDetector {
    prev: AlertConditions,
}

impl AlertDetector {
    pub const fn new() -> Self {
        Self {
            prev: AlertConditions {
                high_temperature: false,
                storage_problem: false,
            },
        }
    }

    pub fn update(
        &mut self,
        now: AlertConditions,
    ) -> AlertEdges {
        let edges = AlertEdges {
            high_temperature: now.high_temperature && !self.prev.high_temperature,
            storage_problem: now.storage_problem && !self.prev.storage_problem,
        };
        self.prev = now;
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thresholds::TEMP_THRESHOLD;

    struct CountingSink(usize);

    impl AlertSink for CountingSink {
        fn play_alert_pattern(&mut self) { self.0 += 1; }
    }

    fn conditions_for(temp: f32) -> AlertConditions {
        let mut snap = TelemetrySnapshot::new(0);
        snap.drive_temps[2] = temp;
        AlertConditions::evaluate(&snap, TEMP_THRESHOLD)
    }

    #[test]
    fn test_temperature_sequence_fires_twice() {
        let mut detector = AlertDetector::new();
        let mut sink = CountingSink(0);

        for temp in [40.0, 55.0, 55.0, 40.0, 55.0] {
            detector.update(conditions_for(temp)).play(&mut sink);
        }
        assert_eq!(sink.0, 2);
    }

    #[test]
    fn test_threshold_is_strict() {
        assert!(!conditions_for(52.0).high_temperature);
        assert!(conditions_for(52.1).high_temperature);
    }

    #[test]
    fn test_system_temperature_counts() {
        let mut snap = TelemetrySnapshot::new(0);
        snap.system_temp = 60.0;
        assert!(AlertConditions::evaluate(&snap, TEMP_THRESHOLD).high_temperature);
    }

    #[test]
    fn test_storage_problem_label() {
        let mut snap = TelemetrySnapshot::new(0);
        assert!(!AlertConditions::evaluate(&snap, TEMP_THRESHOLD).storage_problem);
        snap.storage_health.set("Degraded");
        assert!(AlertConditions::evaluate(&snap, TEMP_THRESHOLD).storage_problem);
    }

    #[test]
    fn test_predicates_tracked_independently() {
        let mut detector = AlertDetector::new();

        let both = AlertConditions {
            high_temperature: true,
            storage_problem: true,
        };
        let edges = detector.update(both);
        assert_eq!(edges.count(), 2, "both may fire in the same tick");

        let temp_only = AlertConditions {
            high_temperature: true,
            storage_problem: false,
        };
        assert!(!detector.update(temp_only).any());
        let edges = detector.update(both);
        assert!(edges.storage_problem);
        assert!(!edges.high_temperature, "temperature never dropped");
    }
}
