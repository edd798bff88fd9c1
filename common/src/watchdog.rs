//! Staleness watchdog.
//!
//! Flags the snapshot as stale when no `UPDATE` has arrived for longer than
//! the timeout. The check runs every tick and rewrites `has_error` from
//! scratch, so an optimistic clear by the decoder is corrected immediately if
//! it was wrong.

use crate::config::STALE_TIMEOUT_MS;
use crate::telemetry::TelemetrySnapshot;

/// Change of the stale flag since the previous check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StaleTransition {
    /// Data just went stale.
    BecameStale,
    /// Fresh data arrived after a stale period.
    Recovered,
}

/// Stale-data detector.
#[derive(Clone, Copy, Debug)]
pub struct Watchdog {
    timeout_ms: u64,
    prev_error: bool,
}

impl Watchdog {
    pub const fn new(timeout_ms: u64) -> Self {
        Self {
            timeout_ms,
            prev_error: false,
        }
    }

    #[inline]
    pub const fn timeout_ms(&self) -> u64 { self.timeout_ms }

    /// Check if data is stale at `now_ms`. Strictly greater than the timeout
    /// counts; exactly the timeout does not.
    #[inline]
    pub fn is_stale(
        &self,
        snapshot: &TelemetrySnapshot,
        now_ms: u64,
    ) -> bool {
        now_ms.saturating_sub(snapshot.last_update_ms) > self.timeout_ms
    }

    /// Recompute `snapshot.has_error` and report a transition, once per edge.
    pub fn check(
        &mut self,
        snapshot: &mut TelemetrySnapshot,
        now_ms: u64,
    ) -> Option<StaleTransition> {
        let stale = self.is_stale(snapshot, now_ms);
        snapshot.has_error = stale;

        let transition = match (self.prev_error, stale) {
            (false, true) => Some(StaleTransition::BecameStale),
            (true, false) => Some(StaleTransition::Recovered),
            _ => None,
        };
        self.prev_error = stale;
        transition
    }
}

impl Default for Watchdog {
    fn default() -> Self { Self::new(STALE_TIMEOUT_MS) }
}
