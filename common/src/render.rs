//! Redraw scheduling.
//!
//! The display is redrawn as a full frame, and only when needed: either a
//! redraw was explicitly requested (boot, screen change, staleness change,
//! changed telemetry) or the data about to be shown differs from what was
//! last drawn.
//!
//! | Trigger | Mechanism |
//! |---------|-----------|
//! | Boot | `force_redraw` starts set |
//! | Screen change / stale edge / changed command | [`RedrawScheduler::request_redraw`] |
//! | Any displayed value differs | [`RenderedSnapshot`] comparison |

use heapless::String;

use crate::config::TEMP_COUNT;
use crate::pages::Screen;
use crate::telemetry::{HealthLabel, IPV4_LEN, IPV6_LEN, MAC_LEN, TelemetrySnapshot};

// =============================================================================
// Rendered Snapshot
// =============================================================================

/// Copy of the displayed values at the time of the last full render.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedSnapshot {
    pub temperatures: [f32; TEMP_COUNT],
    pub storage_health: HealthLabel,
    pub mac_address: String<MAC_LEN>,
    pub ipv4_address: String<IPV4_LEN>,
    pub ipv6_address: String<IPV6_LEN>,
    pub pool_count: usize,
    pub has_error: bool,
    pub screen: Screen,
}

impl RenderedSnapshot {
    pub fn capture(
        snapshot: &TelemetrySnapshot,
        screen: Screen,
    ) -> Self {
        Self {
            temperatures: snapshot.temperatures(),
            storage_health: snapshot.storage_health.clone(),
            mac_address: snapshot.mac_address.clone(),
            ipv4_address: snapshot.ipv4_address.clone(),
            ipv6_address: snapshot.ipv6_address.clone(),
            pool_count: snapshot.pools.len(),
            has_error: snapshot.has_error,
            screen,
        }
    }

    /// Check if `snapshot` shown on `screen` would look the same as this render.
    pub fn matches(
        &self,
        snapshot: &TelemetrySnapshot,
        screen: Screen,
    ) -> bool {
        self.screen == screen
            && self.has_error == snapshot.has_error
            && self.pool_count == snapshot.pools.len()
            && self.temperatures == snapshot.temperatures()
            && self.storage_health == snapshot.storage_health
            && self.mac_address == snapshot.mac_address
            && self.ipv4_address == snapshot.ipv4_address
            && self.ipv6_address == snapshot.ipv6_address
    }
}

// =============================================================================
// Redraw Scheduler
// =============================================================================

/// Decides whether a tick has to repaint the screen.
#[derive(Clone, Debug)]
pub struct RedrawScheduler {
    force_redraw: bool,
    rendered: Option<RenderedSnapshot>,
}

impl RedrawScheduler {
    /// Starts with a forced redraw so the first tick paints the boot frame.
    pub const fn new() -> Self {
        Self {
            force_redraw: true,
            rendered: None,
        }
    }

    /// Force the next check to report a redraw.
    #[inline]
    pub fn request_redraw(&mut self) { self.force_redraw = true; }

    #[inline]
    pub const fn is_forced(&self) -> bool { self.force_redraw }

    /// Snapshot of the last completed render.
    pub fn rendered(&self) -> Option<&RenderedSnapshot> { self.rendered.as_ref() }

    pub fn should_redraw(
        &self,
        snapshot: &TelemetrySnapshot,
        screen: Screen,
    ) -> bool {
        if self.force_redraw {
            return true;
        }
        match &self.rendered {
            Some(rendered) => !rendered.matches(snapshot, screen),
            None => true,
        }
    }

    /// Record a completed render and clear the force flag.
    pub fn mark_rendered(
        &mut self,
        snapshot: &TelemetrySnapshot,
        screen: Screen,
    ) {
        self.rendered = Some(RenderedSnapshot::capture(snapshot, screen));
        self.force_redraw = false;
    }
}

impl Default for RedrawScheduler {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::PoolRecord;

    #[test]
    fn test_initial_state_forces_redraw() {
        let scheduler = RedrawScheduler::new();
        assert!(scheduler.is_forced());
        assert!(scheduler.rendered().is_none());
        assert!(scheduler.should_redraw(&TelemetrySnapshot::new(0), Screen::Main));
    }

    #[test]
    fn test_mark_rendered_settles() {
        let snap = TelemetrySnapshot::new(0);
        let mut scheduler = RedrawScheduler::new();
        scheduler.mark_rendered(&snap, Screen::Main);
        assert!(!scheduler.is_forced());
        assert!(!scheduler.should_redraw(&snap, Screen::Main));
    }

    #[test]
    fn test_request_redraw_forces() {
        let snap = TelemetrySnapshot::new(0);
        let mut scheduler = RedrawScheduler::new();
        scheduler.mark_rendered(&snap, Screen::Main);
        scheduler.request_redraw();
        assert!(scheduler.should_redraw(&snap, Screen::Main));
    }

    #[test]
    fn test_each_displayed_field_triggers() {
        let base = TelemetrySnapshot::new(0);
        let mut scheduler = RedrawScheduler::new();
        scheduler.mark_rendered(&base, Screen::Main);

        assert!(scheduler.should_redraw(&base, Screen::Network), "screen");

        let mut snap = base.clone();
        snap.drive_temps[4] = 41.0;
        assert!(scheduler.should_redraw(&snap, Screen::Main), "temperature");

        let mut snap = base.clone();
        snap.storage_health.set("Problem");
        assert!(scheduler.should_redraw(&snap, Screen::Main), "health");

        let mut snap = base.clone();
        snap.ipv6_address.push_str("fe80::1").unwrap();
        assert!(scheduler.should_redraw(&snap, Screen::Main), "network");

        let mut snap = base.clone();
        snap.push_pool(PoolRecord::new("tank", "1T", "1%", "Healthy"));
        assert!(scheduler.should_redraw(&snap, Screen::Main), "pool count");

        let mut snap = base.clone();
        snap.has_error = true;
        assert!(scheduler.should_redraw(&snap, Screen::Main), "error flag");
    }

    #[test]
    fn test_last_update_time_is_not_displayed() {
        let base = TelemetrySnapshot::new(0);
        let mut scheduler = RedrawScheduler::new();
        scheduler.mark_rendered(&base, Screen::Main);

        let mut snap = base.clone();
        snap.last_update_ms = 42_000;
        assert!(!scheduler.should_redraw(&snap, Screen::Main));
    }
}
