//! The owning context threaded through the tick loop.
//!
//! [`Monitor`] holds every piece of engine state: the telemetry snapshot,
//! watchdog, alert detector, redraw scheduler, navigator and the diagnostic
//! notice buffer. Platforms create one at boot and call [`Monitor::tick`]
//! every `TICK_INTERVAL_MS` with the current time, the button levels and
//! their line source, alert sink and canvas.
//!
//! # Tick Order
//!
//! 1. Read at most one line and decode it
//! 2. Re-evaluate staleness
//! 3. Re-evaluate alert predicates and play the alert for each new one
//! 4. Sample buttons
//! 5. Decide whether to redraw
//! 6. Render, then record what was rendered
//!
//! The alert pattern blocks, so a tick that fires an alert takes longer.

use crate::alerts::{AlertConditions, AlertDetector, AlertEdges, AlertSink};
use crate::button::{ButtonLevels, Navigator};
use crate::canvas::Canvas;
use crate::config::MonitorConfig;
use crate::diagnostics::DiagnosticLog;
use crate::line_buffer::LineSource;
use crate::pages::Screen;
use crate::protocol::{Applied, Command, apply};
use crate::push_fmt;
use crate::render::RedrawScheduler;
use crate::screens::{ScreenView, render_screen};
use crate::telemetry::TelemetrySnapshot;
use crate::watchdog::{StaleTransition, Watchdog};

// =============================================================================
// Tick I/O
// =============================================================================

/// Per-tick inputs sampled by the platform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Monotonic milliseconds since boot.
    pub now_ms: u64,
    pub buttons: ButtonLevels,
}

/// What happened during one tick, for platform logging.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Result of the line processed this tick, if any.
    pub command: Option<Applied>,
    pub stale: Option<StaleTransition>,
    /// Alerts that fired (and were played) this tick.
    pub alerts: AlertEdges,
    /// New screen after an accepted button press.
    pub screen_changed: Option<Screen>,
    /// A full frame was drawn.
    pub rendered: bool,
}

impl TickReport {
    /// Check if nothing worth logging happened.
    pub fn is_quiet(&self) -> bool {
        self.command.is_none() && self.stale.is_none() && !self.alerts.any() && self.screen_changed.is_none()
    }
}

/// A tick whose state updates ran but whose frame could not be drawn.
///
/// Stale transitions, alert edges and screen changes are reported once, so
/// the report travels with the display error instead of being lost.
#[derive(Debug)]
pub struct RenderFailed<E> {
    /// Everything the tick did before rendering. `rendered` is false.
    pub report: TickReport,
    pub error: E,
}

// =============================================================================
// Monitor
// =============================================================================

/// Telemetry display state engine.
pub struct Monitor {
    config: MonitorConfig,
    snapshot: TelemetrySnapshot,
    watchdog: Watchdog,
    detector: AlertDetector,
    conditions: AlertConditions,
    scheduler: RedrawScheduler,
    navigator: Navigator,
    diagnostics: DiagnosticLog,
}

impl Monitor {
    /// Fresh engine. `boot_ms` seeds the staleness clock, so the "no data"
    /// state appears `stale_timeout_ms` after boot if nothing arrives.
    pub fn new(
        config: MonitorConfig,
        boot_ms: u64,
    ) -> Self {
        Self {
            config,
            snapshot: TelemetrySnapshot::new(boot_ms),
            watchdog: Watchdog::new(config.stale_timeout_ms),
            detector: AlertDetector::new(),
            conditions: AlertConditions::default(),
            scheduler: RedrawScheduler::new(),
            navigator: Navigator::new(config.debounce_ms),
            diagnostics: DiagnosticLog::new(),
        }
    }

    /// One-time display setup. Call before the first tick.
    pub fn start<C>(
        &mut self,
        canvas: &mut C,
    ) -> Result<(), C::Error>
    where
        C: Canvas + ?Sized,
    {
        canvas.set_orientation(self.config.orientation)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[inline]
    pub const fn snapshot(&self) -> &TelemetrySnapshot { &self.snapshot }

    #[inline]
    pub const fn screen(&self) -> Screen { self.navigator.current() }

    /// Alert predicates as of the last [`Monitor::check_alerts`].
    #[inline]
    pub const fn conditions(&self) -> AlertConditions { self.conditions }

    /// Notices accumulated since the platform last drained them.
    pub fn diagnostics_mut(&mut self) -> &mut DiagnosticLog { &mut self.diagnostics }

    pub fn diagnostics(&self) -> &DiagnosticLog { &self.diagnostics }

    // -------------------------------------------------------------------------
    // Tick
    // -------------------------------------------------------------------------

    /// Run one full tick.
    ///
    /// A render error comes back as [`RenderFailed`] carrying this tick's
    /// report. The frame is not marked rendered, so the next tick tries again.
    pub fn tick<L, A, C>(
        &mut self,
        input: TickInput,
        lines: &mut L,
        alert_sink: &mut A,
        canvas: &mut C,
    ) -> Result<TickReport, RenderFailed<C::Error>>
    where
        L: LineSource + ?Sized,
        A: AlertSink + ?Sized,
        C: Canvas + ?Sized,
    {
        let mut report = TickReport {
            command: lines
                .try_read_line()
                .map(|line| self.handle_line(&line, input.now_ms)),
            ..TickReport::default()
        };
        report.stale = self.check_watchdog(input.now_ms);
        report.alerts = self.check_alerts(alert_sink);
        report.screen_changed = self.handle_buttons(input.buttons, input.now_ms);

        if self.should_redraw() {
            if let Err(error) = self.render(canvas) {
                return Err(RenderFailed { report, error });
            }
            report.rendered = true;
        }
        Ok(report)
    }

    /// Decode one line into the snapshot.
    pub fn handle_line(
        &mut self,
        line: &str,
        now_ms: u64,
    ) -> Applied {
        let command = Command::parse(line);
        let applied = apply(&command, &mut self.snapshot, now_ms);

        if applied.changed {
            self.scheduler.request_redraw();
        }
        if let Command::Unknown(text) = command {
            push_fmt!(self.diagnostics, "unknown command: {}", text);
        }
        if applied.pool_dropped {
            push_fmt!(self.diagnostics, "pool list full, dropped: {}", line.trim());
        }
        applied
    }

    /// Re-evaluate staleness at `now_ms`.
    pub fn check_watchdog(
        &mut self,
        now_ms: u64,
    ) -> Option<StaleTransition> {
        let transition = self.watchdog.check(&mut self.snapshot, now_ms);
        match transition {
            Some(StaleTransition::BecameStale) => {
                push_fmt!(self.diagnostics, "no UPDATE for over {} ms", self.watchdog.timeout_ms());
                self.scheduler.request_redraw();
            }
            Some(StaleTransition::Recovered) => {
                self.diagnostics.push("telemetry recovered");
                self.scheduler.request_redraw();
            }
            None => {}
        }
        transition
    }

    /// Re-evaluate alert predicates and play one pattern per new alert.
    pub fn check_alerts<A>(
        &mut self,
        alert_sink: &mut A,
    ) -> AlertEdges
    where
        A: AlertSink + ?Sized,
    {
        self.conditions = AlertConditions::evaluate(&self.snapshot, self.config.temp_threshold);
        let edges = self.detector.update(self.conditions);

        if edges.high_temperature {
            push_fmt!(self.diagnostics, "alert: temperature above {:.1}C", self.config.temp_threshold);
        }
        if edges.storage_problem {
            push_fmt!(self.diagnostics, "alert: storage {}", self.snapshot.storage_health.as_str());
        }
        edges.play(alert_sink);
        edges
    }

    /// Sample the navigation buttons.
    pub fn handle_buttons(
        &mut self,
        levels: ButtonLevels,
        now_ms: u64,
    ) -> Option<Screen> {
        let changed = self.navigator.update(levels, now_ms);
        if let Some(screen) = changed {
            push_fmt!(self.diagnostics, "screen: {}", screen.title());
            self.scheduler.request_redraw();
        }
        changed
    }

    /// Check if the current state differs from the last frame (or a redraw was requested).
    pub fn should_redraw(&self) -> bool { self.scheduler.should_redraw(&self.snapshot, self.screen()) }

    /// Paint the current screen and record it as rendered.
    pub fn render<C>(
        &mut self,
        canvas: &mut C,
    ) -> Result<(), C::Error>
    where
        C: Canvas + ?Sized,
    {
        let view = ScreenView {
            snapshot: &self.snapshot,
            screen: self.screen(),
            alerts: self.conditions,
            threshold: self.config.temp_threshold,
        };
        render_screen(canvas, &view)?;
        self.scheduler.mark_rendered(&self.snapshot, self.screen());
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
