//! NAS monitor simulator for desktop platforms.
//!
//! Runs the display engine against an `embedded-graphics-simulator` window.
//! Protocol lines come from stdin (e.g. piped from the collector or typed by
//! hand), buttons from the keyboard, and alerts ring the terminal bell.
//!
//! ```text
//! RUST_LOG=debug cargo run -p nasmon-simulator
//! ```
//!
//! `NASMON_SCALE` sets the window pixel scale (default 2).

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]

mod alert;
mod input;
mod timing;

use std::thread;
use std::time::Instant;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use log::{debug, info, warn};
use nasmon_common::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use nasmon_common::{DrawTargetCanvas, Monitor, MonitorConfig, StaleTransition, TickInput, TickReport};

use crate::alert::BellAlert;
use crate::input::{Keys, SimulatorLines};
use crate::timing::TICK_TIME;

const DEFAULT_SCALE: u32 = 2;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let scale = std::env::var("NASMON_SCALE")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|&s| s > 0)
        .unwrap_or(DEFAULT_SCALE);

    let display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let mut canvas = DrawTargetCanvas::new(display);
    let output_settings = OutputSettingsBuilder::new().scale(scale).build();
    let mut window = Window::new("NAS Monitor Sim", &output_settings);

    let started = Instant::now();
    let mut monitor = Monitor::new(MonitorConfig::default(), 0);
    let Ok(()) = monitor.start(&mut canvas);
    if !canvas.orientation().is_landscape() {
        warn!("simulator window is landscape only; ignoring {:?}", canvas.orientation());
    }

    let mut lines = SimulatorLines::spawn();
    let mut keys = Keys::default();
    let mut bell = BellAlert::default();

    info!("NAS monitor simulator started (A/B = prev/next, U/H/N/P = demo data)");
    window.update(canvas.target());

    loop {
        let tick_start = Instant::now();

        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => {
                    info!("exiting after {} alert(s)", bell.played());
                    return;
                }
                SimulatorEvent::KeyDown { keycode, repeat, .. } if !repeat => keys.key_down(keycode, &mut lines),
                SimulatorEvent::KeyUp { keycode, .. } => keys.key_up(keycode),
                _ => {}
            }
        }

        let input = TickInput {
            now_ms: started.elapsed().as_millis() as u64,
            buttons: keys.levels(),
        };
        let report = match monitor.tick(input, &mut lines, &mut bell, &mut canvas) {
            Ok(report) => report,
            Err(failed) => failed.report,
        };
        log_report(&report);

        while let Some(notice) = monitor.diagnostics_mut().pop_oldest() {
            debug!("{}", notice.as_str());
        }

        if report.rendered {
            window.update(canvas.target());
        }

        let elapsed = tick_start.elapsed();
        if let Some(remaining) = TICK_TIME.checked_sub(elapsed) {
            thread::sleep(remaining);
        }
    }
}

fn log_report(report: &TickReport) {
    if let Some(applied) = report.command {
        if applied.is_unknown() {
            warn!("unknown command ignored");
        } else {
            debug!("{} (changed: {})", applied.kind.name(), applied.changed);
        }
        if applied.pool_dropped {
            warn!("pool list full, record dropped");
        }
    }
    match report.stale {
        Some(StaleTransition::BecameStale) => warn!("no telemetry, showing NO DATA"),
        Some(StaleTransition::Recovered) => info!("telemetry recovered"),
        None => {}
    }
    if report.alerts.high_temperature {
        warn!("temperature alert");
    }
    if report.alerts.storage_problem {
        warn!("storage alert");
    }
    if let Some(screen) = report.screen_changed {
        info!("screen: {}", screen.title());
    }
}
