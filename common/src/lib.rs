//! Telemetry display state engine for the NAS monitor.
//!
//! This crate contains the platform-agnostic engine shared between the
//! simulator and the Pico 2 firmware:
//!
//! - [`protocol`]: line protocol decoder (`UPDATE:`, `NETWORK:`, `POOL:`)
//! - [`telemetry`]: the telemetry snapshot and its fixed-capacity fields
//! - [`watchdog`]: staleness detection
//! - [`alerts`]: edge-triggered alert predicates and the [`AlertSink`] capability
//! - [`render`]: redraw scheduling against the last rendered snapshot
//! - [`pages`] / [`button`]: screen ring and debounced navigation
//! - [`screens`] / [`canvas`]: render dispatcher over the [`Canvas`] capability
//! - [`monitor`]: the owning context and the per-tick sequence
//! - [`line_buffer`]: byte-to-line assembly and the [`LineSource`] capability
//! - [`diagnostics`]: notice buffer drained by the platform logger
//! - [`colors`], [`config`], [`styles`], [`thresholds`]: palette, constants and fonts
//!
//! # no_std Compatibility
//!
//! This crate is `no_std` and allocation-free outside tests. Time is a plain
//! `u64` of milliseconds supplied by the caller, so nothing here depends on
//! `std::time` or a HAL.

#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod alerts;
pub mod button;
pub mod canvas;
pub mod colors;
pub mod config;
pub mod diagnostics;
pub mod line_buffer;
pub mod monitor;
pub mod pages;
pub mod protocol;
pub mod render;
pub mod screens;
pub mod styles;
pub mod telemetry;
pub mod thresholds;
pub mod watchdog;

// Re-export commonly used items
pub use alerts::{AlertConditions, AlertEdges, AlertSink};
pub use button::ButtonLevels;
pub use canvas::{Canvas, DrawTargetCanvas, Orientation, TextSize};
pub use config::*;
pub use line_buffer::{Line, LineBuffer, LineSource};
pub use monitor::{Monitor, RenderFailed, TickInput, TickReport};
pub use pages::Screen;
pub use protocol::{Applied, CommandKind};
pub use telemetry::TelemetrySnapshot;
pub use watchdog::StaleTransition;
