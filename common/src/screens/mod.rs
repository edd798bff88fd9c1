//! Render dispatcher and the three monitor screens.
//!
//! Every render paints a full frame: background, header, the body of the
//! current screen and, while data is stale, the "NO DATA" banner.
//!
//! # Frame Layout (320x240)
//!
//! ```text
//! +--------------------------------------+  y = 0
//! | TITLE                        o o o   |  header, 26 px
//! +--------------------------------------+  y = 26
//! |                                      |
//! |  screen body                         |
//! |                                      |
//! +--------------------------------------+  y = 214
//! |               NO DATA                |  banner (stale only)
//! +--------------------------------------+  y = 240
//! ```

mod network;
mod storage;
mod temperatures;

use embedded_graphics::pixelcolor::Rgb565;

use crate::alerts::AlertConditions;
use crate::canvas::{Canvas, TextSize};
use crate::colors::{BG_ALERT, BG_NORMAL, HEADER, NO_DATA_TEXT, TEXT_PRIMARY, TEXT_SECONDARY};
use crate::config::{HEADER_HEIGHT, MARGIN_X, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::pages::Screen;
use crate::styles::text_width;
use crate::telemetry::TelemetrySnapshot;

pub use network::draw_network_screen;
pub use storage::draw_storage_screen;
pub use temperatures::draw_main_screen;

// =============================================================================
// Layout
// =============================================================================

/// First body row, a few pixels below the header.
pub const BODY_TOP: i32 = HEADER_HEIGHT as i32 + 6;

/// Height of the "NO DATA" strip at the bottom of the screen.
pub const BANNER_HEIGHT: u32 = 26;

/// Top edge of the "NO DATA" strip.
pub const BANNER_Y: i32 = (SCREEN_HEIGHT - BANNER_HEIGHT) as i32;

/// Text shown while no `UPDATE` has arrived within the timeout.
pub const NO_DATA: &str = "NO DATA";

/// Placeholder for empty text values.
pub const EMPTY_VALUE: &str = "--";

const TITLE_POS: (i32, i32) = (MARGIN_X, 3);
const DOT_SIZE: u32 = 8;
const DOT_PITCH: i32 = 14;
const DOT_Y: i32 = (HEADER_HEIGHT as i32 - DOT_SIZE as i32) / 2;

// =============================================================================
// Screen View
// =============================================================================

/// Everything a render needs, borrowed for the duration of one frame.
#[derive(Clone, Copy, Debug)]
pub struct ScreenView<'a> {
    pub snapshot: &'a TelemetrySnapshot,
    pub screen: Screen,
    pub alerts: AlertConditions,
    pub threshold: f32,
}

impl ScreenView<'_> {
    /// Alert background while stale or while any alert predicate holds.
    pub const fn is_alarming(&self) -> bool { self.snapshot.has_error || self.alerts.any() }

    pub const fn background(&self) -> Rgb565 {
        if self.is_alarming() { BG_ALERT } else { BG_NORMAL }
    }
}

/// `text`, or `--` when it is empty.
#[inline]
pub fn or_placeholder(text: &str) -> &str { if text.is_empty() { EMPTY_VALUE } else { text } }

// =============================================================================
// Dispatcher
// =============================================================================

/// Paint a full frame for `view.screen`.
pub fn render_screen<C>(
    canvas: &mut C,
    view: &ScreenView<'_>,
) -> Result<(), C::Error>
where
    C: Canvas + ?Sized,
{
    let background = view.background();
    canvas.fill_rect(0, 0, SCREEN_WIDTH, SCREEN_HEIGHT, background)?;
    draw_header(canvas, view.screen)?;

    match view.screen {
        Screen::Main => draw_main_screen(canvas, view)?,
        Screen::Network => draw_network_screen(canvas, view.snapshot)?,
        Screen::Storage => draw_storage_screen(canvas, view.snapshot)?,
    }

    if view.snapshot.has_error {
        draw_no_data_banner(canvas)?;
    }
    Ok(())
}

/// Header bar with the screen title and one dot per screen, current one lit.
pub fn draw_header<C>(
    canvas: &mut C,
    screen: Screen,
) -> Result<(), C::Error>
where
    C: Canvas + ?Sized,
{
    canvas.fill_rect(0, 0, SCREEN_WIDTH, HEADER_HEIGHT, HEADER)?;
    canvas.draw_text(TITLE_POS.0, TITLE_POS.1, screen.title(), TEXT_PRIMARY, TextSize::Medium)?;

    let first_dot_x = SCREEN_WIDTH as i32 - MARGIN_X - DOT_PITCH * (Screen::ALL.len() as i32 - 1) - DOT_SIZE as i32;
    for s in Screen::ALL {
        let color = if s == screen { TEXT_PRIMARY } else { TEXT_SECONDARY };
        let x = first_dot_x + DOT_PITCH * s.index() as i32;
        canvas.fill_rect(x, DOT_Y, DOT_SIZE, DOT_SIZE, color)?;
    }
    Ok(())
}

/// Bottom strip shown on every screen while data is stale.
pub fn draw_no_data_banner<C>(canvas: &mut C) -> Result<(), C::Error>
where
    C: Canvas + ?Sized,
{
    canvas.fill_rect(0, BANNER_Y, SCREEN_WIDTH, BANNER_HEIGHT, BG_NORMAL)?;
    let x = (SCREEN_WIDTH - text_width(NO_DATA, TextSize::Medium)) as i32 / 2;
    canvas.draw_text(x, BANNER_Y + 3, NO_DATA, NO_DATA_TEXT, TextSize::Medium)
}

// =============================================================================
// Unit Tests
// =============================================================================
