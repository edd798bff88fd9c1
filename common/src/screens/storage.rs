//! Storage screen: one block per pool.
//!
//! ```text
//! tank                         Healthy
//! 7.3T total  42% used
//! ```
//!
//! The state text is green for `Healthy` and red for anything else.

use core::fmt::Write;

use heapless::String;

use super::{BODY_TOP, or_placeholder};
use crate::canvas::{Canvas, TextSize};
use crate::colors::{TEXT_PRIMARY, TEXT_SECONDARY, status_color};
use crate::config::{BODY_HEIGHT, HEADER_HEIGHT, MARGIN_X, SCREEN_WIDTH};
use crate::styles::{line_height, text_width};
use crate::telemetry::{PoolRecord, TelemetrySnapshot};

/// Shown when no `POOL:` record is held.
pub const NO_POOLS: &str = "No pools";

const BLOCK_PITCH: i32 = 44;
const DETAIL_DY: i32 = 22;

pub fn draw_storage_screen<C>(
    canvas: &mut C,
    snapshot: &TelemetrySnapshot,
) -> Result<(), C::Error>
where
    C: Canvas + ?Sized,
{
    if snapshot.pools.is_empty() {
        let x = (SCREEN_WIDTH - text_width(NO_POOLS, TextSize::Large)) as i32 / 2;
        let y = (HEADER_HEIGHT + (BODY_HEIGHT - line_height(TextSize::Large)) / 2) as i32;
        return canvas.draw_text(x, y, NO_POOLS, TEXT_SECONDARY, TextSize::Large);
    }

    for (i, pool) in snapshot.pools.iter().enumerate() {
        draw_pool(canvas, BODY_TOP + i as i32 * BLOCK_PITCH, pool)?;
    }
    Ok(())
}

fn draw_pool<C>(
    canvas: &mut C,
    y: i32,
    pool: &PoolRecord,
) -> Result<(), C::Error>
where
    C: Canvas + ?Sized,
{
    canvas.draw_text(MARGIN_X, y, or_placeholder(&pool.name), TEXT_PRIMARY, TextSize::Medium)?;

    let state = or_placeholder(pool.state.as_str());
    let state_x = SCREEN_WIDTH as i32 - MARGIN_X - text_width(state, TextSize::Medium) as i32;
    canvas.draw_text(state_x, y, state, status_color(pool.state.is_healthy()), TextSize::Medium)?;

    let mut detail: String<48> = String::new();
    let _ = write!(
        detail,
        "{} total  {} used",
        or_placeholder(&pool.capacity),
        or_placeholder(&pool.usage)
    );
    canvas.draw_text(MARGIN_X, y + DETAIL_DY, &detail, TEXT_SECONDARY, TextSize::Small)
}
