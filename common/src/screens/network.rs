//! Network screen: MAC, IPv4 and IPv6 of the NAS.

use super::{BODY_TOP, or_placeholder};
use crate::canvas::{Canvas, TextSize};
use crate::colors::{TEXT_PRIMARY, TEXT_SECONDARY};
use crate::config::MARGIN_X;
use crate::telemetry::TelemetrySnapshot;

const ROW_PITCH: i32 = 52;
const VALUE_DY: i32 = 14;

pub fn draw_network_screen<C>(
    canvas: &mut C,
    snapshot: &TelemetrySnapshot,
) -> Result<(), C::Error>
where
    C: Canvas + ?Sized,
{
    // IPv6 can be 39 chars, which only fits the small font
    let rows = [
        ("MAC", snapshot.mac_address.as_str(), TextSize::Medium),
        ("IPv4", snapshot.ipv4_address.as_str(), TextSize::Medium),
        ("IPv6", snapshot.ipv6_address.as_str(), TextSize::Small),
    ];

    for (i, (label, value, size)) in rows.into_iter().enumerate() {
        let y = BODY_TOP + 4 + i as i32 * ROW_PITCH;
        canvas.draw_text(MARGIN_X, y, label, TEXT_SECONDARY, TextSize::Small)?;
        canvas.draw_text(MARGIN_X, y + VALUE_DY, or_placeholder(value), TEXT_PRIMARY, size)?;
    }
    Ok(())
}
