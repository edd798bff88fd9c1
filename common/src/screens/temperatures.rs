//! Main screen: six temperature rows with bars and the storage health line.
//!
//! ```text
//! SYS   45.2C   [##########..........]
//! HDD1  38.1C   [########............]
//! ...
//! STORAGE  Healthy
//! ```

use core::fmt::Write;

use heapless::String;
#[cfg(not(test))]
use micromath::F32Ext;

use super::{BODY_TOP, EMPTY_VALUE, ScreenView};
use crate::canvas::{Canvas, TextSize};
use crate::colors::{BAR_TRACK, TEXT_PRIMARY, TEXT_SECONDARY, bar_color, status_color};
use crate::config::MARGIN_X;
use crate::thresholds::{BAR_FULL_SCALE, TempBand};

const ROW_PITCH: i32 = 24;
const VALUE_X: i32 = 64;
const BAR_X: i32 = 136;
const BAR_WIDTH: u32 = 176;
const BAR_HEIGHT: u32 = 14;
/// Vertical offset centering the bar on 20 px text.
const BAR_DY: i32 = 3;
const HEALTH_Y: i32 = BODY_TOP + 6 * ROW_PITCH + 8;
const HEALTH_VALUE_X: i32 = 100;

const LABELS: [&str; 6] = ["SYS", "HDD1", "HDD2", "HDD3", "HDD4", "HDD5"];

/// Filled width of a bar for `temp`, clamped to `0..=width`.
pub fn bar_fill_width(
    temp: f32,
    width: u32,
) -> u32 {
    let ratio = (temp / BAR_FULL_SCALE).clamp(0.0, 1.0);
    (ratio * width as f32).round() as u32
}

pub fn draw_main_screen<C>(
    canvas: &mut C,
    view: &ScreenView<'_>,
) -> Result<(), C::Error>
where
    C: Canvas + ?Sized,
{
    let snapshot = view.snapshot;

    for (i, (label, temp)) in LABELS.iter().zip(snapshot.temperatures()).enumerate() {
        let y = BODY_TOP + i as i32 * ROW_PITCH;
        draw_temperature_row(canvas, y, label, temp, view.threshold)?;
    }

    let health = &snapshot.storage_health;
    canvas.draw_text(MARGIN_X, HEALTH_Y, "STORAGE", TEXT_SECONDARY, TextSize::Medium)?;
    canvas.draw_text(
        HEALTH_VALUE_X,
        HEALTH_Y,
        super::or_placeholder(health.as_str()),
        status_color(health.is_healthy()),
        TextSize::Medium,
    )
}

fn draw_temperature_row<C>(
    canvas: &mut C,
    y: i32,
    label: &str,
    temp: f32,
    threshold: f32,
) -> Result<(), C::Error>
where
    C: Canvas + ?Sized,
{
    canvas.draw_text(MARGIN_X, y, label, TEXT_SECONDARY, TextSize::Medium)?;

    let mut value_str: String<12> = String::new();
    let value = match write!(value_str, "{temp:.1}C") {
        Ok(()) => value_str.as_str(),
        Err(_) => EMPTY_VALUE,
    };
    canvas.draw_text(VALUE_X, y, value, TEXT_PRIMARY, TextSize::Medium)?;

    let bar_y = y + BAR_DY;
    let filled = bar_fill_width(temp, BAR_WIDTH);
    canvas.fill_rect(BAR_X, bar_y, BAR_WIDTH, BAR_HEIGHT, BAR_TRACK)?;
    canvas.fill_rect(BAR_X, bar_y, filled, BAR_HEIGHT, bar_color(TempBand::classify(temp, threshold)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::AlertConditions;
    use crate::colors::{BAR_CRITICAL, BAR_SAFE, BAR_WARN};
    use crate::pages::Screen;
    use crate::screens::tests::{Op, RecordingCanvas};
    use crate::telemetry::TelemetrySnapshot;
    use crate::thresholds::TEMP_THRESHOLD;

    #[test]
    fn test_bar_fill_width_clamps() {
        assert_eq!(bar_fill_width(0.0, 100), 0);
        assert_eq!(bar_fill_width(-10.0, 100), 0);
        assert_eq!(bar_fill_width(40.0, 100), 50);
        assert_eq!(bar_fill_width(80.0, 100), 100);
        assert_eq!(bar_fill_width(120.0, 100), 100);
    }

    #[test]
    fn test_bar_colors_follow_bands() {
        let mut snap = TelemetrySnapshot::new(0);
        snap.system_temp = 30.0;
        snap.drive_temps = [47.0, 52.0, 52.5, 0.0, 0.0];
        let view = ScreenView {
            snapshot: &snap,
            screen: Screen::Main,
            alerts: AlertConditions::evaluate(&snap, TEMP_THRESHOLD),
            threshold: TEMP_THRESHOLD,
        };

        let mut canvas = RecordingCanvas::default();
        draw_main_screen(&mut canvas, &view).unwrap();

        let bar_colors: std::vec::Vec<_> = canvas
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Fill { x: BAR_X, color, w, .. } if *w > 0 && *color != BAR_TRACK => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(bar_colors, [BAR_SAFE, BAR_WARN, BAR_WARN, BAR_CRITICAL]);
    }

    #[test]
    fn test_value_format() {
        let mut snap = TelemetrySnapshot::new(0);
        snap.drive_temps[1] = 42.46;
        let view = ScreenView {
            snapshot: &snap,
            screen: Screen::Main,
            alerts: AlertConditions::default(),
            threshold: TEMP_THRESHOLD,
        };
        let mut canvas = RecordingCanvas::default();
        draw_main_screen(&mut canvas, &view).unwrap();
        assert!(canvas.has_text("42.5C"));
        assert!(canvas.has_text("0.0C"));
    }
}
