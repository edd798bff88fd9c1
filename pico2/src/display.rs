//! Display driver for Pimoroni PIM715 Display Pack 2.8" (ST7789).
//!
//! Pin mapping for PIM715:
//! - CS: GPIO17
//! - DC: GPIO16
//! - CLK: GPIO18 (SPI0 CLK)
//! - MOSI: GPIO19 (SPI0 TX)
//! - Backlight: GPIO20
//! - Reset: Tied to RUN pin (resets with Pico)

use display_interface_spi::SPIInterface;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Config as SpiConfig, Spi};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::DrawTarget;
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use mipidsi::models::ST7789;
use mipidsi::options::{ColorInversion, Orientation as PanelOrientation, Rotation};
use mipidsi::{Builder, NoResetPin};
use nasmon_common::canvas::{draw_text_on, fill_rect_on};
use nasmon_common::{Canvas, Orientation, TextSize};

/// Display type alias for the ST7789 on PIM715 (no reset pin).
pub type Pim715Display<'d> = mipidsi::Display<
    SPIInterface<ExclusiveDevice<Spi<'d, SPI0, Blocking>, Output<'d>, NoDelay>, Output<'d>>,
    ST7789,
    NoResetPin,
>;

/// Error reported by the panel driver.
pub type DisplayError<'d> = <Pim715Display<'d> as DrawTarget>::Error;

/// Initialize the PIM715 display.
///
/// The panel starts in landscape; [`Canvas::set_orientation`] changes it later.
pub fn init_display<'d>(
    spi: Spi<'d, SPI0, Blocking>,
    cs: Output<'d>,
    dc: Output<'d>,
) -> Pim715Display<'d> {
    let spi_device = ExclusiveDevice::new_no_delay(spi, cs).unwrap();
    let di = SPIInterface::new(spi_device, dc);

    // Native panel is 240x320 (portrait)
    Builder::new(ST7789, di)
        .display_size(240, 320)
        .orientation(panel_orientation(Orientation::Landscape))
        .invert_colors(ColorInversion::Inverted)
        .init(&mut embassy_time::Delay)
        .unwrap()
}

/// SPI configuration for the ST7789 display.
///
/// The ST7789 supports up to 62.5MHz SPI clock.
/// We use 40MHz for reliable operation.
pub fn display_spi_config() -> SpiConfig {
    let mut config = SpiConfig::default();
    config.frequency = 40_000_000;
    config
}

/// Panel rotation for a requested orientation.
fn panel_orientation(orientation: Orientation) -> PanelOrientation {
    let rotation = match orientation {
        Orientation::Landscape => Rotation::Deg90,
        Orientation::LandscapeFlipped => Rotation::Deg270,
        Orientation::Portrait => Rotation::Deg0,
        Orientation::PortraitFlipped => Rotation::Deg180,
    };
    PanelOrientation::new().rotate(rotation)
}

// =============================================================================
// Canvas
// =============================================================================

/// [`Canvas`] drawing straight to the panel over SPI.
///
/// Unlike a plain draw target the panel can rotate itself, so orientation
/// changes go to the controller's MADCTL register.
pub struct PanelCanvas<'d> {
    display: Pim715Display<'d>,
}

impl<'d> PanelCanvas<'d> {
    pub fn new(display: Pim715Display<'d>) -> Self { Self { display } }
}

impl<'d> Canvas for PanelCanvas<'d> {
    type Error = DisplayError<'d>;

    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        w: u32,
        h: u32,
        color: Rgb565,
    ) -> Result<(), Self::Error> {
        fill_rect_on(&mut self.display, x, y, w, h, color)
    }

    fn draw_text(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        color: Rgb565,
        size: TextSize,
    ) -> Result<(), Self::Error> {
        draw_text_on(&mut self.display, x, y, text, color, size)
    }

    fn set_orientation(
        &mut self,
        orientation: Orientation,
    ) -> Result<(), Self::Error> {
        self.display.set_orientation(panel_orientation(orientation))
    }
}
