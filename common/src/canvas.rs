//! Abstract drawing surface for the render dispatcher.
//!
//! Screens only ever fill rectangles and place text, so the capability they
//! need is small: [`Canvas`]. Any `embedded-graphics` [`DrawTarget`] over
//! `Rgb565` becomes a canvas through [`DrawTargetCanvas`], which is what both
//! the simulator window and the ST7789 framebuffer use.

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::Text,
};

use crate::styles::{TOP_LEFT, font_for};

// =============================================================================
// Text Size / Orientation
// =============================================================================

/// Relative text size. Backends map it to a concrete font.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextSize {
    /// Labels and secondary text.
    Small,
    /// Titles and values.
    Medium,
    /// Large values.
    Large,
}

/// Display orientation requested once at start-up.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Orientation {
    /// 320x240, connector on the left.
    #[default]
    Landscape,
    /// 320x240, rotated 180 degrees.
    LandscapeFlipped,
    /// 240x320.
    Portrait,
    /// 240x320, rotated 180 degrees.
    PortraitFlipped,
}

impl Orientation {
    /// Check if the long edge is horizontal.
    #[inline]
    pub const fn is_landscape(self) -> bool { matches!(self, Self::Landscape | Self::LandscapeFlipped) }
}

// =============================================================================
// Canvas Trait
// =============================================================================

/// Rendering capability used by every screen.
///
/// Coordinates are in pixels from the top-left corner. Text is anchored at the
/// top-left of its first glyph.
pub trait Canvas {
    /// Error reported by the underlying display.
    type Error;

    /// Fill an axis-aligned rectangle.
    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        w: u32,
        h: u32,
        color: Rgb565,
    ) -> Result<(), Self::Error>;

    /// Draw a single line of text.
    fn draw_text(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        color: Rgb565,
        size: TextSize,
    ) -> Result<(), Self::Error>;

    /// Apply a display orientation.
    fn set_orientation(
        &mut self,
        orientation: Orientation,
    ) -> Result<(), Self::Error>;
}

// =============================================================================
// DrawTarget Adapter
// =============================================================================

/// Fill a rectangle on any `Rgb565` draw target.
pub fn fill_rect_on<D>(
    display: &mut D,
    x: i32,
    y: i32,
    w: u32,
    h: u32,
    color: Rgb565,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    if w == 0 || h == 0 {
        return Ok(());
    }
    Rectangle::new(Point::new(x, y), Size::new(w, h))
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(display)
}

/// Draw top-left anchored text on any `Rgb565` draw target.
pub fn draw_text_on<D>(
    display: &mut D,
    x: i32,
    y: i32,
    text: &str,
    color: Rgb565,
    size: TextSize,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let style = MonoTextStyle::new(font_for(size), color);
    Text::with_text_style(text, Point::new(x, y), style, TOP_LEFT)
        .draw(display)
        .map(|_| ())
}

/// [`Canvas`] over an `embedded-graphics` draw target.
///
/// Draw targets have no notion of orientation, so the requested value is only
/// recorded; the platform reads it back with [`DrawTargetCanvas::orientation`]
/// and configures the panel (or window) accordingly.
pub struct DrawTargetCanvas<D> {
    target: D,
    orientation: Orientation,
}

impl<D> DrawTargetCanvas<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: D) -> Self {
        Self {
            target,
            orientation: Orientation::default(),
        }
    }

    /// Last orientation requested through [`Canvas::set_orientation`].
    #[inline]
    pub fn orientation(&self) -> Orientation { self.orientation }

    pub fn target(&self) -> &D { &self.target }
}

impl<D> Canvas for DrawTargetCanvas<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    type Error = D::Error;

    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        w: u32,
        h: u32,
        color: Rgb565,
    ) -> Result<(), Self::Error> {
        fill_rect_on(&mut self.target, x, y, w, h, color)
    }

    fn draw_text(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        color: Rgb565,
        size: TextSize,
    ) -> Result<(), Self::Error> {
        draw_text_on(&mut self.target, x, y, text, color, size)
    }

    fn set_orientation(
        &mut self,
        orientation: Orientation,
    ) -> Result<(), Self::Error> {
        self.orientation = orientation;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_graphics::mock_display::MockDisplay;

    use super::*;
    use crate::colors::{BLACK, RED, WHITE};

    #[test]
    fn test_fill_rect_paints_exact_area() {
        let mut canvas = DrawTargetCanvas::new(MockDisplay::<Rgb565>::new());
        canvas.fill_rect(2, 3, 4, 2, RED).unwrap();

        let display = canvas.target();
        assert_eq!(display.get_pixel(Point::new(2, 3)), Some(RED));
        assert_eq!(display.get_pixel(Point::new(5, 4)), Some(RED));
        assert_eq!(display.get_pixel(Point::new(6, 4)), None);
        assert_eq!(display.get_pixel(Point::new(2, 5)), None);
    }

    #[test]
    fn test_zero_sized_rect_is_noop() {
        let mut canvas = DrawTargetCanvas::new(MockDisplay::<Rgb565>::new());
        canvas.fill_rect(0, 0, 0, 10, RED).unwrap();
        assert_eq!(canvas.target().affected_area().size, Size::zero());
    }

    #[test]
    fn test_text_is_top_anchored() {
        let mut display = MockDisplay::<Rgb565>::new();
        display.set_allow_overdraw(true);
        let mut canvas = DrawTargetCanvas::new(display);
        canvas.fill_rect(0, 0, 30, 12, BLACK).unwrap();
        canvas.draw_text(0, 0, "H", WHITE, TextSize::Small).unwrap();

        let display = canvas.target();
        let mut lit = (0..10).flat_map(|y| (0..6).map(move |x| Point::new(x, y)));
        assert!(
            lit.any(|p| display.get_pixel(p) == Some(WHITE)),
            "glyph lands inside the first text row"
        );
        assert!(
            (10..12).all(|y| (0..30).all(|x| display.get_pixel(Point::new(x, y)) != Some(WHITE))),
            "nothing below the 6x10 cell"
        );
    }

    #[test]
    fn test_orientation_is_recorded() {
        let mut canvas = DrawTargetCanvas::new(MockDisplay::<Rgb565>::new());
        assert_eq!(canvas.orientation(), Orientation::Landscape);
        canvas.set_orientation(Orientation::PortraitFlipped).unwrap();
        assert_eq!(canvas.orientation(), Orientation::PortraitFlipped);
        assert!(!canvas.orientation().is_landscape());
    }
}
