//! Fonts and text alignment shared by every screen.
//!
//! Text is drawn through the [`Canvas`](crate::canvas::Canvas) trait with a
//! [`TextSize`] rather than a concrete style, so backends that are not
//! `embedded-graphics` targets can pick their own glyphs. The mapping below is
//! what [`DrawTargetCanvas`](crate::canvas::DrawTargetCanvas) uses.

use embedded_graphics::{
    mono_font::{
        MonoFont,
        ascii::{FONT_6X10, FONT_10X20},
    },
    text::{Alignment, Baseline, TextStyle, TextStyleBuilder},
};
use profont::PROFONT_24_POINT;

use crate::canvas::TextSize;

// =============================================================================
// Text Layout (const - zero runtime cost)
// =============================================================================

/// Left-aligned text anchored at its top-left corner. All canvas text uses it,
/// so `(x, y)` passed to `draw_text` is the top-left of the glyph box.
pub const TOP_LEFT: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Top)
    .build();

// =============================================================================
// Fonts
// =============================================================================

/// Small label font (6x10 pixels).
pub const SMALL_FONT: &MonoFont = &FONT_6X10;

/// Medium font for titles and values (10x20 pixels).
pub const MEDIUM_FONT: &MonoFont = &FONT_10X20;

/// Large font for full-body notices.
pub const LARGE_FONT: &MonoFont = &PROFONT_24_POINT;

/// Font backing a [`TextSize`].
#[inline]
pub const fn font_for(size: TextSize) -> &'static MonoFont<'static> {
    match size {
        TextSize::Small => SMALL_FONT,
        TextSize::Medium => MEDIUM_FONT,
        TextSize::Large => LARGE_FONT,
    }
}

/// Rendered width of `text` in pixels.
pub fn text_width(
    text: &str,
    size: TextSize,
) -> u32 {
    let font = font_for(size);
    let chars = text.chars().count() as u32;
    if chars == 0 {
        return 0;
    }
    chars * font.character_size.width + (chars - 1) * font.character_spacing
}

/// Rendered line height of `size` in pixels.
#[inline]
pub const fn line_height(size: TextSize) -> u32 { font_for(size).character_size.height }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width_small() {
        assert_eq!(text_width("", TextSize::Small), 0);
        assert_eq!(text_width("SYS", TextSize::Small), 18);
    }

    #[test]
    fn test_sizes_grow() {
        assert!(line_height(TextSize::Small) < line_height(TextSize::Medium));
        assert!(line_height(TextSize::Medium) < line_height(TextSize::Large));
    }
}
