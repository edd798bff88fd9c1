//! Button edge detection and screen navigation.
//!
//! Buttons are active-low and polled once per tick. A press is the sample
//! where the pin reads low after reading high on the previous tick. Presses
//! are debounced with a single window shared by every button: once any press
//! is accepted, all presses within `debounce_ms` are ignored.
//!
//! Levels are recorded on every sample whether or not the press is accepted,
//! so a press that starts and ends between two ticks is never seen.

use crate::config::DEBOUNCE_MS;
use crate::pages::Screen;

// =============================================================================
// Edge Detection
// =============================================================================

/// High-to-low edge detector for one active-low input.
#[derive(Clone, Copy, Debug, Default)]
pub struct ButtonEdge {
    was_low: bool,
}

impl ButtonEdge {
    /// Create a detector that assumes the button is released.
    pub const fn new() -> Self { Self { was_low: false } }

    /// Record a sample. Returns true only on the falling edge (button just pressed).
    pub fn sample(
        &mut self,
        is_low: bool,
    ) -> bool {
        let pressed = is_low && !self.was_low;
        self.was_low = is_low;
        pressed
    }

    /// Level seen on the last sample.
    #[inline]
    pub const fn is_low(&self) -> bool { self.was_low }
}

/// Raw pin levels for one tick. `true` means the pin reads low (pressed).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonLevels {
    pub previous_low: bool,
    pub next_low: bool,
}

impl ButtonLevels {
    /// No button held.
    pub const RELEASED: Self = Self {
        previous_low: false,
        next_low: false,
    };

    pub const fn previous() -> Self {
        Self {
            previous_low: true,
            next_low: false,
        }
    }

    pub const fn next() -> Self {
        Self {
            previous_low: false,
            next_low: true,
        }
    }
}

// =============================================================================
// Navigator
// =============================================================================

/// Screen navigation state driven by the previous/next buttons.
#[derive(Clone, Copy, Debug)]
pub struct Navigator {
    current: Screen,
    previous: ButtonEdge,
    next: ButtonEdge,
    last_accept_ms: Option<u64>,
    debounce_ms: u64,
}

impl Navigator {
    pub const fn new(debounce_ms: u64) -> Self {
        Self {
            current: Screen::Main,
            previous: ButtonEdge::new(),
            next: ButtonEdge::new(),
            last_accept_ms: None,
            debounce_ms,
        }
    }

    /// Screen currently shown.
    #[inline]
    pub const fn current(&self) -> Screen { self.current }

    /// Time of the last accepted press, if any.
    #[inline]
    pub const fn last_accept_ms(&self) -> Option<u64> { self.last_accept_ms }

    fn debounce_elapsed(
        &self,
        now_ms: u64,
    ) -> bool {
        match self.last_accept_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.debounce_ms,
        }
    }

    fn accept(
        &mut self,
        screen: Screen,
        now_ms: u64,
    ) -> Option<Screen> {
        self.current = screen;
        self.last_accept_ms = Some(now_ms);
        Some(screen)
    }

    /// Sample both buttons. Returns the new screen when a press is accepted.
    ///
    /// "Previous" is evaluated first; if both buttons go down on the same
    /// sample, the debounce window it opens swallows "next".
    pub fn update(
        &mut self,
        levels: ButtonLevels,
        now_ms: u64,
    ) -> Option<Screen> {
        let previous_pressed = self.previous.sample(levels.previous_low);
        let next_pressed = self.next.sample(levels.next_low);

        if previous_pressed && self.debounce_elapsed(now_ms) {
            return self.accept(self.current.previous(), now_ms);
        }
        if next_pressed && self.debounce_elapsed(now_ms) {
            return self.accept(self.current.next(), now_ms);
        }
        None
    }
}

impl Default for Navigator {
    fn default() -> Self { Self::new(DEBOUNCE_MS) }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Press and release `levels` at `at_ms`, releasing one tick later.
    fn tap(
        nav: &mut Navigator,
        levels: ButtonLevels,
        at_ms: u64,
    ) -> Option<Screen> {
        let result = nav.update(levels, at_ms);
        nav.update(ButtonLevels::RELEASED, at_ms + 50);
        result
    }

    #[test]
    fn test_edge_only_on_press() {
        let mut edge = ButtonEdge::new();
        assert!(!edge.sample(false));
        assert!(edge.sample(true));
        assert!(!edge.sample(true), "holding is not a new press");
        assert!(!edge.sample(false));
        assert!(edge.sample(true));
    }

    #[test]
    fn test_next_cycles_and_wraps() {
        let mut nav = Navigator::default();
        assert_eq!(tap(&mut nav, ButtonLevels::next(), 1_000), Some(Screen::Network));
        assert_eq!(tap(&mut nav, ButtonLevels::next(), 2_000), Some(Screen::Storage));
        assert_eq!(tap(&mut nav, ButtonLevels::next(), 3_000), Some(Screen::Main));
    }

    #[test]
    fn test_previous_cycles_and_wraps() {
        let mut nav = Navigator::default();
        assert_eq!(tap(&mut nav, ButtonLevels::previous(), 1_000), Some(Screen::Storage));
        assert_eq!(tap(&mut nav, ButtonLevels::previous(), 2_000), Some(Screen::Network));
        assert_eq!(tap(&mut nav, ButtonLevels::previous(), 3_000), Some(Screen::Main));
    }

    #[test]
    fn test_debounce_is_global() {
        let mut nav = Navigator::default();
        assert_eq!(tap(&mut nav, ButtonLevels::next(), 1_000), Some(Screen::Network));

        // the other button inside the window is suppressed
        assert_eq!(tap(&mut nav, ButtonLevels::previous(), 1_100), None);
        assert_eq!(nav.current(), Screen::Network);

        // exactly the window later is accepted
        assert_eq!(tap(&mut nav, ButtonLevels::previous(), 1_200), Some(Screen::Main));
    }

    #[test]
    fn test_suppressed_press_is_consumed() {
        let mut nav = Navigator::default();
        nav.update(ButtonLevels::next(), 1_000);
        nav.update(ButtonLevels::RELEASED, 1_050);

        // pressed inside the window and held past it: never accepted
        assert_eq!(nav.update(ButtonLevels::next(), 1_100), None);
        assert_eq!(nav.update(ButtonLevels::next(), 1_300), None);
        assert_eq!(nav.current(), Screen::Network);
    }

    #[test]
    fn test_both_pressed_previous_wins() {
        let mut nav = Navigator::default();
        let both = ButtonLevels {
            previous_low: true,
            next_low: true,
        };
        assert_eq!(nav.update(both, 500), Some(Screen::Storage));
        assert_eq!(nav.last_accept_ms(), Some(500));
    }

    #[test]
    fn test_first_press_at_time_zero() {
        let mut nav = Navigator::default();
        assert_eq!(nav.update(ButtonLevels::next(), 0), Some(Screen::Network));
    }
}
