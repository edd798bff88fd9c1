//! Screen ring for the NAS monitor.
//!
//! # Screens
//!
//! - [`Screen::Main`]: system and drive temperatures with bars, storage health
//! - [`Screen::Network`]: MAC, IPv4 and IPv6 addresses
//! - [`Screen::Storage`]: storage pools with capacity, usage and state

/// Screens in navigation order.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    /// Temperatures and overall storage health.
    #[default]
    Main,

    /// Network identity of the NAS.
    Network,

    /// Up to four storage pools.
    Storage,
}

impl Screen {
    /// All screens in ring order.
    pub const ALL: [Self; 3] = [Self::Main, Self::Network, Self::Storage];

    /// Next screen (cycles: Main → Network → Storage → Main).
    #[inline]
    pub const fn next(self) -> Self {
        match self {
            Self::Main => Self::Network,
            Self::Network => Self::Storage,
            Self::Storage => Self::Main,
        }
    }

    /// Previous screen (cycles: Main → Storage → Network → Main).
    #[inline]
    pub const fn previous(self) -> Self {
        match self {
            Self::Main => Self::Storage,
            Self::Network => Self::Main,
            Self::Storage => Self::Network,
        }
    }

    /// Header title.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Main => "NAS MONITOR",
            Self::Network => "NETWORK",
            Self::Storage => "STORAGE",
        }
    }

    /// Position in the ring, 0-based.
    pub const fn index(self) -> usize {
        match self {
            Self::Main => 0,
            Self::Network => 1,
            Self::Storage => 2,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_default() {
        assert_eq!(Screen::default(), Screen::Main);
    }

    #[test]
    fn test_screen_next() {
        assert_eq!(Screen::Main.next(), Screen::Network);
        assert_eq!(Screen::Network.next(), Screen::Storage);
        assert_eq!(Screen::Storage.next(), Screen::Main);
    }

    #[test]
    fn test_screen_previous_wraps() {
        assert_eq!(Screen::Main.previous(), Screen::Storage);
        assert_eq!(Screen::Storage.previous(), Screen::Network);
        assert_eq!(Screen::Network.previous(), Screen::Main);
    }

    #[test]
    fn test_next_and_previous_are_inverse() {
        for screen in Screen::ALL {
            assert_eq!(screen.next().previous(), screen);
            assert_eq!(screen.previous().next(), screen);
        }
    }

    #[test]
    fn test_index_matches_ring_order() {
        for (i, screen) in Screen::ALL.iter().enumerate() {
            assert_eq!(screen.index(), i);
        }
    }
}
