//! Byte-to-line assembly for the serial link.
//!
//! The UART delivers bytes; the decoder wants whole lines. [`LineBuffer`]
//! collects bytes until `\n`, drops `\r`, and hands out the finished line as a
//! fixed-capacity string. Lines that overflow the buffer or are not valid
//! UTF-8 are discarded whole, never delivered in pieces.

use heapless::{String, Vec};

use crate::config::LINE_CAPACITY;

/// A complete protocol line.
pub type Line = String<LINE_CAPACITY>;

/// Non-blocking source of protocol lines, polled once per tick.
pub trait LineSource {
    /// Next complete line if one is waiting, without blocking.
    fn try_read_line(&mut self) -> Option<Line>;
}

/// Line assembler with capacity `N` bytes (excluding the terminator).
pub struct LineBuffer<const N: usize = LINE_CAPACITY> {
    buf: Vec<u8, N>,
    /// Current line overflowed; discard until the next `\n`.
    overflowed: bool,
    dropped: u32,
}

impl<const N: usize> LineBuffer<N> {
    pub const fn new() -> Self {
        Self {
            buf: Vec::new(),
            overflowed: false,
            dropped: 0,
        }
    }

    /// Feed one byte. Returns a line when `byte` completes one.
    ///
    /// Empty lines are swallowed.
    pub fn feed(
        &mut self,
        byte: u8,
    ) -> Option<String<N>> {
        match byte {
            b'\r' => None,
            b'\n' => self.finish(),
            _ => {
                if !self.overflowed && self.buf.push(byte).is_err() {
                    self.overflowed = true;
                    self.buf.clear();
                }
                None
            }
        }
    }

    fn finish(&mut self) -> Option<String<N>> {
        if self.overflowed {
            self.overflowed = false;
            self.dropped = self.dropped.saturating_add(1);
            return None;
        }
        if self.buf.is_empty() {
            return None;
        }
        let bytes = core::mem::take(&mut self.buf);
        match String::from_utf8(bytes) {
            Ok(line) => Some(line),
            Err(_) => {
                self.dropped = self.dropped.saturating_add(1);
                None
            }
        }
    }

    /// Lines discarded (overflow or invalid UTF-8) since creation.
    #[inline]
    pub const fn dropped_lines(&self) -> u32 { self.dropped }
}

impl<const N: usize> Default for LineBuffer<N> {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect<const N: usize>(
        lb: &mut LineBuffer<N>,
        input: &[u8],
    ) -> std::vec::Vec<std::string::String> {
        input
            .iter()
            .filter_map(|&byte| lb.feed(byte))
            .map(|line| line.as_str().into())
            .collect()
    }

    #[test]
    fn test_splits_on_newline_and_drops_cr() {
        let mut lb = LineBuffer::<LINE_CAPACITY>::new();
        let lines = collect(&mut lb, b"POOL:RESET\r\nUPDATE:1,2\n");
        assert_eq!(lines, ["POOL:RESET", "UPDATE:1,2"]);
        assert_eq!(lb.buf.len(), 0);
    }

    #[test]
    fn test_partial_line_waits() {
        let mut lb = LineBuffer::<LINE_CAPACITY>::new();
        assert!(collect(&mut lb, b"NETWORK:aa").is_empty());
        assert_eq!(lb.buf.len(), 10);
        assert_eq!(collect(&mut lb, b",bb\n"), ["NETWORK:aa,bb"]);
    }

    #[test]
    fn test_overflow_discards_whole_line() {
        let mut lb = LineBuffer::<8>::new();
        let lines = collect(&mut lb, b"0123456789\nshort\n");
        assert_eq!(lines, ["short"], "no tail fragment of the long line");
        assert_eq!(lb.dropped_lines(), 1);
    }

    #[test]
    fn test_exact_capacity_fits() {
        let mut lb = LineBuffer::<8>::new();
        assert_eq!(collect(&mut lb, b"01234567\n"), ["01234567"]);
        assert_eq!(lb.dropped_lines(), 0);
    }

    #[test]
    fn test_invalid_utf8_dropped() {
        let mut lb = LineBuffer::<LINE_CAPACITY>::new();
        let lines = collect(&mut lb, b"\xff\xfe\nok\n");
        assert_eq!(lines, ["ok"]);
        assert_eq!(lb.dropped_lines(), 1);
    }

    #[test]
    fn test_empty_lines_swallowed() {
        let mut lb = LineBuffer::<LINE_CAPACITY>::new();
        assert!(collect(&mut lb, b"\n\r\n\n").is_empty());
        assert_eq!(lb.dropped_lines(), 0);
    }
}
