//! Diagnostic notice buffer.
//!
//! The engine does not log directly; it has no logger on the host tests and
//! a different one on each platform. Notable events (unknown commands,
//! dropped pools, staleness edges, alerts, screen changes) are pushed here as
//! short text lines instead. Platforms drain the buffer after each tick into
//! `defmt` or `log`.
//!
//! # Usage
//!
//! ```ignore
//! let mut log = DiagnosticLog::new();
//! log.push("stale: no UPDATE");
//! push_fmt!(log, "unknown command: {}", line);
//!
//! while let Some(line) = log.pop_oldest() {
//!     info!("{}", line.as_str());
//! }
//! ```

use core::fmt::{self, Write};

use heapless::{Deque, String};

// =============================================================================
// Configuration
// =============================================================================

/// Maximum number of notices kept. Older ones are dropped first.
pub const DIAG_BUFFER_SIZE: usize = 8;

/// Maximum bytes per notice; longer text is cut.
pub const DIAG_LINE_LENGTH: usize = 48;

/// One notice line.
pub type DiagLine = String<DIAG_LINE_LENGTH>;

// =============================================================================
// Ring Buffer
// =============================================================================

/// Ring buffer of recent diagnostic notices.
pub struct DiagnosticLog {
    buffer: Deque<DiagLine, DIAG_BUFFER_SIZE>,
    /// Notices discarded because the buffer was full.
    overwritten: u32,
}

impl DiagnosticLog {
    /// Create a new empty log.
    pub const fn new() -> Self {
        Self {
            buffer: Deque::new(),
            overwritten: 0,
        }
    }

    fn push_line(
        &mut self,
        line: DiagLine,
    ) {
        if self.buffer.is_full() {
            self.buffer.pop_front();
            self.overwritten = self.overwritten.saturating_add(1);
        }
        self.buffer.push_back(line).ok();
    }

    /// Push a notice. If the buffer is full, the oldest one is dropped.
    pub fn push(
        &mut self,
        msg: &str,
    ) {
        self.push_line(crate::telemetry::truncated(msg));
    }

    /// Push a formatted notice, cut at `DIAG_LINE_LENGTH`.
    pub fn push_fmt(
        &mut self,
        args: fmt::Arguments<'_>,
    ) {
        let mut writer = Truncating(DiagLine::new());
        writer.write_fmt(args).ok();
        self.push_line(writer.0);
    }

    /// Remove and return the oldest notice.
    pub fn pop_oldest(&mut self) -> Option<DiagLine> { self.buffer.pop_front() }

    /// Iterate over notices (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &str> { self.buffer.iter().map(heapless::string::StringInner::as_str) }

    #[inline]
    pub fn len(&self) -> usize { self.buffer.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.buffer.is_empty() }

    /// Total notices lost to overwriting since boot.
    #[inline]
    pub const fn overwritten(&self) -> u32 { self.overwritten }
}

impl Default for DiagnosticLog {
    fn default() -> Self { Self::new() }
}

/// `fmt::Write` adapter that keeps what fits and silently drops the rest.
struct Truncating(DiagLine);

impl Write for Truncating {
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

/// Push a `format_args!` notice into a [`DiagnosticLog`].
#[macro_export]
macro_rules! push_fmt {
    ($log:expr, $($arg:tt)*) => {
        $log.push_fmt(::core::format_args!($($arg)*))
    };
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_iter() {
        let mut log = DiagnosticLog::new();
        assert!(log.is_empty());

        log.push("first");
        log.push("second");
        assert_eq!(log.len(), 2);
        assert!(log.iter().eq(["first", "second"]));
    }

    #[test]
    fn test_ring_drops_oldest() {
        let mut log = DiagnosticLog::new();
        for i in 0..DIAG_BUFFER_SIZE + 2 {
            push_fmt!(log, "n{}", i);
        }
        assert_eq!(log.len(), DIAG_BUFFER_SIZE);
        assert_eq!(log.overwritten(), 2);
        assert_eq!(log.iter().next(), Some("n2"));
    }

    #[test]
    fn test_long_notice_is_cut() {
        let mut log = DiagnosticLog::new();
        let long = "x".repeat(100);
        push_fmt!(log, "unknown command: {}", long);
        log.push(&long);

        for line in log.iter() {
            assert_eq!(line.len(), DIAG_LINE_LENGTH);
        }
        assert!(log.iter().next().is_some_and(|l| l.starts_with("unknown command: ")));
    }

    #[test]
    fn test_pop_oldest_drains() {
        let mut log = DiagnosticLog::new();
        log.push("a");
        log.push("b");
        assert_eq!(log.pop_oldest().as_deref(), Some("a"));
        assert_eq!(log.pop_oldest().as_deref(), Some("b"));
        assert_eq!(log.pop_oldest(), None);
    }
}
