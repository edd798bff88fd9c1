//! Terminal bell stand-in for the buzzer.

use std::io::{self, Write};
use std::thread;

use log::warn;
use nasmon_common::AlertSink;

use crate::timing::{BELL_GAP, BELL_RINGS};

/// Rings the terminal bell three times per alert, blocking like the buzzer.
#[derive(Default)]
pub struct BellAlert {
    played: u32,
}

impl BellAlert {
    /// Patterns played since start.
    pub const fn played(&self) -> u32 { self.played }
}

impl AlertSink for BellAlert {
    fn play_alert_pattern(&mut self) {
        self.played = self.played.wrapping_add(1);
        warn!("ALERT #{}", self.played);

        let mut out = io::stderr().lock();
        for i in 0..BELL_RINGS {
            out.write_all(b"\x07").ok();
            out.flush().ok();
            if i + 1 < BELL_RINGS {
                thread::sleep(BELL_GAP);
            }
        }
    }
}
