//! Simulator inputs: protocol lines from stdin and buttons from the keyboard.
//!
//! Lines typed (or piped) into stdin stand in for the UART. A reader thread
//! forwards them over a channel; the tick takes at most one per call, like
//! the device does with its embassy channel.
//!
//! # Keys
//!
//! | Key | Action |
//! |-----|--------|
//! | `A` | "previous" button (held while the key is down) |
//! | `B` | "next" button |
//! | `U` | inject a nominal `UPDATE` |
//! | `H` | inject a hot, degraded `UPDATE` |
//! | `N` | inject a `NETWORK` line |
//! | `P` | inject `POOL:RESET` and three pools |

use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use embedded_graphics_simulator::sdl2::Keycode;
use log::{debug, info, warn};
use nasmon_common::config::LINE_CAPACITY;
use nasmon_common::{ButtonLevels, Line, LineSource};

// =============================================================================
// Line Source
// =============================================================================

const DEMO_NOMINAL: &[&str] = &["UPDATE:45.2,38.1,42.5,39.8,41.2,43.6,Healthy"];
const DEMO_HOT: &[&str] = &["UPDATE:55.1,48.3,52.8,46.7,49.2,51.4,Problem"];
const DEMO_NETWORK: &[&str] = &["NETWORK:00:11:32:ab:cd:ef,192.168.1.20,fe80::211:32ff:feab:cdef"];
const DEMO_POOLS: &[&str] = &[
    "POOL:RESET",
    "POOL:tank,7.3T,42%,Healthy",
    "POOL:backup,3.6T,80%,Degraded",
    "POOL:media,10T,12%,Healthy",
];

/// Stdin lines plus lines injected from the keyboard.
pub struct SimulatorLines {
    stdin: Option<Receiver<Line>>,
    injected: VecDeque<Line>,
}

impl SimulatorLines {
    /// Start the stdin reader thread.
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        warn!("stdin: {e}");
                        break;
                    }
                };
                let Ok(line) = Line::try_from(line.as_str()) else {
                    warn!("line longer than {LINE_CAPACITY} bytes dropped");
                    continue;
                };
                if tx.send(line).is_err() {
                    break;
                }
            }
            debug!("stdin closed");
        });
        Self {
            stdin: Some(rx),
            injected: VecDeque::new(),
        }
    }

    fn inject(
        &mut self,
        lines: &[&str],
    ) {
        info!("injecting {} line(s)", lines.len());
        self.injected.extend(lines.iter().filter_map(|l| Line::try_from(*l).ok()));
    }
}

impl LineSource for SimulatorLines {
    fn try_read_line(&mut self) -> Option<Line> {
        if let Some(line) = self.injected.pop_front() {
            return Some(line);
        }
        let rx = self.stdin.as_ref()?;
        match rx.try_recv() {
            Ok(line) => Some(line),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.stdin = None;
                None
            }
        }
    }
}

// =============================================================================
// Keyboard
// =============================================================================

/// Keyboard state mapped onto the two navigation buttons.
#[derive(Default)]
pub struct Keys {
    previous_held: bool,
    next_held: bool,
}

impl Keys {
    /// Current levels as the navigator expects them (held = low).
    pub const fn levels(&self) -> ButtonLevels {
        ButtonLevels {
            previous_low: self.previous_held,
            next_low: self.next_held,
        }
    }

    /// Handle a key press. Repeats from a held key are ignored by the caller.
    pub fn key_down(
        &mut self,
        keycode: Keycode,
        lines: &mut SimulatorLines,
    ) {
        match keycode {
            Keycode::A => self.previous_held = true,
            Keycode::B => self.next_held = true,
            Keycode::U => lines.inject(DEMO_NOMINAL),
            Keycode::H => lines.inject(DEMO_HOT),
            Keycode::N => lines.inject(DEMO_NETWORK),
            Keycode::P => lines.inject(DEMO_POOLS),
            _ => {}
        }
    }

    pub fn key_up(
        &mut self,
        keycode: Keycode,
    ) {
        match keycode {
            Keycode::A => self.previous_held = false,
            Keycode::B => self.next_held = false,
            _ => {}
        }
    }
}
