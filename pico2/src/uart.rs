//! Serial line input from the NAS collector.
//!
//! UART0 on GPIO0/GPIO1 at 115200 8N1. The receive task assembles lines and
//! queues them; the main loop drains at most one per tick through
//! [`ChannelLines`]. When the queue is full the task waits and the UART ring
//! buffer holds the backlog.

use defmt::{debug, trace, warn};
use embassy_rp::uart::BufferedUartRx;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embedded_io_async::Read;
use nasmon_common::{Line, LineBuffer, LineSource};

/// Lines waiting for the main loop.
pub const LINE_QUEUE_DEPTH: usize = 4;

/// Bytes read from the UART ring buffer per call.
const RX_CHUNK: usize = 32;

/// Completed lines from the receive task.
pub static LINE_CHANNEL: Channel<CriticalSectionRawMutex, Line, LINE_QUEUE_DEPTH> = Channel::new();

/// UART receive task: bytes in, whole lines out.
#[embassy_executor::task]
pub async fn uart_rx_task(mut rx: BufferedUartRx) {
    debug!("UART RX task started");

    let mut lines: LineBuffer = LineBuffer::new();
    let mut reported_drops = 0;
    let mut buf = [0u8; RX_CHUNK];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) => {
                trace!("RX: {} bytes", n);
                for &byte in &buf[..n] {
                    if let Some(line) = lines.feed(byte) {
                        LINE_CHANNEL.send(line).await;
                    }
                }
            }
            Err(e) => warn!("UART read error: {:?}", e),
        }

        if lines.dropped_lines() != reported_drops {
            reported_drops = lines.dropped_lines();
            warn!("{} oversized or invalid line(s) dropped", reported_drops);
        }
    }
}

/// [`LineSource`] over [`LINE_CHANNEL`].
pub struct ChannelLines;

impl LineSource for ChannelLines {
    fn try_read_line(&mut self) -> Option<Line> { LINE_CHANNEL.try_receive().ok() }
}
