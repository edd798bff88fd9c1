//! NAS Monitor Firmware for Raspberry Pi Pico 2 (RP2350)
//!
//! Shows NAS telemetry received over UART on the Pimoroni PIM715 Display
//! Pack 2.8".
//!
//! # Architecture
//!
//! - UART RX task: assembles protocol lines and queues them
//! - Main task: runs one engine tick every 50 ms (one line, watchdog, alerts,
//!   buttons, redraw)
//!
//! # Button Controls
//!
//! - **A**: Previous screen
//! - **B**: Next screen
//!
//! # Wiring
//!
//! - UART0 TX/RX: GPIO0/GPIO1 (115200 8N1, only RX is used)
//! - Buzzer: GPIO22
//! - Display and buttons: PIM715 default pins

#![no_std]
#![no_main]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]

mod buzzer;
mod display;
mod uart;

use defmt::{debug, info, warn};
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::Pwm;
use embassy_rp::spi::Spi;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::{Instant, Timer};
use nasmon_common::{ButtonLevels, Monitor, MonitorConfig, StaleTransition, TICK_INTERVAL_MS, TickInput, TickReport};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use crate::buzzer::{Buzzer, buzzer_pwm_config};
use crate::display::{PanelCanvas, display_spi_config, init_display};
use crate::uart::{ChannelLines, uart_rx_task};

// Program metadata for `picotool info`
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"nasmon-pico2"),
    embassy_rp::binary_info::rp_program_description!(c"NAS telemetry monitor on PIM715 Display"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// UART ring buffers (must live forever)
static TX_BUF: StaticCell<[u8; 16]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 512]> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("NAS monitor starting...");

    let p = embassy_rp::init(Default::default());

    // RGB LED (active-low), kept off; flashes red once at start-up
    let mut led_r = Output::new(p.PIN_26, Level::High);
    let _led_g = Output::new(p.PIN_27, Level::High);
    let _led_b = Output::new(p.PIN_28, Level::High);
    led_r.set_low();
    Timer::after_millis(200).await;
    led_r.set_high();

    // Display: CS=17, DC=16, CLK=18, MOSI=19, Backlight=20
    let cs = Output::new(p.PIN_17, Level::High);
    let dc = Output::new(p.PIN_16, Level::Low);
    let _backlight = Output::new(p.PIN_20, Level::High);
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, display_spi_config());
    let mut canvas = PanelCanvas::new(init_display(spi, cs, dc));
    info!("Display initialized");

    // Buttons (active-low)
    let btn_a = Input::new(p.PIN_12, Pull::Up);
    let btn_b = Input::new(p.PIN_13, Pull::Up);

    let mut buzzer = Buzzer::new(Pwm::new_output_a(p.PWM_SLICE3, p.PIN_22, buzzer_pwm_config()));

    // Serial link: 115200 8N1 is the UART default
    let tx_buf = TX_BUF.init([0u8; 16]);
    let rx_buf = RX_BUF.init([0u8; 512]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, UartConfig::default());
    let (_tx, rx) = uart.into_buffered(Irqs, tx_buf, rx_buf).split();
    spawner.spawn(uart_rx_task(rx)).unwrap();
    info!("UART RX task spawned");

    let mut monitor = Monitor::new(MonitorConfig::default(), Instant::now().as_millis());
    if monitor.start(&mut canvas).is_err() {
        warn!("Failed to set display orientation");
    }
    let mut lines = ChannelLines;

    info!("Main loop starting");

    loop {
        let tick_start = Instant::now();

        let input = TickInput {
            now_ms: tick_start.as_millis(),
            buttons: ButtonLevels {
                previous_low: btn_a.is_low(),
                next_low: btn_b.is_low(),
            },
        };

        match monitor.tick(input, &mut lines, &mut buzzer, &mut canvas) {
            Ok(report) => log_report(&report, buzzer.played()),
            Err(failed) => {
                log_report(&failed.report, buzzer.played());
                warn!("Render failed, retrying next tick");
            }
        }

        while let Some(notice) = monitor.diagnostics_mut().pop_oldest() {
            debug!("{=str}", notice.as_str());
        }

        let elapsed = tick_start.elapsed().as_millis();
        Timer::after_millis(TICK_INTERVAL_MS.saturating_sub(elapsed)).await;
    }
}

fn log_report(
    report: &TickReport,
    alerts_played: u32,
) {
    if report.is_quiet() {
        return;
    }
    if let Some(applied) = report.command {
        if applied.is_unknown() {
            warn!("Unknown command ignored");
        } else {
            debug!("{} (changed: {})", applied.kind, applied.changed);
        }
        if applied.pool_dropped {
            warn!("Pool list full, record dropped");
        }
    }
    match report.stale {
        Some(StaleTransition::BecameStale) => warn!("No telemetry, showing NO DATA"),
        Some(StaleTransition::Recovered) => info!("Telemetry recovered"),
        None => {}
    }
    if report.alerts.any() {
        warn!("Alert #{}: {}", alerts_played, report.alerts);
    }
    if let Some(screen) = report.screen_changed {
        info!("Screen: {}", screen);
    }
}
