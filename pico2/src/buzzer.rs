//! Piezo buzzer on GPIO22 (PWM slice 3, channel A).
//!
//! An alert is three 1 kHz beeps of 150 ms with 100 ms gaps. The pattern
//! blocks the caller for its whole length; telemetry bytes keep arriving in
//! the UART buffer meanwhile.

use defmt::warn;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_time::{Duration, block_for};
use embedded_hal::pwm::SetDutyCycle;
use nasmon_common::AlertSink;

/// 150 MHz / 125 = 1.2 MHz PWM counter clock.
const CLOCK_DIVIDER: u8 = 125;
/// Counter wraps at 1200 ticks: 1 kHz tone.
const TOP: u16 = 1199;

const BEEPS: u32 = 3;
const BEEP: Duration = Duration::from_millis(150);
const GAP: Duration = Duration::from_millis(100);

/// Config for a silent 1 kHz square wave.
pub fn buzzer_pwm_config() -> PwmConfig {
    let mut config = PwmConfig::default();
    config.divider = CLOCK_DIVIDER.into();
    config.top = TOP;
    config.compare_a = 0;
    config
}

pub struct Buzzer<'d> {
    pwm: Pwm<'d>,
    played: u32,
}

impl<'d> Buzzer<'d> {
    pub fn new(pwm: Pwm<'d>) -> Self { Self { pwm, played: 0 } }

    /// Patterns played since boot.
    pub const fn played(&self) -> u32 { self.played }

    fn tone(
        &mut self,
        on: bool,
    ) {
        let result = if on {
            self.pwm.set_duty_cycle_percent(50)
        } else {
            self.pwm.set_duty_cycle_fully_off()
        };
        if result.is_err() {
            warn!("buzzer PWM update failed");
        }
    }
}

impl AlertSink for Buzzer<'_> {
    fn play_alert_pattern(&mut self) {
        self.played = self.played.wrapping_add(1);

        for i in 0..BEEPS {
            self.tone(true);
            block_for(BEEP);
            self.tone(false);
            if i + 1 < BEEPS {
                block_for(GAP);
            }
        }
    }
}
