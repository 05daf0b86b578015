//! Piezo buzzer driven by the LEDC peripheral at 50 % duty.

use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::hal::ledc::LedcDriver;
use esp_idf_svc::sys;

use tallylog_core::Sounder;

pub struct Buzzer<'d> {
    channel: LedcDriver<'d>,
}

impl<'d> Buzzer<'d> {
    /// Takes a LEDC channel already bound to the buzzer pin on timer 0.
    pub fn new(channel: LedcDriver<'d>) -> Self {
        Self { channel }
    }
}

impl Sounder for Buzzer<'_> {
    fn tone(&mut self, freq_hz: u32, duration_ms: u32) {
        unsafe {
            sys::ledc_set_freq(
                sys::ledc_mode_t_LEDC_LOW_SPEED_MODE,
                sys::ledc_timer_t_LEDC_TIMER_0,
                freq_hz,
            );
        }
        let half_duty = self.channel.get_max_duty() / 2;
        self.channel.set_duty(half_duty).ok();
        FreeRtos::delay_ms(duration_ms);
        self.channel.set_duty(0).ok();
    }
}
