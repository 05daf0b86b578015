//! Tallylog T3 firmware: three push-buttons, a DS3231 RTC, an SD card
//! log, and a piezo buzzer on an ESP32.
//!
//! Boot brings up the buzzer, the SD card, and the RTC in that order;
//! any failure is reported and the polling loop never starts. After a
//! successful boot every qualifying press appends one timestamped CSV
//! line to the card.

mod buzzer;
mod rtc;
mod sdcard;

use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::hal::gpio::{AnyInputPin, Input, PinDriver, Pull};
use esp_idf_svc::hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_svc::hal::ledc::{config::TimerConfig, LedcDriver, LedcTimerDriver, Resolution};
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::spi::{SpiDriver, SpiDriverConfig};
use esp_idf_svc::hal::units::Hertz;
use esp_idf_svc::sys;

use tallylog_core::{
    error_chime, poll_pass, startup_chime, Channel, EventRecorder, EventStore, Level,
};

use buzzer::Buzzer;
use rtc::RtcClock;
use sdcard::SdCardStore;

/// Fixed log path on the mounted card. The boot probe opens this same
/// file, so a card that mounts but cannot take the log fails loudly at
/// startup instead of on the first press.
const LOG_PATH: &str = "/sd/events.csv";

const POLL_PERIOD_MS: u32 = 10;

fn main() {
    sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    let peripherals = Peripherals::take().unwrap();
    let pins = peripherals.pins;

    // Buttons short to ground; internal pull-ups keep them HIGH idle.
    let mut buttons: [PinDriver<AnyInputPin, Input>; 3] = [
        PinDriver::input(pins.gpio25.downgrade_input()).unwrap(),
        PinDriver::input(pins.gpio26.downgrade_input()).unwrap(),
        PinDriver::input(pins.gpio27.downgrade_input()).unwrap(),
    ];
    for button in buttons.iter_mut() {
        button.set_pull(Pull::Up).unwrap();
    }

    // Buzzer first: the remaining bring-up reports failures on it.
    let ledc_timer = LedcTimerDriver::new(
        peripherals.ledc.timer0,
        &TimerConfig::default()
            .frequency(Hertz(2_000))
            .resolution(Resolution::Bits10),
    )
    .unwrap();
    let ledc = LedcDriver::new(peripherals.ledc.channel0, ledc_timer, pins.gpio4).unwrap();
    let mut sounder = Buzzer::new(ledc);

    // SD card on the HSPI pin set.
    let spi = SpiDriver::new(
        peripherals.spi2,
        pins.gpio14,
        pins.gpio13,
        Some(pins.gpio12),
        &SpiDriverConfig::default(),
    )
    .unwrap();
    let mut store = match SdCardStore::mount(&spi, pins.gpio15) {
        Ok(store) => store,
        Err(err) => {
            log::error!("SD card initialization failed!");
            log::debug!("mount error: {}", err);
            return;
        }
    };

    let i2c = I2cDriver::new(
        peripherals.i2c0,
        pins.gpio21,
        pins.gpio22,
        &I2cConfig::new().baudrate(Hertz(100_000)),
    )
    .unwrap();
    let clock = match RtcClock::new(i2c) {
        Ok(clock) => clock,
        Err(err) => {
            log::error!("DS3231 initialization failed!");
            log::debug!("probe error: {}", err);
            error_chime(&mut sounder);
            return;
        }
    };

    // The log file itself is the boot probe: open for append and close.
    match store.open_append(LOG_PATH) {
        Ok(handle) => {
            if let Err(err) = store.close(handle) {
                log::error!("Error initializing file!");
                log::debug!("close error: {}", err);
                error_chime(&mut sounder);
                return;
            }
            log::info!("File initialized successfully!");
        }
        Err(err) => {
            log::error!("Error initializing file!");
            log::debug!("open error: {}", err);
            error_chime(&mut sounder);
            return;
        }
    }

    startup_chime(&mut sounder);

    let mut channels: Vec<Channel> = (1..=buttons.len() as u8).map(Channel::new).collect();
    let mut levels = vec![Level::High; buttons.len()];
    let mut recorder = EventRecorder::new(clock, store, sounder, LOG_PATH);

    log::info!(
        "Logging presses on {} channels to {}",
        channels.len(),
        LOG_PATH
    );

    loop {
        for (level, button) in levels.iter_mut().zip(buttons.iter()) {
            *level = if button.is_low() {
                Level::Low
            } else {
                Level::High
            };
        }
        poll_pass(&mut channels, &levels, monotonic_ms(), &mut recorder);
        FreeRtos::delay_ms(POLL_PERIOD_MS);
    }
}

fn monotonic_ms() -> u64 {
    (unsafe { sys::esp_timer_get_time() } / 1_000) as u64
}
