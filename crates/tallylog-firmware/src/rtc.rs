//! DS3231 wiring: adapts the driver crate to the core `Clock` trait.

use ds3231::Ds3231;
use esp_idf_svc::hal::i2c::I2cDriver;

use tallylog_core::{Clock, ClockError, Timestamp};

pub struct RtcClock<'d> {
    rtc: Ds3231<I2cDriver<'d>>,
}

impl<'d> RtcClock<'d> {
    /// Probe the chip on the bus; fails when it does not answer.
    pub fn new(i2c: I2cDriver<'d>) -> Result<Self, ClockError> {
        let mut rtc = Ds3231::new(i2c);
        rtc.probe().map_err(|_| ClockError::NotResponding)?;

        if let Ok(true) = rtc.lost_power() {
            // Still usable, but the operator should reset the clock.
            log::warn!("DS3231 lost power; timestamps run from a stale clock");
        }

        Ok(Self { rtc })
    }
}

impl Clock for RtcClock<'_> {
    fn now(&mut self) -> Result<Timestamp, ClockError> {
        let datetime = self
            .rtc
            .datetime()
            .map_err(|err| ClockError::Bus(err.to_string()))?;
        Ok(Timestamp {
            year: datetime.year,
            month: datetime.month,
            day: datetime.day,
            hour: datetime.hour,
            minute: datetime.minute,
            second: datetime.second,
        })
    }
}
