//! Record-and-acknowledge protocol for a qualifying press.

use core::fmt;

use crate::clock::{Clock, ClockError};
use crate::sounder::{confirm_tone, error_chime, Sounder};
use crate::store::{EventStore, StoreError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    Clock(ClockError),
    Store(StoreError),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::Clock(err) => write!(f, "timestamp unavailable: {}", err),
            RecordError::Store(err) => write!(f, "log append failed: {}", err),
        }
    }
}

impl std::error::Error for RecordError {}

impl From<ClockError> for RecordError {
    fn from(err: ClockError) -> Self {
        RecordError::Clock(err)
    }
}

impl From<StoreError> for RecordError {
    fn from(err: StoreError) -> Self {
        RecordError::Store(err)
    }
}

/// Orchestrates one event: timestamp, durable write, console echo, and
/// audible acknowledgement.
///
/// Every write is a full `open_append` -> `write_line` -> `close` cycle.
/// A failure drops the event (no retry, no queue), reports it once, and
/// plays the error chime; the caller's polling continues afterwards.
pub struct EventRecorder<C, S, B> {
    clock: C,
    store: S,
    sounder: B,
    log_path: &'static str,
}

impl<C, S, B> EventRecorder<C, S, B>
where
    C: Clock,
    S: EventStore,
    B: Sounder,
{
    pub fn new(clock: C, store: S, sounder: B, log_path: &'static str) -> Self {
        Self {
            clock,
            store,
            sounder,
            log_path,
        }
    }

    /// Record one qualifying press on `channel_id`.
    pub fn record(&mut self, channel_id: u8) -> Result<(), RecordError> {
        let timestamp = match self.clock.now() {
            Ok(timestamp) => timestamp,
            Err(err) => {
                log::error!("RTC read failed: {}", err);
                error_chime(&mut self.sounder);
                return Err(err.into());
            }
        };

        let line = format!("{},{}", timestamp, channel_id);

        let mut handle = match self.store.open_append(self.log_path) {
            Ok(handle) => handle,
            Err(err) => {
                log::error!("Error opening file!");
                error_chime(&mut self.sounder);
                return Err(err.into());
            }
        };

        if let Err(err) = self.store.write_line(&mut handle, &line) {
            log::error!("Log write failed: {}", err);
            error_chime(&mut self.sounder);
            return Err(err.into());
        }

        if let Err(err) = self.store.close(handle) {
            log::error!("Log close failed: {}", err);
            error_chime(&mut self.sounder);
            return Err(err.into());
        }

        // Mirror the written line verbatim to the console sink.
        log::info!("{}", line);
        confirm_tone(&mut self.sounder, channel_id);
        Ok(())
    }

    pub fn log_path(&self) -> &'static str {
        self.log_path
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn sounder(&self) -> &B {
        &self.sounder
    }

    pub fn sounder_mut(&mut self) -> &mut B {
        &mut self.sounder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Timestamp;
    use crate::mocks::{MockClock, MockSounder, MockStore};

    const LOG_PATH: &str = "/sd/events.csv";

    fn recorder_at(
        base: Timestamp,
    ) -> EventRecorder<MockClock, MockStore, MockSounder> {
        EventRecorder::new(
            MockClock::new(base),
            MockStore::new(),
            MockSounder::new(),
            LOG_PATH,
        )
    }

    fn base() -> Timestamp {
        Timestamp {
            year: 2024,
            month: 3,
            day: 1,
            hour: 10,
            minute: 0,
            second: 0,
        }
    }

    #[test]
    fn successful_record_appends_one_formatted_line() {
        let mut recorder = recorder_at(base());
        recorder.record(1).unwrap();
        assert_eq!(recorder.store().lines(), &["2024-03-01 10:00:00,1"]);
        assert_eq!(recorder.sounder().tones(), &[(2000, 100)]);
    }

    #[test]
    fn open_failure_drops_the_event_and_plays_the_error_chime() {
        let mut recorder = recorder_at(base());
        recorder.store_mut().fail_next_opens(1);

        let err = recorder.record(2).unwrap_err();
        assert!(matches!(err, RecordError::Store(_)));
        assert!(recorder.store().lines().is_empty());
        assert_eq!(recorder.sounder().tones().len(), 10);

        // The next event goes through untouched.
        recorder.record(2).unwrap();
        assert_eq!(recorder.store().lines(), &["2024-03-01 10:00:00,2"]);
    }

    #[test]
    fn clock_failure_writes_nothing() {
        let mut recorder = recorder_at(base());
        recorder.clock_mut().fail_next();

        let err = recorder.record(1).unwrap_err();
        assert!(matches!(err, RecordError::Clock(_)));
        assert!(recorder.store().lines().is_empty());
        assert_eq!(recorder.store().open_count(), 0);
        assert_eq!(recorder.sounder().tones().len(), 10);
    }

    #[test]
    fn each_record_opens_and_closes_the_log_once() {
        let mut recorder = recorder_at(base());
        recorder.record(1).unwrap();
        recorder.clock_mut().set_elapsed_ms(1_000);
        recorder.record(3).unwrap();
        assert_eq!(recorder.store().open_count(), 2);
        assert_eq!(recorder.store().close_count(), 2);
        assert_eq!(
            recorder.store().lines(),
            &["2024-03-01 10:00:00,1", "2024-03-01 10:00:01,3"]
        );
    }
}
