//! Core logic for the Tallylog T3 field event logger.
//! Runs on the device and on the host; all hardware sits behind traits.

#![forbid(unsafe_code)]
#![cfg_attr(
    not(test),
    deny(
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::unreachable,
        clippy::unwrap_used
    )
)]

pub mod channel;
pub mod clock;
pub mod mocks;
pub mod poller;
pub mod recorder;
pub mod sounder;
pub mod store;

pub use channel::{Channel, Level, Trigger, DEFAULT_DEBOUNCE_MS};
pub use clock::{Clock, ClockError, Timestamp};
pub use mocks::{MockClock, MockSounder, MockStore};
pub use poller::poll_pass;
pub use recorder::{EventRecorder, RecordError};
pub use sounder::{confirm_tone, error_chime, startup_chime, Sounder};
pub use store::{EventStore, StoreError};
