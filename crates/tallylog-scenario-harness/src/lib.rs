//! Host-side scenario harness for scripted button/logging flows.

use tallylog_core::mocks::{MockClock, MockSounder, MockStore};
use tallylog_core::{poll_pass, Channel, EventRecorder, Level, Timestamp};

/// Log path used by every scenario; matches the firmware constant.
pub const LOG_PATH: &str = "/sd/events.csv";

/// Monotonic time of the first pass. Boot (bus bring-up, mount, startup
/// chime) takes well over one debounce interval on the real device, so
/// scenarios start past the epoch the way the hardware does.
const BOOT_OFFSET_MS: u64 = 1_000;

/// Small helper that couples the channel bank, the recorder, and the
/// mock collaborators for scenario tests. Scenario time `t` is relative:
/// `t = 0` is the first pass after boot.
pub struct ScenarioHarness {
    channels: Vec<Channel>,
    levels: Vec<Level>,
    recorder: EventRecorder<MockClock, MockStore, MockSounder>,
    now_ms: u64,
}

impl Default for ScenarioHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioHarness {
    /// Three channels with the deployment debounce interval, clock based
    /// at 2024-03-01 10:00:00.
    pub fn new() -> Self {
        let base = Timestamp {
            year: 2024,
            month: 3,
            day: 1,
            hour: 10,
            minute: 0,
            second: 0,
        };
        Self::with_clock_base(base)
    }

    pub fn with_clock_base(base: Timestamp) -> Self {
        let channels: Vec<Channel> = (1..=3).map(Channel::new).collect();
        let levels = vec![Level::High; channels.len()];
        Self {
            channels,
            levels,
            recorder: EventRecorder::new(
                MockClock::new(base),
                MockStore::new(),
                MockSounder::new(),
                LOG_PATH,
            ),
            now_ms: BOOT_OFFSET_MS,
        }
    }

    /// Push the button on `channel_id` down. Takes effect on the next pass.
    pub fn press(&mut self, channel_id: u8) {
        self.set_level(channel_id, Level::Low);
    }

    /// Let the button on `channel_id` back up.
    pub fn release(&mut self, channel_id: u8) {
        self.set_level(channel_id, Level::High);
    }

    fn set_level(&mut self, channel_id: u8, level: Level) {
        let index = usize::from(channel_id.saturating_sub(1));
        assert!(index < self.levels.len(), "no channel {}", channel_id);
        self.levels[index] = level;
    }

    /// Advance scenario time without sampling.
    pub fn advance(&mut self, ms: u64) {
        self.now_ms += ms;
    }

    /// Sample every channel once at the current scenario time. Returns
    /// how many events were durably recorded in this pass.
    pub fn run_pass(&mut self) -> usize {
        let elapsed = self.now_ms - BOOT_OFFSET_MS;
        self.recorder.clock_mut().set_elapsed_ms(elapsed);
        poll_pass(
            &mut self.channels,
            &self.levels,
            self.now_ms,
            &mut self.recorder,
        )
    }

    /// Full press-hold-release gesture: press, sample, hold for
    /// `hold_ms` (sampling once more while held), release, sample.
    pub fn pulse(&mut self, channel_id: u8, hold_ms: u64) -> usize {
        self.press(channel_id);
        let mut recorded = self.run_pass();
        self.advance(hold_ms);
        recorded += self.run_pass();
        self.release(channel_id);
        self.advance(10);
        recorded += self.run_pass();
        recorded
    }

    /// Every log line committed so far, in trigger order.
    pub fn lines(&self) -> &[String] {
        self.recorder.store().lines()
    }

    /// Every `(freq_hz, duration_ms)` tone played so far.
    pub fn tones(&self) -> &[(u32, u32)] {
        self.recorder.sounder().tones()
    }

    pub fn clear_tones(&mut self) {
        self.recorder.sounder_mut().clear();
    }

    /// Make the next `n` log opens fail, as if the card were pulled.
    pub fn fail_next_opens(&mut self, n: u32) {
        self.recorder.store_mut().fail_next_opens(n);
    }
}
