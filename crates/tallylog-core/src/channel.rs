//! Per-channel debounce and edge detection.

/// Debounce interval applied to every channel in this deployment.
pub const DEFAULT_DEBOUNCE_MS: u64 = 100;

/// Logical input level. Buttons are wired active-low with pull-ups, so
/// `High` means released and `Low` means pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    High,
    Low,
}

/// A qualifying press accepted by the debounce tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trigger {
    pub channel_id: u8,
}

/// State for one push-button input.
///
/// Holds the last observed level and the monotonic time of the last
/// accepted press. A new press qualifies only on a `High -> Low` edge
/// once the debounce interval has elapsed since the previous trigger.
#[derive(Debug, Clone)]
pub struct Channel {
    id: u8,
    debounce_ms: u64,
    previous_level: Level,
    last_trigger_ms: u64,
}

impl Channel {
    pub fn new(id: u8) -> Self {
        Self {
            id,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            previous_level: Level::High,
            last_trigger_ms: 0,
        }
    }

    pub fn with_debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn debounce_ms(&self) -> u64 {
        self.debounce_ms
    }

    /// Feed one raw sample taken at monotonic time `now_ms`.
    ///
    /// The edge gate (not just the timer) prevents auto-repeat: a press
    /// held past the debounce window does not retrigger until the button
    /// is released and pressed again. `previous_level` is updated on
    /// every call so the state always reflects the latest raw sample.
    pub fn poll(&mut self, level: Level, now_ms: u64) -> Option<Trigger> {
        let qualifies = level == Level::Low
            && self.previous_level == Level::High
            && now_ms.saturating_sub(self.last_trigger_ms) >= self.debounce_ms;

        if qualifies {
            self.last_trigger_ms = now_ms;
        }
        self.previous_level = level;

        qualifies.then_some(Trigger { channel_id: self.id })
    }
}
