//! Audible feedback tones and the fixed patterns the device plays.

/// Feedback signaler: play a tone and return once it has finished.
/// While a tone plays, no channel is polled and no event is recorded.
pub trait Sounder {
    fn tone(&mut self, freq_hz: u32, duration_ms: u32);
}

/// Rising three-note chime played once boot has fully succeeded.
pub const STARTUP_CHIME: [(u32, u32); 3] = [(2200, 200), (2500, 200), (2800, 200)];

/// Per-channel confirmation frequencies for channels 1, 2, 3. Channels
/// beyond the table reuse the last entry; the cue only has to be audibly
/// distinct from the failure pattern.
pub const CONFIRM_TONES_HZ: [u32; 3] = [2000, 2200, 2500];

pub const CONFIRM_TONE_MS: u32 = 100;

const ERROR_TONE_HIGH_HZ: u32 = 2500;
const ERROR_TONE_LOW_HZ: u32 = 2000;
const ERROR_TONE_MS: u32 = 300;
const ERROR_CHIME_REPEATS: usize = 5;

pub fn startup_chime(sounder: &mut impl Sounder) {
    for (freq_hz, duration_ms) in STARTUP_CHIME {
        sounder.tone(freq_hz, duration_ms);
    }
}

/// Five repetitions of a falling two-tone pattern, distinguishable by
/// ear from every confirmation tone.
pub fn error_chime(sounder: &mut impl Sounder) {
    for _ in 0..ERROR_CHIME_REPEATS {
        sounder.tone(ERROR_TONE_HIGH_HZ, ERROR_TONE_MS);
        sounder.tone(ERROR_TONE_LOW_HZ, ERROR_TONE_MS);
    }
}

pub fn confirm_tone(sounder: &mut impl Sounder, channel_id: u8) {
    let index = usize::from(channel_id.saturating_sub(1));
    let freq_hz = CONFIRM_TONES_HZ
        .get(index)
        .copied()
        .unwrap_or(CONFIRM_TONES_HZ[CONFIRM_TONES_HZ.len() - 1]);
    sounder.tone(freq_hz, CONFIRM_TONE_MS);
}
