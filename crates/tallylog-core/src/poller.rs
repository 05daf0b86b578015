//! One sampling pass over every channel.

use crate::channel::{Channel, Level};
use crate::clock::Clock;
use crate::recorder::EventRecorder;
use crate::sounder::Sounder;
use crate::store::EventStore;

/// Run one polling pass: feed each channel its freshly sampled level in
/// fixed order and record every qualifying press. Returns the number of
/// events durably recorded this pass.
///
/// A record failure has already been reported and signalled by the
/// recorder; the pass carries on with the remaining channels either way.
pub fn poll_pass<C, S, B>(
    channels: &mut [Channel],
    levels: &[Level],
    now_ms: u64,
    recorder: &mut EventRecorder<C, S, B>,
) -> usize
where
    C: Clock,
    S: EventStore,
    B: Sounder,
{
    debug_assert_eq!(channels.len(), levels.len());

    let mut recorded = 0;
    for (channel, level) in channels.iter_mut().zip(levels.iter().copied()) {
        if let Some(trigger) = channel.poll(level, now_ms) {
            if recorder.record(trigger.channel_id).is_ok() {
                recorded += 1;
            }
        }
    }
    recorded
}
