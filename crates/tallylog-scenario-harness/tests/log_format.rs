use tallylog_scenario_harness::ScenarioHarness;
use tallylog_core::Timestamp;

/// `YYYY-MM-DD HH:MM:SS,<channel>` — fixed-width timestamp, single
/// comma, channel id in 1..=9 for this deployment.
fn assert_well_formed(line: &str) {
    let (timestamp, channel) = line.split_once(',').expect("missing comma");
    assert_eq!(timestamp.len(), 19, "timestamp width in {:?}", line);

    for (index, ch) in timestamp.char_indices() {
        match index {
            4 | 7 => assert_eq!(ch, '-', "in {:?}", line),
            10 => assert_eq!(ch, ' ', "in {:?}", line),
            13 | 16 => assert_eq!(ch, ':', "in {:?}", line),
            _ => assert!(ch.is_ascii_digit(), "in {:?}", line),
        }
    }

    let id: u8 = channel.parse().expect("channel id not numeric");
    assert!((1..=3).contains(&id));
}

#[test]
fn every_accepted_event_reads_back_as_one_well_formed_line() {
    let mut harness = ScenarioHarness::new();
    for round in 0..4 {
        for channel_id in 1..=3 {
            harness.pulse(channel_id, 20);
            harness.advance(150);
        }
        assert_eq!(harness.lines().len(), (round + 1) * 3);
    }

    for line in harness.lines() {
        assert_well_formed(line);
    }
}

#[test]
fn single_digit_fields_come_out_zero_padded() {
    let base = Timestamp {
        year: 2024,
        month: 3,
        day: 1,
        hour: 9,
        minute: 5,
        second: 7,
    };
    let mut harness = ScenarioHarness::with_clock_base(base);
    harness.pulse(2, 20);

    assert_eq!(harness.lines(), &["2024-03-01 09:05:07,2"]);
}

#[test]
fn lines_appear_in_trigger_order_with_ascending_timestamps() {
    let mut harness = ScenarioHarness::new();
    harness.pulse(1, 20);
    harness.advance(2_000);
    harness.pulse(1, 20);
    harness.advance(2_000);
    harness.pulse(3, 20);

    let lines = harness.lines();
    assert_eq!(lines.len(), 3);
    assert!(lines[0] < lines[1] && lines[1] < lines[2]);
    assert_eq!(lines[0], "2024-03-01 10:00:00,1");
    assert_eq!(lines[1], "2024-03-01 10:00:02,1");
    assert_eq!(lines[2], "2024-03-01 10:00:04,3");
}
