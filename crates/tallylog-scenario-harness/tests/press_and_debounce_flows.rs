use tallylog_scenario_harness::ScenarioHarness;

#[test]
fn press_hold_release_produces_exactly_one_line_per_channel() {
    let mut harness = ScenarioHarness::new();
    for channel_id in 1..=3 {
        harness.pulse(channel_id, 500);
        harness.advance(200);
    }

    assert_eq!(harness.lines().len(), 3);
    for (index, line) in harness.lines().iter().enumerate() {
        assert!(line.ends_with(&format!(",{}", index + 1)), "line {:?}", line);
    }
}

#[test]
fn represses_inside_the_debounce_window_are_ignored() {
    let mut harness = ScenarioHarness::new();

    // t=0: first press qualifies.
    harness.press(1);
    assert_eq!(harness.run_pass(), 1);

    harness.release(1);
    harness.advance(20);
    harness.run_pass();

    // t=50: new edge, but still inside the 100 ms window.
    harness.advance(30);
    harness.press(1);
    assert_eq!(harness.run_pass(), 0);

    assert_eq!(harness.lines().len(), 1);
}

#[test]
fn presses_separated_by_more_than_the_debounce_window_both_record() {
    let mut harness = ScenarioHarness::new();
    harness.pulse(1, 10);
    harness.advance(200);
    harness.pulse(1, 10);

    assert_eq!(harness.lines().len(), 2);
}

#[test]
fn holding_past_the_debounce_window_does_not_auto_repeat() {
    let mut harness = ScenarioHarness::new();
    harness.press(2);
    assert_eq!(harness.run_pass(), 1);

    // Held for two full seconds of passes; the edge gate blocks repeats.
    for _ in 0..200 {
        harness.advance(10);
        assert_eq!(harness.run_pass(), 0);
    }
    assert_eq!(harness.lines().len(), 1);
}

#[test]
fn channels_keep_independent_state_and_windows() {
    let mut harness = ScenarioHarness::new();

    harness.press(1);
    assert_eq!(harness.run_pass(), 1);

    // Channel 2 fires 10 ms later: channel 1's fresh trigger does not
    // consume channel 2's debounce window.
    harness.advance(10);
    harness.press(2);
    assert_eq!(harness.run_pass(), 1);

    // Channel 1 re-pressing inside its own window stays blocked while
    // channel 3 triggers normally in the same pass.
    harness.release(1);
    harness.advance(10);
    harness.run_pass();
    harness.advance(10);
    harness.press(1);
    harness.press(3);
    assert_eq!(harness.run_pass(), 1);

    let suffixes: Vec<&str> = harness
        .lines()
        .iter()
        .map(|line| line.rsplit(',').next().unwrap())
        .collect();
    assert_eq!(suffixes, ["1", "2", "3"]);
}

// The reference scenario: channel 1 at t=0 ms, again at t=50 ms
// (ignored), again at t=150 ms (recorded); channel 2 pressed together
// with channel 1 in the very first pass.
#[test]
fn reference_scenario() {
    let mut harness = ScenarioHarness::new();

    harness.press(1);
    harness.press(2);
    assert_eq!(harness.run_pass(), 2);
    assert_eq!(
        harness.lines(),
        &["2024-03-01 10:00:00,1", "2024-03-01 10:00:00,2"]
    );

    harness.release(1);
    harness.release(2);
    harness.advance(20);
    harness.run_pass();

    harness.advance(30);
    harness.press(1);
    assert_eq!(harness.run_pass(), 0, "t=50 ms sits inside the window");

    harness.release(1);
    harness.advance(50);
    harness.run_pass();

    harness.advance(50);
    harness.press(1);
    assert_eq!(harness.run_pass(), 1, "t=150 ms is past the window");

    assert_eq!(harness.lines().len(), 3);
    assert!(harness.lines()[2].ends_with(",1"));
}
