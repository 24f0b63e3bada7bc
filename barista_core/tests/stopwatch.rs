use barista_core::{DrinkType, Feedback, RoastLevel, Stopwatch, StopwatchState, calculate_smart_dial_in};
use barista_traits::clock::test_clock::TestClock;

#[test]
fn measures_advanced_time() {
    let clock = TestClock::new();
    let mut sw = Stopwatch::new(clock.clone());
    assert_eq!(sw.state(), StopwatchState::Idle);
    assert_eq!(sw.elapsed_s(), 0.0);

    sw.start();
    assert_eq!(sw.state(), StopwatchState::Running);
    clock.advance_secs(12.5);
    assert!((sw.elapsed_s() - 12.5).abs() < 1e-9);
    clock.advance_secs(15.5);

    let t = sw.stop().expect("was running");
    assert!((t - 28.0).abs() < 1e-9);
    assert_eq!(sw.state(), StopwatchState::Stopped);

    // Frozen after stop.
    clock.advance_secs(5.0);
    assert!((sw.elapsed_s() - 28.0).abs() < 1e-9);
}

#[test]
fn stop_when_idle_is_none() {
    let mut sw = Stopwatch::new(TestClock::new());
    assert_eq!(sw.stop(), None);
}

#[test]
fn restart_begins_fresh_measurement() {
    let clock = TestClock::new();
    let mut sw = Stopwatch::new(clock.clone());
    sw.start();
    clock.advance_secs(30.0);
    sw.stop();

    sw.start();
    clock.advance_secs(4.0);
    let t = sw.stop().unwrap();
    assert!((t - 4.0).abs() < 1e-9);

    sw.reset();
    assert_eq!(sw.state(), StopwatchState::Idle);
    assert_eq!(sw.elapsed_s(), 0.0);
}

#[test]
fn timed_shot_feeds_classifier() {
    let clock = TestClock::new();
    let mut sw = Stopwatch::new(clock.clone());
    sw.start();
    clock.advance_secs(28.0);
    let t = sw.stop().unwrap();
    let r = calculate_smart_dial_in(DrinkType::Espresso, RoastLevel::MEDIUM, t).unwrap();
    assert_eq!(r.feedback, Feedback::Perfect);
}
