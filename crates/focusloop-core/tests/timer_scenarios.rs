//! Integration tests walking a focus session through its whole life.

use focusloop_core::timer::engine;
use focusloop_core::{SessionPhase, TransitionErrorKind};

const SEC: i64 = 1000;

#[test]
fn test_start_pause_resume_extend_stop() {
    // Created, not yet running.
    let session = engine::start(25.0, 0).unwrap();
    assert_eq!(session.duration_seconds(), 1500);
    assert!(!session.is_running());
    assert_eq!(engine::remaining_seconds(Some(&session), 0), 1500.0);

    // Running for a minute.
    let session = engine::resume(Some(&session), 0).unwrap();
    assert_eq!(engine::remaining_seconds(Some(&session), 60 * SEC), 1440.0);
    assert!((engine::progress(Some(&session), 60 * SEC) - 0.04).abs() < 1e-12);

    // Paused: nine minutes pass, the timer does not move.
    let session = engine::pause(Some(&session), 60 * SEC).unwrap();
    assert_eq!(engine::remaining_seconds(Some(&session), 600 * SEC), 1440.0);
    assert!(engine::is_paused(Some(&session)));

    // Resumed and extended at the same instant.
    let session = engine::resume(Some(&session), 600 * SEC).unwrap();
    let session = engine::extend(Some(&session), 5.0, 600 * SEC).unwrap();
    assert_eq!(session.duration_seconds(), 1800);
    assert_eq!(engine::remaining_seconds(Some(&session), 600 * SEC), 1740.0);

    // Stopped.
    let gone = engine::stop(Some(&session));
    assert!(gone.is_none());
    assert_eq!(engine::remaining_seconds(gone.as_ref(), 700 * SEC), 0.0);
    assert_eq!(engine::progress(gone.as_ref(), 700 * SEC), 0.0);
    assert_eq!(engine::phase(gone.as_ref()), SessionPhase::Absent);
}

#[test]
fn test_long_gap_without_ticks() {
    let t0 = 1_700_000_000_000;
    let session = engine::resume(Some(&engine::start(50.0, t0).unwrap()), t0).unwrap();

    // Nothing is called for 20 minutes, then one query.
    let later = t0 + 20 * 60 * SEC;
    assert_eq!(engine::remaining_seconds(Some(&session), later), 1800.0);
    assert_eq!(engine::elapsed_seconds(Some(&session), later), 1200.0);

    // A whole day later the session is simply at zero, never negative.
    let much_later = t0 + 24 * 3600 * SEC;
    assert_eq!(engine::remaining_seconds(Some(&session), much_later), 0.0);
    assert_eq!(engine::progress(Some(&session), much_later), 1.0);
    assert!(engine::is_due(Some(&session), much_later));
}

#[test]
fn test_tick_frequency_does_not_matter() {
    let session = engine::resume(Some(&engine::start(10.0, 0).unwrap()), 0).unwrap();
    let query = 377 * SEC + 250;

    // Polling at 1 Hz, at irregular intervals, or not at all gives one answer.
    let mut last = f64::NAN;
    for now in (0..=query).step_by(1000) {
        last = engine::remaining_seconds(Some(&session), now);
    }
    let jittered = [13, 999, 4_321, 120_000, query]
        .iter()
        .map(|&now| engine::remaining_seconds(Some(&session), now))
        .last()
        .unwrap();
    let direct = engine::remaining_seconds(Some(&session), query);

    assert_eq!(direct, 600.0 - 377.25);
    assert_eq!(jittered, direct);
    assert!((last - engine::remaining_seconds(Some(&session), 377 * SEC)).abs() < 1e-9);
}

#[test]
fn test_double_tap_is_harmless() {
    let session = engine::resume(Some(&engine::start(25.0, 0).unwrap()), 0).unwrap();
    let paused = engine::pause(Some(&session), 30 * SEC).unwrap();

    // The second tap sees the already-paused session and is refused.
    let failure = engine::pause(Some(&paused), 30 * SEC + 40).unwrap_err();
    assert_eq!(failure.kind, TransitionErrorKind::AlreadyPaused);
    assert_eq!(failure.session.as_ref(), Some(&paused));

    // Host keeps the returned session either way.
    let kept = failure.session.unwrap();
    assert_eq!(engine::remaining_seconds(Some(&kept), 90 * SEC), 1470.0);
}

#[test]
fn test_created_and_paused_are_distinguished() {
    let created = engine::start(25.0, 0).unwrap();
    assert_eq!(engine::phase(Some(&created)), SessionPhase::Created);
    assert!(!engine::is_paused(Some(&created)));

    let running = engine::resume(Some(&created), 0).unwrap();
    let paused = engine::pause(Some(&running), 5 * SEC).unwrap();
    assert_eq!(engine::phase(Some(&paused)), SessionPhase::Paused);
    assert!(engine::is_paused(Some(&paused)));

    // The same transition continues either one.
    assert!(engine::resume(Some(&created), 10 * SEC).is_ok());
    assert!(engine::resume(Some(&paused), 10 * SEC).is_ok());
}
