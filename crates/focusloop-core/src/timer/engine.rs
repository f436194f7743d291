//! Focus timer engine.
//!
//! The engine is a set of pure functions over [`TimerSession`]. It owns no
//! threads and no intervals; the host calls [`remaining_seconds`] on every UI
//! tick. Displayed time is always recomputed from timestamps, never by
//! decrementing a counter, so late or missing ticks (backgrounded app,
//! throttled timers, device sleep) cannot introduce drift.
//!
//! ## State Transitions
//!
//! ```text
//! Absent -start-> Created -resume-> Running <-pause/resume-> Paused
//!   ^                                  |                        |
//!   +------------- stop (or remaining reaches zero) ------------+
//! ```
//!
//! ## Usage
//!
//! ```
//! use focusloop_core::timer::engine;
//!
//! let session = engine::start(25.0, 0).unwrap();
//! let session = engine::resume(Some(&session), 0).unwrap();
//! assert_eq!(engine::remaining_seconds(Some(&session), 60_000), 1440.0);
//! ```

use super::clock::{Clock, SystemClock};
use super::session::{SessionPhase, TimerSession};
use crate::error::{TransitionErrorKind, TransitionFailure};
use crate::events::{timestamp, Event};

/// Outcome of a transition: the next session, or the untouched input.
pub type Transition = Result<TimerSession, TransitionFailure>;

// ── Transitions ──────────────────────────────────────────────────────

/// Create a session of `duration_minutes`, not yet running.
///
/// Fractional minutes are rounded to whole seconds.
pub fn start(duration_minutes: f64, now_ms: i64) -> Transition {
    let duration_seconds = minutes_to_seconds(duration_minutes)
        .ok_or_else(|| TransitionFailure::new(TransitionErrorKind::InvalidDuration, None))?;
    Ok(TimerSession {
        duration_seconds,
        anchor_started_at_ms: now_ms,
        accumulated_run_seconds: 0.0,
        is_running: false,
        created_at_ms: now_ms,
    })
}

/// Begin (or continue) counting down from `now_ms`.
pub fn resume(session: Option<&TimerSession>, now_ms: i64) -> Transition {
    let current = require(session)?;
    if current.is_running {
        return Err(TransitionFailure::new(
            TransitionErrorKind::AlreadyRunning,
            Some(current.clone()),
        ));
    }
    Ok(TimerSession {
        is_running: true,
        anchor_started_at_ms: now_ms,
        ..current.clone()
    })
}

/// Fold the running segment into the accumulated total and stop counting.
pub fn pause(session: Option<&TimerSession>, now_ms: i64) -> Transition {
    let current = require(session)?;
    if !current.is_running {
        return Err(TransitionFailure::new(
            TransitionErrorKind::AlreadyPaused,
            Some(current.clone()),
        ));
    }
    Ok(TimerSession {
        accumulated_run_seconds: counted_seconds(current, now_ms),
        is_running: false,
        ..current.clone()
    })
}

/// Add `extra_minutes` to the planned duration. Counted time is kept.
///
/// A running session keeps its anchor, so the extension just pushes the
/// zero-crossing back.
pub fn extend(session: Option<&TimerSession>, extra_minutes: f64, _now_ms: i64) -> Transition {
    let current = require(session)?;
    let extra_seconds = minutes_to_seconds(extra_minutes).ok_or_else(|| {
        TransitionFailure::new(TransitionErrorKind::InvalidDuration, Some(current.clone()))
    })?;
    Ok(TimerSession {
        duration_seconds: current.duration_seconds.saturating_add(extra_seconds),
        ..current.clone()
    })
}

/// End the session, whatever its state. `stop(None)` is `None`.
pub fn stop(_session: Option<&TimerSession>) -> Option<TimerSession> {
    None
}

// ── Derived values ───────────────────────────────────────────────────

/// Seconds counted so far across all running segments, in `[0, duration]`.
pub fn elapsed_seconds(session: Option<&TimerSession>, now_ms: i64) -> f64 {
    session.map(|s| counted_seconds(s, now_ms)).unwrap_or(0.0)
}

/// Seconds left before the zero-crossing; never negative.
pub fn remaining_seconds(session: Option<&TimerSession>, now_ms: i64) -> f64 {
    match session {
        None => 0.0,
        Some(s) => (s.duration_seconds as f64 - counted_seconds(s, now_ms)).max(0.0),
    }
}

/// Fraction of the planned duration counted so far, in `[0, 1]`.
pub fn progress(session: Option<&TimerSession>, now_ms: i64) -> f64 {
    match session {
        Some(s) if s.duration_seconds > 0 => {
            (counted_seconds(s, now_ms) / s.duration_seconds as f64).clamp(0.0, 1.0)
        }
        _ => 0.0,
    }
}

/// True when stopped mid-session, as opposed to created and never run.
pub fn is_paused(session: Option<&TimerSession>) -> bool {
    SessionPhase::of(session) == SessionPhase::Paused
}

pub fn phase(session: Option<&TimerSession>) -> SessionPhase {
    SessionPhase::of(session)
}

/// True when a running session has reached zero and the host should
/// complete it.
pub fn is_due(session: Option<&TimerSession>, now_ms: i64) -> bool {
    session.is_some_and(|s| s.is_running && remaining_seconds(Some(s), now_ms) <= 0.0)
}

/// Build a full state snapshot event.
pub fn snapshot(session: Option<&TimerSession>, now_ms: i64) -> Event {
    Event::StateSnapshot {
        phase: phase(session),
        duration_secs: session.map(|s| s.duration_seconds).unwrap_or(0),
        elapsed_secs: elapsed_seconds(session, now_ms),
        remaining_secs: remaining_seconds(session, now_ms),
        progress: progress(session, now_ms),
        at: timestamp(now_ms),
    }
}

// ── Clock-bound wrapper ──────────────────────────────────────────────

/// The engine with `now` bound to a [`Clock`].
///
/// Defaults to the system wall clock; tests inject a
/// [`ManualClock`](super::ManualClock).
#[derive(Debug, Clone, Default)]
pub struct TimerEngine<C = SystemClock> {
    clock: C,
}

impl TimerEngine<SystemClock> {
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> TimerEngine<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    pub fn start(&self, duration_minutes: f64) -> Transition {
        start(duration_minutes, self.now_ms())
    }

    pub fn resume(&self, session: Option<&TimerSession>) -> Transition {
        resume(session, self.now_ms())
    }

    pub fn pause(&self, session: Option<&TimerSession>) -> Transition {
        pause(session, self.now_ms())
    }

    pub fn extend(&self, session: Option<&TimerSession>, extra_minutes: f64) -> Transition {
        extend(session, extra_minutes, self.now_ms())
    }

    pub fn stop(&self, session: Option<&TimerSession>) -> Option<TimerSession> {
        stop(session)
    }

    pub fn elapsed_seconds(&self, session: Option<&TimerSession>) -> f64 {
        elapsed_seconds(session, self.now_ms())
    }

    pub fn remaining_seconds(&self, session: Option<&TimerSession>) -> f64 {
        remaining_seconds(session, self.now_ms())
    }

    pub fn progress(&self, session: Option<&TimerSession>) -> f64 {
        progress(session, self.now_ms())
    }

    pub fn is_due(&self, session: Option<&TimerSession>) -> bool {
        is_due(session, self.now_ms())
    }

    pub fn snapshot(&self, session: Option<&TimerSession>) -> Event {
        snapshot(session, self.now_ms())
    }
}

// ── Internal ─────────────────────────────────────────────────────────

fn require(session: Option<&TimerSession>) -> Result<&TimerSession, TransitionFailure> {
    session.ok_or_else(|| TransitionFailure::new(TransitionErrorKind::NoActiveSession, None))
}

/// Accumulated plus current segment, clamped to `[0, duration]`.
fn counted_seconds(session: &TimerSession, now_ms: i64) -> f64 {
    let total = session.accumulated_run_seconds + session.segment_seconds(now_ms);
    total.clamp(0.0, session.duration_seconds as f64)
}

/// Whole seconds for a positive, finite minute count.
fn minutes_to_seconds(minutes: f64) -> Option<u64> {
    if !minutes.is_finite() || minutes <= 0.0 {
        return None;
    }
    let seconds = (minutes * 60.0).round();
    if seconds < 1.0 {
        return None;
    }
    Some(seconds as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::ManualClock;
    use proptest::prelude::*;

    const MIN: i64 = 60_000;

    fn running(minutes: f64, at: i64) -> TimerSession {
        let created = start(minutes, at).unwrap();
        resume(Some(&created), at).unwrap()
    }

    #[test]
    fn start_creates_idle_session() {
        let s = start(25.0, 0).unwrap();
        assert_eq!(s.duration_seconds(), 1500);
        assert!(!s.is_running());
        assert_eq!(s.accumulated_run_seconds(), 0.0);
        assert_eq!(s.anchor_started_at_ms(), 0);
        assert_eq!(s.created_at_ms(), 0);
        assert_eq!(remaining_seconds(Some(&s), 0), 1500.0);
        assert_eq!(phase(Some(&s)), SessionPhase::Created);
        assert!(!is_paused(Some(&s)));
    }

    #[test]
    fn start_rounds_fractional_minutes() {
        assert_eq!(start(0.5, 0).unwrap().duration_seconds(), 30);
        assert_eq!(start(1.0 / 3.0, 0).unwrap().duration_seconds(), 20);
        assert_eq!(start(0.0125, 0).unwrap().duration_seconds(), 1);
    }

    #[test]
    fn start_rejects_invalid_durations() {
        for minutes in [0.0, -5.0, f64::NAN, f64::INFINITY, 0.001] {
            let failure = start(minutes, 0).unwrap_err();
            assert_eq!(failure.kind, TransitionErrorKind::InvalidDuration);
            assert!(failure.session.is_none());
        }
    }

    #[test]
    fn resume_and_pause_errors_carry_original_session() {
        let created = start(10.0, 0).unwrap();
        let failure = pause(Some(&created), 1_000).unwrap_err();
        assert_eq!(failure.kind, TransitionErrorKind::AlreadyPaused);
        assert_eq!(failure.session.as_ref(), Some(&created));

        let live = resume(Some(&created), 1_000).unwrap();
        let failure = resume(Some(&live), 2_000).unwrap_err();
        assert_eq!(failure.kind, TransitionErrorKind::AlreadyRunning);
        assert_eq!(failure.session, Some(live));
    }

    #[test]
    fn transitions_on_absent_session() {
        for failure in [
            resume(None, 0).unwrap_err(),
            pause(None, 0).unwrap_err(),
            extend(None, 5.0, 0).unwrap_err(),
        ] {
            assert_eq!(failure.kind, TransitionErrorKind::NoActiveSession);
            assert!(failure.session.is_none());
        }
        assert!(stop(None).is_none());
    }

    #[test]
    fn pause_clamps_to_duration() {
        let s = running(1.0, 0);
        let paused = pause(Some(&s), 10 * MIN).unwrap();
        assert_eq!(paused.accumulated_run_seconds(), 60.0);
        assert_eq!(remaining_seconds(Some(&paused), 20 * MIN), 0.0);
        assert!(is_paused(Some(&paused)));
    }

    #[test]
    fn extend_keeps_counted_time_and_anchor() {
        let s = running(25.0, 0);
        let paused = pause(Some(&s), MIN).unwrap();
        let extended = extend(Some(&paused), 5.0, 2 * MIN).unwrap();
        assert_eq!(extended.duration_seconds(), 1800);
        assert_eq!(extended.accumulated_run_seconds(), 60.0);
        assert!(!extended.is_running());

        let resumed = resume(Some(&paused), 10 * MIN).unwrap();
        let extended = extend(Some(&resumed), 5.0, 11 * MIN).unwrap();
        assert_eq!(extended.anchor_started_at_ms(), 10 * MIN);
        assert_eq!(remaining_seconds(Some(&extended), 11 * MIN), 1800.0 - 120.0);
    }

    #[test]
    fn extend_past_zero_keeps_anchor() {
        let s = running(1.0, 0);
        let extended = extend(Some(&s), 5.0, 3 * MIN).unwrap();
        assert_eq!(extended.duration_seconds(), 360);
        assert_eq!(extended.accumulated_run_seconds(), 0.0);
        assert_eq!(extended.anchor_started_at_ms(), 0);
        assert_eq!(remaining_seconds(Some(&extended), 3 * MIN), 180.0);
        assert!(!is_due(Some(&extended), 3 * MIN));
    }

    #[test]
    fn extend_created_session_stays_created() {
        let created = start(25.0, 0).unwrap();
        let extended = extend(Some(&created), 5.0, MIN).unwrap();
        assert_eq!(extended.duration_seconds(), 1800);
        assert_eq!(phase(Some(&extended)), SessionPhase::Created);
        assert_eq!(extended.anchor_started_at_ms(), 0);
        assert_eq!(remaining_seconds(Some(&extended), 5 * MIN), 1800.0);
    }

    #[test]
    fn extend_rejects_invalid_minutes() {
        let s = start(25.0, 0).unwrap();
        let failure = extend(Some(&s), -1.0, 0).unwrap_err();
        assert_eq!(failure.kind, TransitionErrorKind::InvalidDuration);
        assert_eq!(failure.session, Some(s));
    }

    #[test]
    fn transitions_do_not_touch_input() {
        let s = running(25.0, 0);
        let before = s.clone();
        let _ = pause(Some(&s), MIN);
        let _ = extend(Some(&s), 5.0, MIN);
        assert_eq!(s, before);
    }

    #[test]
    fn derived_values_over_absent() {
        assert_eq!(elapsed_seconds(None, 1_000), 0.0);
        assert_eq!(remaining_seconds(None, 1_000), 0.0);
        assert_eq!(progress(None, 1_000), 0.0);
        assert!(!is_paused(None));
        assert!(!is_due(None, 1_000));
    }

    #[test]
    fn due_only_while_running_at_zero() {
        let s = running(1.0, 0);
        assert!(!is_due(Some(&s), 59_999));
        assert!(is_due(Some(&s), MIN));
        let paused = pause(Some(&s), MIN).unwrap();
        assert!(!is_due(Some(&paused), 2 * MIN));
    }

    #[test]
    fn snapshot_reports_derived_state() {
        let s = running(25.0, 0);
        match snapshot(Some(&s), MIN) {
            Event::StateSnapshot {
                phase,
                duration_secs,
                elapsed_secs,
                remaining_secs,
                progress,
                ..
            } => {
                assert_eq!(phase, SessionPhase::Running);
                assert_eq!(duration_secs, 1500);
                assert_eq!(elapsed_secs, 60.0);
                assert_eq!(remaining_secs, 1440.0);
                assert!((progress - 0.04).abs() < 1e-12);
            }
            other => panic!("Expected StateSnapshot, got {other:?}"),
        }
    }

    #[test]
    fn clock_bound_engine_uses_its_clock() {
        let engine = TimerEngine::with_clock(ManualClock::new(0));
        let s = engine.start(25.0).unwrap();
        let s = engine.resume(Some(&s)).unwrap();
        engine.clock().advance_secs(90);
        assert_eq!(engine.elapsed_seconds(Some(&s)), 90.0);
        assert_eq!(engine.remaining_seconds(Some(&s)), 1410.0);
        let s = engine.pause(Some(&s)).unwrap();
        engine.clock().advance_secs(600);
        assert_eq!(engine.remaining_seconds(Some(&s)), 1410.0);
        assert!(engine.stop(Some(&s)).is_none());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Pause,
        Resume,
        Extend(u8),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Pause),
            Just(Op::Resume),
            (1u8..=30).prop_map(Op::Extend),
        ]
    }

    proptest! {
        #[test]
        fn stop_is_idempotent(minutes in 1u32..240, at in 0i64..10_000_000) {
            let s = start(minutes as f64, at).unwrap();
            prop_assert!(stop(Some(&s)).is_none());
            prop_assert!(stop(stop(Some(&s)).as_ref()).is_none());
        }

        #[test]
        fn duration_never_decreases(
            ops in proptest::collection::vec((op_strategy(), 0i64..600_000), 0..40)
        ) {
            let mut now = 0;
            let mut session = start(25.0, now).unwrap();
            for (op, gap) in ops {
                now += gap;
                let before = session.duration_seconds();
                let next = match op {
                    Op::Pause => pause(Some(&session), now),
                    Op::Resume => resume(Some(&session), now),
                    Op::Extend(m) => extend(Some(&session), m as f64, now),
                };
                session = next.unwrap_or_else(|f| f.session.unwrap());
                prop_assert!(session.duration_seconds() >= before);
            }
        }

        #[test]
        fn pause_resume_cycles_do_not_drift(
            segments in proptest::collection::vec((1i64..300_000, 0i64..3_600_000), 1..20),
        ) {
            // Each entry runs for `run` ms, then sits paused for `idle` ms.
            let mut now = 0;
            let mut session = start(600.0, now).unwrap();
            let mut run_total = 0;
            for (run, idle) in &segments {
                session = resume(Some(&session), now).unwrap();
                now += run;
                run_total += run;
                session = pause(Some(&session), now).unwrap();
                now += idle;
            }
            let expected = 36_000.0 - run_total as f64 / 1000.0;
            let remaining = remaining_seconds(Some(&session), now);
            prop_assert!((remaining - expected).abs() < 1e-6);

            // One uninterrupted run of the same total lands on the same value.
            let single = resume(Some(&start(600.0, 0).unwrap()), 0).unwrap();
            let single = pause(Some(&single), run_total).unwrap();
            prop_assert!((remaining_seconds(Some(&single), now) - remaining).abs() < 1e-6);
        }

        #[test]
        fn progress_stays_in_bounds(
            minutes in 1u32..120,
            run_ms in 0i64..20_000_000,
            query_offset in -5_000_000i64..20_000_000,
        ) {
            let s = running(minutes as f64, 1_000_000);
            let s = pause(Some(&s), 1_000_000 + run_ms).unwrap();
            let s = resume(Some(&s), 30_000_000).unwrap();
            let now = 30_000_000 + query_offset;
            let p = progress(Some(&s), now);
            prop_assert!((0.0..=1.0).contains(&p));
            let expected = elapsed_seconds(Some(&s), now) / s.duration_seconds() as f64;
            prop_assert_eq!(p, expected);
        }

        #[test]
        fn remaining_hits_zero_exactly_at_duration(
            minutes in 1u32..60,
            offset_ms in 0i64..7_200_000,
        ) {
            let s = running(minutes as f64, 0);
            let remaining = remaining_seconds(Some(&s), offset_ms);
            let elapsed = elapsed_seconds(Some(&s), offset_ms);
            prop_assert!(remaining >= 0.0);
            prop_assert_eq!(remaining == 0.0, elapsed >= s.duration_seconds() as f64);
        }
    }
}
