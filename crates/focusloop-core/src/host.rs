//! Single-writer host driver.
//!
//! [`FocusHost`] is the state container the engine expects around it: it owns
//! the current session, routes every change through the engine, persists the
//! result, and on [`FocusHost::tick`] notices a running session reaching zero.
//! It never schedules anything itself; whoever drives it (a 1 Hz interval, a
//! UI frame callback, a CLI invocation) just calls `tick()`.

use tracing::{debug, info};

use crate::error::{StoreError, TransitionFailure};
use crate::events::{timestamp, Event};
use crate::storage::SessionStore;
use crate::timer::{engine, Clock, SystemClock, TimerSession};

/// Reaction to a session reaching zero (haptic "success", celebration).
pub trait CompletionHook {
    fn session_completed(&mut self, session: &TimerSession, event: &Event);
}

/// No reaction.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHook;

impl CompletionHook for NoopHook {
    fn session_completed(&mut self, _session: &TimerSession, _event: &Event) {}
}

impl<F> CompletionHook for F
where
    F: FnMut(&TimerSession, &Event),
{
    fn session_completed(&mut self, session: &TimerSession, event: &Event) {
        self(session, event)
    }
}

/// Result of a host-level command.
#[derive(Debug, Clone, PartialEq)]
pub enum HostOutcome {
    Applied(Event),
    /// The engine refused; nothing changed.
    Rejected(TransitionFailure),
}

impl HostOutcome {
    pub fn event(&self) -> Option<&Event> {
        match self {
            HostOutcome::Applied(event) => Some(event),
            HostOutcome::Rejected(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&TransitionFailure> {
        match self {
            HostOutcome::Applied(_) => None,
            HostOutcome::Rejected(failure) => Some(failure),
        }
    }
}

pub struct FocusHost<S, C = SystemClock, H = NoopHook> {
    session: Option<TimerSession>,
    store: S,
    clock: C,
    hook: H,
}

impl<S: SessionStore> FocusHost<S, SystemClock, NoopHook> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: SessionStore, C: Clock> FocusHost<S, C, NoopHook> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self {
            session: None,
            store,
            clock,
            hook: NoopHook,
        }
    }
}

impl<S: SessionStore, C: Clock, H: CompletionHook> FocusHost<S, C, H> {
    pub fn with_hook<H2: CompletionHook>(self, hook: H2) -> FocusHost<S, C, H2> {
        FocusHost {
            session: self.session,
            store: self.store,
            clock: self.clock,
            hook,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn session(&self) -> Option<&TimerSession> {
        self.session.as_ref()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn hook(&self) -> &H {
        &self.hook
    }

    pub fn remaining_seconds(&self) -> f64 {
        engine::remaining_seconds(self.session(), self.clock.now_ms())
    }

    pub fn progress(&self) -> f64 {
        engine::progress(self.session(), self.clock.now_ms())
    }

    pub fn is_paused(&self) -> bool {
        engine::is_paused(self.session())
    }

    pub fn snapshot(&self) -> Event {
        engine::snapshot(self.session(), self.clock.now_ms())
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Reload the persisted session and recompute it against the wall clock.
    ///
    /// Call on launch and after any suspension. A session that ran out while
    /// the host was away completes here, so the returned event is
    /// `Some(TimerCompleted)` in that case.
    pub fn restore(&mut self) -> Result<Option<Event>, StoreError> {
        self.session = self.store.load_session()?;
        debug!(
            phase = %engine::phase(self.session()),
            "focus session restored"
        );
        self.tick()
    }

    /// Create a new session, replacing any current one.
    pub fn start(&mut self, duration_minutes: f64) -> Result<HostOutcome, StoreError> {
        let now = self.clock.now_ms();
        let next = match engine::start(duration_minutes, now) {
            Ok(next) => next,
            Err(failure) => return Ok(self.reject(failure)),
        };
        let replaced_active = self.session.is_some();
        if replaced_active {
            debug!("replacing active focus session");
        }
        let event = Event::TimerCreated {
            duration_secs: next.duration_seconds(),
            replaced_active,
            at: timestamp(now),
        };
        self.commit(Some(next))?;
        debug!(?event, "focus session created");
        Ok(HostOutcome::Applied(event))
    }

    pub fn resume(&mut self) -> Result<HostOutcome, StoreError> {
        let now = self.clock.now_ms();
        let next = match engine::resume(self.session(), now) {
            Ok(next) => next,
            Err(failure) => return Ok(self.reject(failure)),
        };
        let event = Event::TimerResumed {
            remaining_secs: engine::remaining_seconds(Some(&next), now),
            at: timestamp(now),
        };
        self.commit(Some(next))?;
        debug!(?event, "focus session resumed");
        Ok(HostOutcome::Applied(event))
    }

    pub fn pause(&mut self) -> Result<HostOutcome, StoreError> {
        let now = self.clock.now_ms();
        let next = match engine::pause(self.session(), now) {
            Ok(next) => next,
            Err(failure) => return Ok(self.reject(failure)),
        };
        let event = Event::TimerPaused {
            elapsed_secs: engine::elapsed_seconds(Some(&next), now),
            remaining_secs: engine::remaining_seconds(Some(&next), now),
            at: timestamp(now),
        };
        self.commit(Some(next))?;
        debug!(?event, "focus session paused");
        Ok(HostOutcome::Applied(event))
    }

    pub fn extend(&mut self, extra_minutes: f64) -> Result<HostOutcome, StoreError> {
        let now = self.clock.now_ms();
        let next = match engine::extend(self.session(), extra_minutes, now) {
            Ok(next) => next,
            Err(failure) => return Ok(self.reject(failure)),
        };
        let before = self.session.as_ref().map(|s| s.duration_seconds()).unwrap_or(0);
        let event = Event::TimerExtended {
            added_secs: next.duration_seconds() - before,
            duration_secs: next.duration_seconds(),
            remaining_secs: engine::remaining_seconds(Some(&next), now),
            at: timestamp(now),
        };
        self.commit(Some(next))?;
        debug!(?event, "focus session extended");
        Ok(HostOutcome::Applied(event))
    }

    /// End the session. Always succeeds; stopping nothing is a no-op event.
    pub fn stop(&mut self) -> Result<Event, StoreError> {
        let now = self.clock.now_ms();
        let event = Event::TimerStopped {
            elapsed_secs: engine::elapsed_seconds(self.session(), now),
            remaining_secs: engine::remaining_seconds(self.session(), now),
            at: timestamp(now),
        };
        let next = engine::stop(self.session());
        self.commit(next)?;
        debug!(?event, "focus session stopped");
        Ok(event)
    }

    /// Recompute from timestamps and complete a running session at zero.
    ///
    /// Returns `Some(TimerCompleted)` exactly once per session: the session
    /// is stopped as part of completing it.
    pub fn tick(&mut self) -> Result<Option<Event>, StoreError> {
        let now = self.clock.now_ms();
        if !engine::is_due(self.session(), now) {
            return Ok(None);
        }
        let Some(finished) = self.session.clone() else {
            return Ok(None);
        };

        let event = Event::TimerCompleted {
            duration_secs: finished.duration_seconds(),
            at: timestamp(now),
        };
        self.commit(engine::stop(Some(&finished)))?;
        info!(
            duration_secs = finished.duration_seconds(),
            "focus session completed"
        );
        self.hook.session_completed(&finished, &event);
        Ok(Some(event))
    }

    /// Give back the store, e.g. to reopen it in another host.
    pub fn into_store(self) -> S {
        self.store
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Persist first, so memory never runs ahead of storage.
    fn commit(&mut self, next: Option<TimerSession>) -> Result<(), StoreError> {
        self.store.persist(next.as_ref())?;
        self.session = next;
        Ok(())
    }

    fn reject(&self, failure: TransitionFailure) -> HostOutcome {
        debug!(kind = ?failure.kind, "focus session transition rejected");
        HostOutcome::Rejected(failure)
    }
}
