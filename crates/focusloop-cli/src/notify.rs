use focusloop_core::storage::NotificationsConfig;
use focusloop_core::{CompletionHook, Event, TimerSession};
use tracing::info;

/// Completion feedback for a terminal host.
///
/// There is no vibration motor here, so the configured haptic pattern is
/// logged and the bell stands in for it.
pub struct TerminalNotifier {
    config: NotificationsConfig,
}

impl TerminalNotifier {
    pub fn new(config: NotificationsConfig) -> Self {
        Self { config }
    }
}

impl CompletionHook for TerminalNotifier {
    fn session_completed(&mut self, session: &TimerSession, _event: &Event) {
        if !self.config.enabled {
            return;
        }
        info!(
            pattern = %self.config.haptic_pattern,
            duration_secs = session.duration_seconds(),
            "completion feedback"
        );
        if self.config.bell {
            eprint!("\x07");
        }
    }
}
