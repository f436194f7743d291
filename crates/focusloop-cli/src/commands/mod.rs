pub mod config;
pub mod timer;
pub mod watch;

use focusloop_core::error::Result;
use focusloop_core::{Config, Database, Event, FocusHost, HostOutcome, SystemClock};
use serde::Serialize;
use serde_json::json;

use crate::notify::TerminalNotifier;

pub type Host = FocusHost<Database, SystemClock, TerminalNotifier>;

/// Open the on-disk store and bring the session up to date with the clock.
///
/// A completion that happened while nothing was running goes to stderr, so
/// stdout stays a single JSON value per command.
pub fn open_host(config: &Config) -> Result<Host> {
    let db = Database::open()?;
    let mut host =
        FocusHost::new(db).with_hook(TerminalNotifier::new(config.notifications.clone()));
    if let Some(event) = host.restore()? {
        notice(&event)?;
    }
    Ok(host)
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One compact JSON line on stderr.
pub fn notice(event: &Event) -> Result<()> {
    eprintln!("{}", serde_json::to_string(event)?);
    Ok(())
}

/// Print an applied event, or the refusal. A refusal is not an error exit.
pub fn report(outcome: &HostOutcome) -> Result<()> {
    match outcome {
        HostOutcome::Applied(event) => print_json(event),
        HostOutcome::Rejected(failure) => print_json(&json!({
            "type": "TransitionRejected",
            "error": failure.kind,
            "message": failure.to_string(),
            "session": failure.session,
        })),
    }
}
