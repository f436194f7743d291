use clap::Subcommand;
use focusloop_core::error::Result;
use focusloop_core::Config;

use super::{open_host, print_json, report};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Create a focus session without starting the countdown
    Start {
        /// Session length in minutes (default from config)
        #[arg(long, short, allow_negative_numbers = true)]
        minutes: Option<f64>,
    },
    /// Start the countdown, or continue after a pause
    Resume,
    /// Pause the countdown
    Pause,
    /// Add time to the current session
    Extend {
        /// Minutes to add (default from config)
        #[arg(long, short, allow_negative_numbers = true)]
        minutes: Option<f64>,
    },
    /// Discard the current session
    Stop,
    /// Print current timer state as JSON
    Status,
}

pub fn run(action: TimerAction) -> Result<()> {
    let config = Config::load_or_default();
    let mut host = open_host(&config)?;

    match action {
        TimerAction::Start { minutes } => {
            let minutes = minutes.unwrap_or(config.timer.default_minutes);
            report(&host.start(minutes)?)?;
        }
        TimerAction::Resume => report(&host.resume()?)?,
        TimerAction::Pause => report(&host.pause()?)?,
        TimerAction::Extend { minutes } => {
            let minutes = minutes.unwrap_or(config.timer.extend_minutes);
            report(&host.extend(minutes)?)?;
        }
        TimerAction::Stop => print_json(&host.stop()?)?,
        TimerAction::Status => print_json(&host.snapshot())?,
    }

    Ok(())
}
