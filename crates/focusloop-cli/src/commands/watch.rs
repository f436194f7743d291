use std::time::Duration;

use focusloop_core::error::Result;
use focusloop_core::Config;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use super::{open_host, print_json};

/// Floor for the configured tick interval.
const MIN_TICK_MS: u64 = 100;

pub fn run() -> Result<()> {
    let config = Config::load_or_default();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(watch(&config))
}

async fn watch(config: &Config) -> Result<()> {
    let mut host = open_host(config)?;
    if host.session().is_none() {
        print_json(&host.snapshot())?;
        return Ok(());
    }

    let period = Duration::from_millis(config.timer.tick_interval_ms.max(MIN_TICK_MS));
    let mut ticker = tokio::time::interval(period);
    // Late ticks are dropped, not replayed; each tick recomputes from the clock.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                // Reload so pause/extend/stop from other invocations show up.
                if let Some(event) = host.restore()? {
                    print_json(&event)?;
                    break;
                }
                if host.session().is_none() {
                    print_json(&host.snapshot())?;
                    break;
                }
                println!("{}", serde_json::to_string(&host.snapshot())?);
            }
            _ = &mut ctrl_c => {
                debug!("watch interrupted");
                break;
            }
        }
    }

    Ok(())
}
