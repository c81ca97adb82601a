//! Periodic temperature refresh as an explicit, cancellable task.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::clock::HourSource;
use super::session::SharedSession;

/// Default refresh period.
pub const DEFAULT_TICK: Duration = Duration::from_secs(60);

/// Spawns the refresh loop for `session`.
///
/// On every tick the session's temperature is re-derived for the hour
/// reported by `clock`. The first tick fires immediately. The task ends
/// once `token` is cancelled; the returned handle resolves after the loop
/// exits.
pub fn spawn_ticker<C: HourSource>(
    session: SharedSession,
    clock: C,
    period: Duration,
    token: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(period_secs = period.as_secs_f64(), "temperature ticker started");

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = ticker.tick() => {
                    let hour = clock.hour();
                    let temp = session.write().await.refresh(hour);
                    debug!(hour, temp, "temperature refreshed");
                }
            }
        }

        info!("temperature ticker stopped");
    })
}
