//! Tick source background task

use std::{sync::Arc, time::Duration};
use tokio::{
    sync::watch,
    time::{interval_at, Instant},
};
use tracing::{debug, error, info};

use crate::state::{AppState, TimerState};

/// Period of the tick source, one tick per tracked second
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

enum TickExit {
    RunEnded,
    ChannelClosed,
}

/// Background task that drives the tick counter while a timer is running.
///
/// A fresh interval is created for every run and dropped as soon as the
/// timer state leaves that run, whether by stop, switch or deletion. While
/// idle no interval exists.
pub async fn tick_timer_task(state: Arc<AppState>) {
    info!("Starting tick timer task");

    let mut timer_rx = state.subscribe_timer();

    loop {
        let current = *timer_rx.borrow_and_update();

        match current.running_run() {
            Some(run_id) => {
                if let TickExit::ChannelClosed = tick_run(&state, &mut timer_rx, run_id).await {
                    break;
                }
            }
            None => {
                if timer_rx.changed().await.is_err() {
                    break;
                }
            }
        }
    }

    info!("Timer channel closed, tick timer task exiting");
}

async fn tick_run(state: &AppState, timer_rx: &mut watch::Receiver<TimerState>, run_id: u64) -> TickExit {
    debug!("Starting tick source for run {}", run_id);

    // First tick lands one full period after the timer started
    let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match state.tick(run_id) {
                    Ok(Some(elapsed)) => debug!("Run {} tick: {}s", run_id, elapsed),
                    Ok(None) => {
                        debug!("Run {} no longer active, stopping tick source", run_id);
                        return TickExit::RunEnded;
                    }
                    Err(e) => error!("Failed to tick run {}: {}", run_id, e),
                }
            }

            changed = timer_rx.changed() => {
                if changed.is_err() {
                    return TickExit::ChannelClosed;
                }
                if timer_rx.borrow().running_run() != Some(run_id) {
                    debug!("Run {} ended, stopping tick source", run_id);
                    return TickExit::RunEnded;
                }
            }
        }
    }
}
