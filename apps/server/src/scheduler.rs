//! Background driver for the accrual engine.
//!
//! The scheduler is an explicit component: `main` starts it after the state is
//! built and stops it during graceful shutdown. Tests drive the engine directly.

use std::sync::Arc;

use outlays_core::accrual::AccrualEngine;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::AccrualConfig;

pub struct AccrualScheduler {
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl AccrualScheduler {
    /// Spawns the timer loop. The first cycle runs after `initial_delay`, then
    /// every `interval`. Ticks never overlap: a slow cycle delays the next one.
    pub fn start(engine: Arc<AccrualEngine>, config: &AccrualConfig) -> Self {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let period = config.interval;
        let first_tick = Instant::now() + config.initial_delay;

        let handle = tokio::spawn(async move {
            info!(
                "Accrual scheduler started ({}s interval, first run in {}s)",
                period.as_secs(),
                first_tick.saturating_duration_since(Instant::now()).as_secs()
            );
            let mut ticker = interval_at(first_tick, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let report = engine.run_scheduled_cycle().await;
                        debug!("Scheduled accrual cycle for {} complete", report.started_at);
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            info!("Accrual scheduler stopped");
        });

        Self {
            shutdown_tx,
            handle,
        }
    }

    /// Signals the loop and waits for it. A cycle already in flight runs to completion.
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(e) = self.handle.await {
            warn!("Accrual scheduler task ended abnormally: {}", e);
        }
    }
}
