use std::time::Duration;

use tokio::sync::mpsc::WeakUnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::loading::command::LoaderCommand;

/// Recurring timer that posts [`LoaderCommand::AutoupdateTick`].
///
/// The first tick fires one full period after start. Dropping the timer
/// stops it, and so does the command channel closing: the timer only holds
/// a weak sender and does not keep the list loader alive.
pub struct AutoupdateTimer {
    period: Duration,
    task: JoinHandle<()>,
}

impl AutoupdateTimer {
    /// Returns `None` for a zero period.
    pub fn start<C: Send + 'static>(
        period: Duration,
        inbox: WeakUnboundedSender<LoaderCommand<C>>,
    ) -> Option<Self> {
        if period.is_zero() {
            tracing::warn!("Auto-update period is zero, timer not started");
            return None;
        }
        let first_tick = Instant::now() + period;
        let task = tokio::spawn(async move {
            let mut ticks = interval_at(first_tick, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                let Some(inbox) = inbox.upgrade() else {
                    break;
                };
                if inbox.send(LoaderCommand::AutoupdateTick).is_err() {
                    break;
                }
            }
        });
        tracing::debug!(period_ms = period.as_millis() as u64, "Auto-update timer started");
        Some(Self { period, task })
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Drop for AutoupdateTimer {
    fn drop(&mut self) {
        self.task.abort();
        tracing::debug!("Auto-update timer stopped");
    }
}
