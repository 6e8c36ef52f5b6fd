//! Auto-advance timer
//!
//! Runs as a tokio task that emits [`AutoTick`]s over a bounded channel.
//! The owner drains the channel on its own thread, so ticks are applied in
//! arrival order alongside pointer input.
//!
//! At most one timer task is alive at any time. Every start bumps a
//! generation counter and ticks carry the generation they were produced
//! under, so a tick that was already queued when the timer got restarted is
//! recognised as stale and dropped.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

// Ticks beyond this are dropped instead of queued up
const TICK_BUFFER: usize = 16;

/// Auto-advance settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoAdvanceSettings {
    pub enabled: bool,
    pub interval_ms: u64,
}

impl Default for AutoAdvanceSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_ms: 2200,
        }
    }
}

impl AutoAdvanceSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(1))
    }
}

/// One scheduled advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoTick {
    pub generation: u64,
}

#[derive(Debug)]
struct RunningTimer {
    interval: Duration,
    generation: u64,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

/// Owner of the (single) auto-advance task
#[derive(Debug)]
pub struct AutoAdvanceTimer {
    runtime: Handle,
    tick_sender: mpsc::Sender<AutoTick>,
    tick_receiver: mpsc::Receiver<AutoTick>,
    running: Option<RunningTimer>,
    generation: u64,
}

impl AutoAdvanceTimer {
    /// Creates a stopped timer bound to the current tokio runtime.
    ///
    /// Panics when called outside a runtime, like `tokio::spawn`.
    pub fn new() -> Self {
        Self::with_runtime(Handle::current())
    }

    pub fn with_runtime(runtime: Handle) -> Self {
        let (tick_sender, tick_receiver) = mpsc::channel(TICK_BUFFER);
        Self {
            runtime,
            tick_sender,
            tick_receiver,
            running: None,
            generation: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    pub fn interval(&self) -> Option<Duration> {
        self.running.as_ref().map(|timer| timer.interval)
    }

    /// Starts ticking every `interval`, first tick one interval from now.
    ///
    /// Starting with the interval already in use is a no-op. Any other
    /// running timer is stopped first.
    pub fn start(&mut self, interval: Duration) {
        if self.interval() == Some(interval) {
            debug!("Auto-advance already running every {:?}", interval);
            return;
        }
        self.stop();
        self.spawn(interval);
    }

    /// Stops the running timer, if any. Pending ticks become stale.
    pub fn stop(&mut self) {
        if let Some(timer) = self.running.take() {
            info!(
                "Stopping auto-advance timer (generation {})",
                timer.generation
            );
            timer.cancel.cancel();
            timer.task.abort();
        }
    }

    /// Restarts the running timer so the next tick is a full interval away.
    pub fn restart(&mut self) {
        if let Some(interval) = self.interval() {
            debug!("Restarting auto-advance timer");
            self.stop();
            self.spawn(interval);
        }
    }

    /// Drains queued ticks and returns how many belong to the live timer.
    pub fn take_due_ticks(&mut self) -> usize {
        let mut due = 0;
        while let Ok(tick) = self.tick_receiver.try_recv() {
            if self.is_current(&tick) {
                due += 1;
            } else {
                debug!(
                    "Dropping stale tick from generation {} (current {})",
                    tick.generation, self.generation
                );
            }
        }
        due
    }

    fn is_current(&self, tick: &AutoTick) -> bool {
        self.running.is_some() && tick.generation == self.generation
    }

    fn spawn(&mut self, interval: Duration) {
        self.generation += 1;
        let generation = self.generation;
        let cancel = CancellationToken::new();
        let sender = self.tick_sender.clone();

        info!(
            "Starting auto-advance timer every {} ms (generation {})",
            interval.as_millis(),
            generation
        );
        let task = self
            .runtime
            .spawn(run_tick_loop(interval, generation, sender, cancel.clone()));

        self.running = Some(RunningTimer {
            interval,
            generation,
            cancel,
            task,
        });
    }
}

impl Drop for AutoAdvanceTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_tick_loop(
    period: Duration,
    generation: u64,
    sender: mpsc::Sender<AutoTick>,
    cancel: CancellationToken,
) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Auto-advance task {} cancelled", generation);
                break;
            }
            _ = ticker.tick() => {
                debug!(
                    "Auto-advance tick at {} (generation {})",
                    Local::now().format("%H:%M:%S.%3f"),
                    generation
                );
                match sender.try_send(AutoTick { generation }) {
                    Ok(()) => {}
                    Err(mpsc::error::TrySendError::Full(_)) => {
                        warn!("Auto-advance tick dropped, consumer is not keeping up");
                    }
                    Err(mpsc::error::TrySendError::Closed(_)) => {
                        debug!("Tick receiver gone, ending auto-advance task");
                        break;
                    }
                }
            }
        }
    }
}
