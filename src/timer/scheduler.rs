//! Tick sources for the countdown timer.
//!
//! The timer never sleeps on its own. It asks a [`TickScheduler`] for a
//! recurring tick and receives a [`TickHandle`]; whoever drives the timer
//! feeds fired handles back through [`CountdownTimer::on_tick`].
//!
//! - [`TokioTickScheduler`]: wall-clock ticks from a tokio interval task,
//!   delivered over an mpsc channel.
//! - [`ManualTickScheduler`]: simulated time for deterministic tests.
//!
//! [`CountdownTimer::on_tick`]: super::CountdownTimer::on_tick

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, trace};

/// Shortest period a scheduler will honour.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Identifies one scheduled tick source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickHandle(u64);

impl TickHandle {
    /// Returns the raw id.
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Capability to schedule and cancel recurring ticks.
pub trait TickScheduler: Send {
    /// Schedules a tick every `period`, first firing one period from now.
    fn schedule(&mut self, period: Duration) -> TickHandle;

    /// Cancels a scheduled tick source. Unknown handles are ignored.
    fn cancel(&mut self, handle: TickHandle);
}

// ============================================================================
// TokioTickScheduler
// ============================================================================

/// Wall-clock scheduler backed by tokio interval tasks.
///
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct TokioTickScheduler {
    tick_tx: mpsc::UnboundedSender<TickHandle>,
    tasks: HashMap<TickHandle, JoinHandle<()>>,
    next_id: u64,
}

impl TokioTickScheduler {
    /// Creates a scheduler and the receiver on which fired handles arrive.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TickHandle>) {
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            tick_tx,
            tasks: HashMap::new(),
            next_id: 0,
        };
        (scheduler, tick_rx)
    }

    /// Returns the number of live tick tasks.
    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }
}

impl TickScheduler for TokioTickScheduler {
    fn schedule(&mut self, period: Duration) -> TickHandle {
        let period = period.max(MIN_PERIOD);
        let handle = TickHandle(self.next_id);
        self.next_id += 1;

        let tick_tx = self.tick_tx.clone();
        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                if tick_tx.send(handle).is_err() {
                    break;
                }
            }
        });

        debug!(handle = handle.id(), ?period, "Tick task spawned");
        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
            debug!(handle = handle.id(), "Tick task aborted");
        }
    }
}

impl Drop for TokioTickScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

// ============================================================================
// ManualTickScheduler
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct ManualSchedule {
    period: Duration,
    next_due: Duration,
}

#[derive(Debug, Default)]
struct ManualClock {
    now: Duration,
    next_id: u64,
    scheduled_total: usize,
    active: BTreeMap<TickHandle, ManualSchedule>,
}

/// Simulated-time scheduler.
///
/// Cloning yields another handle onto the same clock, so a test can keep a
/// copy while the timer owns the other.
#[derive(Debug, Clone, Default)]
pub struct ManualTickScheduler {
    clock: Arc<Mutex<ManualClock>>,
}

impl ManualTickScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn clock(&self) -> MutexGuard<'_, ManualClock> {
        self.clock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Moves simulated time forward and returns every tick that came due,
    /// in firing order.
    pub fn advance(&self, elapsed: Duration) -> Vec<TickHandle> {
        let mut clock = self.clock();
        let target = clock.now + elapsed;
        let mut fired = Vec::new();

        loop {
            let due = clock
                .active
                .iter()
                .filter(|(_, schedule)| schedule.next_due <= target)
                .min_by_key(|(handle, schedule)| (schedule.next_due, **handle))
                .map(|(handle, _)| *handle);

            let Some(handle) = due else { break };
            if let Some(schedule) = clock.active.get_mut(&handle) {
                schedule.next_due += schedule.period;
            }
            fired.push(handle);
        }

        clock.now = target;
        trace!(fired = fired.len(), now = ?clock.now, "Simulated clock advanced");
        fired
    }

    /// Returns the current simulated time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock().now
    }

    /// Returns the number of tick sources currently scheduled.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.clock().active.len()
    }

    /// Returns how many tick sources were ever scheduled.
    #[must_use]
    pub fn scheduled_total(&self) -> usize {
        self.clock().scheduled_total
    }

    /// Returns true if `handle` is still scheduled.
    #[must_use]
    pub fn is_active(&self, handle: TickHandle) -> bool {
        self.clock().active.contains_key(&handle)
    }
}

impl TickScheduler for ManualTickScheduler {
    fn schedule(&mut self, period: Duration) -> TickHandle {
        let period = period.max(MIN_PERIOD);
        let mut clock = self.clock();
        let handle = TickHandle(clock.next_id);
        clock.next_id += 1;
        clock.scheduled_total += 1;

        let next_due = clock.now + period;
        clock.active.insert(handle, ManualSchedule { period, next_due });
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.clock().active.remove(&handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    mod manual_scheduler_tests {
        use super::*;

        #[test]
        fn test_first_tick_after_one_period() {
            let mut scheduler = ManualTickScheduler::new();
            let handle = scheduler.schedule(SECOND);

            assert!(scheduler.advance(Duration::from_millis(999)).is_empty());
            assert_eq!(scheduler.advance(Duration::from_millis(1)), vec![handle]);
        }

        #[test]
        fn test_advance_fires_once_per_period() {
            let mut scheduler = ManualTickScheduler::new();
            let handle = scheduler.schedule(SECOND);

            let fired = scheduler.advance(Duration::from_millis(3500));
            assert_eq!(fired, vec![handle; 3]);
            assert_eq!(scheduler.now(), Duration::from_millis(3500));
        }

        #[test]
        fn test_cancel_stops_ticks() {
            let mut scheduler = ManualTickScheduler::new();
            let handle = scheduler.schedule(SECOND);
            scheduler.cancel(handle);

            assert!(scheduler.advance(SECOND * 10).is_empty());
            assert!(!scheduler.is_active(handle));
            assert_eq!(scheduler.active_count(), 0);
            assert_eq!(scheduler.scheduled_total(), 1);
        }

        #[test]
        fn test_cancel_unknown_handle_is_ignored() {
            let mut scheduler = ManualTickScheduler::new();
            let handle = scheduler.schedule(SECOND);
            scheduler.cancel(handle);
            scheduler.cancel(handle);
            assert_eq!(scheduler.active_count(), 0);
        }

        #[test]
        fn test_handles_are_unique() {
            let mut scheduler = ManualTickScheduler::new();
            let first = scheduler.schedule(SECOND);
            scheduler.cancel(first);
            let second = scheduler.schedule(SECOND);
            assert_ne!(first, second);
        }

        #[test]
        fn test_interleaved_schedules_fire_in_time_order() {
            let mut scheduler = ManualTickScheduler::new();
            let slow = scheduler.schedule(SECOND * 2);
            let fast = scheduler.schedule(SECOND);

            let fired = scheduler.advance(SECOND * 4);
            // Ties go to the older schedule.
            assert_eq!(fired, vec![fast, slow, fast, fast, slow, fast]);
        }

        #[test]
        fn test_clones_share_the_clock() {
            let scheduler = ManualTickScheduler::new();
            let mut owned = scheduler.clone();
            owned.schedule(SECOND);

            assert_eq!(scheduler.active_count(), 1);
            assert_eq!(scheduler.advance(SECOND).len(), 1);
        }
    }

    mod tokio_scheduler_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_ticks_once_per_period() {
            let (mut scheduler, mut rx) = TokioTickScheduler::new();
            let handle = scheduler.schedule(SECOND);

            tokio::time::sleep(Duration::from_millis(3500)).await;

            let mut ticks = Vec::new();
            while let Ok(fired) = rx.try_recv() {
                ticks.push(fired);
            }
            assert_eq!(ticks, vec![handle; 3]);
        }

        #[tokio::test(start_paused = true)]
        async fn test_cancel_aborts_task() {
            let (mut scheduler, mut rx) = TokioTickScheduler::new();
            let handle = scheduler.schedule(SECOND);
            assert_eq!(scheduler.active_count(), 1);

            scheduler.cancel(handle);
            assert_eq!(scheduler.active_count(), 0);

            tokio::time::sleep(Duration::from_secs(3)).await;
            assert!(rx.try_recv().is_err());
        }
    }
}
