//! Debounced scroll-to-bottom trigger.
//!
//! Coalesces a burst of geometry changes into one action: every qualifying
//! change cancels the pending timer and schedules a fresh one, so the
//! action fires once the changes have been quiet for the full period.

use crate::host::{Millis, Scheduler, TimerHandle};

/// At most one outstanding quiet-period timer.
#[derive(Debug, Default)]
pub struct DebouncedTrigger {
    pending: Option<TimerHandle>,
}

impl DebouncedTrigger {
    /// A trigger with nothing scheduled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a timer is outstanding.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Cancel any pending timer and schedule a new one `quiet_period` out.
    ///
    /// Last write wins: the quiet window restarts on every call.
    pub fn schedule<S: Scheduler>(&mut self, sched: &mut S, quiet_period: Millis) {
        if let Some(stale) = self.pending.take() {
            sched.clear_timeout(stale);
        }
        self.pending = Some(sched.set_timeout(quiet_period));
    }

    /// Report a fired timer. Returns true (and clears the pending
    /// reference) only when `handle` is the currently scheduled timer;
    /// stale handles are ignored.
    pub fn fired(&mut self, handle: TimerHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Cancel the pending timer, if any. Safe to call repeatedly.
    pub fn cancel<S: Scheduler>(&mut self, sched: &mut S) {
        if let Some(handle) = self.pending.take() {
            sched.clear_timeout(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_harness::SimScheduler;

    #[test]
    fn schedule_sets_one_pending_timer() {
        let mut sched = SimScheduler::new();
        let mut trigger = DebouncedTrigger::new();

        trigger.schedule(&mut sched, 20);

        assert!(trigger.is_pending());
        assert_eq!(sched.pending_timers(), 1);
    }

    #[test]
    fn reschedule_cancels_the_prior_timer() {
        let mut sched = SimScheduler::new();
        let mut trigger = DebouncedTrigger::new();

        trigger.schedule(&mut sched, 20);
        trigger.schedule(&mut sched, 20);
        trigger.schedule(&mut sched, 20);

        assert_eq!(sched.pending_timers(), 1);
        assert_eq!(sched.cancelled_timers().len(), 2);
    }

    #[test]
    fn fired_accepts_only_the_current_handle() {
        let mut sched = SimScheduler::new();
        let mut trigger = DebouncedTrigger::new();

        trigger.schedule(&mut sched, 20);
        let first = sched.last_timer().unwrap();
        trigger.schedule(&mut sched, 20);
        let second = sched.last_timer().unwrap();

        assert!(!trigger.fired(first), "stale handle must be ignored");
        assert!(trigger.fired(second));
        assert!(!trigger.is_pending());
    }

    #[test]
    fn fired_twice_reports_false_the_second_time() {
        let mut sched = SimScheduler::new();
        let mut trigger = DebouncedTrigger::new();

        trigger.schedule(&mut sched, 20);
        let handle = sched.last_timer().unwrap();

        assert!(trigger.fired(handle));
        assert!(!trigger.fired(handle));
    }

    #[test]
    fn cancel_clears_pending_and_is_idempotent() {
        let mut sched = SimScheduler::new();
        let mut trigger = DebouncedTrigger::new();

        trigger.schedule(&mut sched, 20);
        let handle = sched.last_timer().unwrap();

        trigger.cancel(&mut sched);
        trigger.cancel(&mut sched);

        assert!(!trigger.is_pending());
        assert_eq!(sched.cancelled_timers(), &[handle]);
    }
}
