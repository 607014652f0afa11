//! Event-loop-backed scheduler.
//!
//! The TUI event loop owns the clock: each iteration it drains the timers
//! whose deadline has passed and the pending frame request, and dispatches
//! them into the follow session. There is no background thread; a timer
//! fires at the first loop tick on or after its deadline.

use super::{FrameHandle, Millis, Scheduler, TimerHandle};
use std::time::Instant;

/// Scheduler driven by an event loop's ticks.
///
/// Timers are kept unordered (there are at most a handful alive at once);
/// [`TickScheduler::take_due_timers`] returns them deadline-sorted. At most
/// one frame request is tracked: the session never requests a second frame
/// while one is pending, and a stray second request supersedes the first.
#[derive(Debug)]
pub struct TickScheduler {
    origin: Instant,
    next_handle: u64,
    timers: Vec<(TimerHandle, Millis)>,
    frame: Option<FrameHandle>,
}

impl TickScheduler {
    /// Create a scheduler whose clock starts at zero now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            next_handle: 0,
            timers: Vec::new(),
            frame: None,
        }
    }

    fn fresh_handle(&mut self) -> u64 {
        let raw = self.next_handle;
        self.next_handle += 1;
        raw
    }

    /// Remove and return every timer whose deadline is at or before now,
    /// ordered by deadline.
    pub fn take_due_timers(&mut self) -> Vec<TimerHandle> {
        let now = self.now();
        let mut due: Vec<(TimerHandle, Millis)> = Vec::new();
        self.timers.retain(|&(handle, deadline)| {
            if deadline <= now {
                due.push((handle, deadline));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|&(_, deadline)| deadline);
        due.into_iter().map(|(handle, _)| handle).collect()
    }

    /// Remove and return the pending frame request, if any.
    ///
    /// Frames have no deadline: one loop tick is one frame.
    pub fn take_frame(&mut self) -> Option<FrameHandle> {
        self.frame.take()
    }

    /// Whether any timer or frame is outstanding.
    pub fn has_pending(&self) -> bool {
        self.frame.is_some() || !self.timers.is_empty()
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for TickScheduler {
    fn now(&self) -> Millis {
        self.origin.elapsed().as_millis() as Millis
    }

    fn set_timeout(&mut self, delay: Millis) -> TimerHandle {
        let handle = TimerHandle::new(self.fresh_handle());
        let deadline = self.now() + delay;
        self.timers.push((handle, deadline));
        handle
    }

    fn clear_timeout(&mut self, handle: TimerHandle) {
        self.timers.retain(|&(h, _)| h != handle);
    }

    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle::new(self.fresh_handle());
        self.frame = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.frame == Some(handle) {
            self.frame = None;
        }
    }
}
