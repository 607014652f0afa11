//! Deterministic simulated host for follow-core tests.
//!
//! [`SimViewport`] is a clamping scroll box; [`SimScheduler`] is a manual
//! clock with due-event queues for timers and frames that records every
//! cancellation. [`run_until`] pumps due events into a session in timestamp
//! order, which makes the full mutation → debounce → animation → settle
//! pipeline replayable at exact millisecond boundaries.

use crate::follow::FollowSession;
use crate::host::{FrameHandle, Millis, Scheduler, ScrollViewport, TimerHandle};

/// Interval between a frame request and its callback, mirroring a 60 Hz
/// host repaint cadence.
pub const FRAME_INTERVAL: Millis = 16;

/// In-memory scroll geometry with clamped writes.
#[derive(Debug, Clone)]
pub struct SimViewport {
    scroll_top: f64,
    content_height: f64,
    viewport_height: f64,
    writes: usize,
}

impl SimViewport {
    /// A viewport at `scroll_top` over `content_height` of content, showing
    /// `viewport_height` of it.
    pub fn new(scroll_top: f64, content_height: f64, viewport_height: f64) -> Self {
        Self {
            scroll_top,
            content_height,
            viewport_height,
            writes: 0,
        }
    }

    /// Grow (or shrink, with a negative delta) the content.
    pub fn grow_content(&mut self, delta: f64) {
        self.content_height = (self.content_height + delta).max(0.0);
        // Mirror a real scroll box: the offset cannot outlive the content
        // it pointed into.
        self.scroll_top = self.scroll_top.min(self.max_offset());
    }

    /// Replace the content height outright.
    pub fn set_content_height(&mut self, height: f64) {
        self.content_height = height.max(0.0);
        self.scroll_top = self.scroll_top.min(self.max_offset());
    }

    /// Number of offset writes that went through `set_scroll_top`.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    fn max_offset(&self) -> f64 {
        (self.content_height - self.viewport_height).max(0.0)
    }
}

impl ScrollViewport for SimViewport {
    fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    fn set_scroll_top(&mut self, offset: f64) {
        self.scroll_top = offset.clamp(0.0, self.max_offset());
        self.writes += 1;
    }

    fn content_height(&self) -> f64 {
        self.content_height
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }
}

/// A due callback popped from the [`SimScheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    /// A one-shot timer reached its deadline.
    Timer(TimerHandle),
    /// A requested frame came due.
    Frame(FrameHandle),
}

/// Manual-clock scheduler with observable cancellations.
#[derive(Debug, Default)]
pub struct SimScheduler {
    now: Millis,
    next_handle: u64,
    timers: Vec<(TimerHandle, Millis)>,
    frames: Vec<(FrameHandle, Millis)>,
    cancelled_timers: Vec<TimerHandle>,
    cancelled_frames: Vec<FrameHandle>,
    scheduled_timers: Vec<TimerHandle>,
    max_concurrent_frames: usize,
}

impl SimScheduler {
    /// A scheduler at time zero with empty queues.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock. Never goes backwards.
    pub fn set_now(&mut self, now: Millis) {
        debug_assert!(now >= self.now, "simulated clock ran backwards");
        self.now = now;
    }

    /// Timers currently waiting for their deadline.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Frames currently waiting to fire.
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Every timer cancelled so far, in cancellation order.
    pub fn cancelled_timers(&self) -> &[TimerHandle] {
        &self.cancelled_timers
    }

    /// Every frame cancelled so far, in cancellation order.
    pub fn cancelled_frames(&self) -> &[FrameHandle] {
        &self.cancelled_frames
    }

    /// Total timers ever scheduled.
    pub fn scheduled_timer_count(&self) -> usize {
        self.scheduled_timers.len()
    }

    /// The most recently scheduled timer.
    pub fn last_timer(&self) -> Option<TimerHandle> {
        self.scheduled_timers.last().copied()
    }

    /// High-water mark of simultaneously pending frames. A follow session
    /// must never push this above one.
    pub fn max_concurrent_frames(&self) -> usize {
        self.max_concurrent_frames
    }

    /// Pop the earliest pending frame regardless of deadline, advancing
    /// nothing.
    pub fn pop_frame(&mut self) -> Option<(Millis, FrameHandle)> {
        let index = self
            .frames
            .iter()
            .enumerate()
            .min_by_key(|&(_, &(_, due))| due)
            .map(|(i, _)| i)?;
        let (handle, due) = self.frames.remove(index);
        Some((due, handle))
    }

    /// Pop the earliest event due at or before `deadline`.
    ///
    /// Ties dispatch timers before frames, matching a host that runs its
    /// timer queue ahead of the repaint callbacks.
    pub fn pop_next_before(&mut self, deadline: Millis) -> Option<(Millis, SimEvent)> {
        let timer_due = self
            .timers
            .iter()
            .map(|&(_, due)| due)
            .min()
            .filter(|&due| due <= deadline);
        let frame_due = self
            .frames
            .iter()
            .map(|&(_, due)| due)
            .min()
            .filter(|&due| due <= deadline);

        match (timer_due, frame_due) {
            (Some(t), Some(f)) if f < t => self.pop_frame_due(f),
            (Some(t), _) => self.pop_timer_due(t),
            (None, Some(f)) => self.pop_frame_due(f),
            (None, None) => None,
        }
    }

    fn pop_timer_due(&mut self, due: Millis) -> Option<(Millis, SimEvent)> {
        let index = self.timers.iter().position(|&(_, d)| d == due)?;
        let (handle, _) = self.timers.remove(index);
        Some((due, SimEvent::Timer(handle)))
    }

    fn pop_frame_due(&mut self, due: Millis) -> Option<(Millis, SimEvent)> {
        let index = self.frames.iter().position(|&(_, d)| d == due)?;
        let (handle, _) = self.frames.remove(index);
        Some((due, SimEvent::Frame(handle)))
    }
}

impl Scheduler for SimScheduler {
    fn now(&self) -> Millis {
        self.now
    }

    fn set_timeout(&mut self, delay: Millis) -> TimerHandle {
        let handle = TimerHandle::new(self.next_handle);
        self.next_handle += 1;
        self.timers.push((handle, self.now + delay));
        self.scheduled_timers.push(handle);
        handle
    }

    fn clear_timeout(&mut self, handle: TimerHandle) {
        let before = self.timers.len();
        self.timers.retain(|&(h, _)| h != handle);
        if self.timers.len() < before {
            self.cancelled_timers.push(handle);
        }
    }

    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle::new(self.next_handle);
        self.next_handle += 1;
        self.frames.push((handle, self.now + FRAME_INTERVAL));
        self.max_concurrent_frames = self.max_concurrent_frames.max(self.frames.len());
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let before = self.frames.len();
        self.frames.retain(|&(h, _)| h != handle);
        if self.frames.len() < before {
            self.cancelled_frames.push(handle);
        }
    }
}

/// Pump every event due at or before `deadline` into the session, in
/// timestamp order, then leave the clock at `deadline`.
///
/// Returns the dispatched events for assertions on how often each kind
/// fired.
pub fn run_until(
    session: &mut FollowSession,
    view: &mut SimViewport,
    sched: &mut SimScheduler,
    deadline: Millis,
) -> Vec<(Millis, SimEvent)> {
    let mut log = Vec::new();
    while let Some((at, event)) = sched.pop_next_before(deadline) {
        sched.set_now(at);
        match event {
            SimEvent::Timer(handle) => session.timer_fired(handle, view, sched),
            SimEvent::Frame(handle) => session.frame(handle, view, sched),
        }
        log.push((at, event));
    }
    sched.set_now(deadline);
    log
}
