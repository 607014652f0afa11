//! Auto-follow scroll reconciliation.
//!
//! [`FollowSession`] keeps a scrollable viewport pinned to its bottom edge
//! while content grows, unless the viewer has scrolled away. The host feeds
//! it four kinds of callbacks (content mutations, scroll events, fired
//! timers, and animation frames) and it drives the viewport back to the
//! bottom through a debounced, eased frame loop.
//!
//! The flow: a content mutation that changed the total height schedules a
//! debounced trigger; when the quiet period elapses the trigger starts (or
//! retargets) the scroll animation; each frame writes an eased offset until
//! the bottom is reached. Scroll events feed the intent tracker, which
//! pauses the whole pipeline when the viewer scrolls away from the bottom
//! and resumes it when they scroll back.
//!
//! The one invariant everything else hangs off: an offset change observed
//! while the animator is running is the animator's own write, and must
//! never be read back as user intent. `scroll_event` checks for a live
//! animation before consulting the tracker, which is what keeps the
//! animation from pausing itself mid-scroll.

pub mod animator;
pub mod debounce;
pub mod intent;
pub mod tween;

pub use intent::{FollowState, IntentTracker, ScrollSample};

use crate::host::{FrameHandle, Millis, Scheduler, ScrollViewport, TimerHandle};
use animator::{Animator, StepOutcome};
use debounce::DebouncedTrigger;
use tracing::{debug, trace};

/// Tuning for one follow session. Times are in milliseconds.
#[derive(Debug, Clone, Copy)]
pub struct FollowOptions {
    /// How close to the bottom still counts as "at bottom" for the
    /// pause/resume decision. `0.0` demands exact contact.
    pub bottom_threshold: f64,
    /// Quiet period a burst of content mutations must respect before one
    /// scroll-to-bottom fires.
    pub debounce: Millis,
    /// Duration of the eased scroll animation.
    pub duration: Millis,
    /// Maximum gap between two scroll events of one continuous gesture.
    pub gesture_window: Millis,
}

impl Default for FollowOptions {
    fn default() -> Self {
        Self {
            bottom_threshold: 150.0,
            debounce: 20,
            duration: 500,
            gesture_window: 50,
        }
    }
}

/// The mutable state of one mounted auto-follow instance.
///
/// Created on mount, torn down on unmount; every entry point is a silent
/// no-op after [`FollowSession::teardown`], so late host callbacks cannot
/// touch a dead session.
#[derive(Debug)]
pub struct FollowSession {
    options: FollowOptions,
    intent: IntentTracker,
    trigger: DebouncedTrigger,
    animator: Animator,
    previous_scroll_height: f64,
    torn_down: bool,
}

impl FollowSession {
    /// A live session with the given tuning.
    pub fn new(options: FollowOptions) -> Self {
        Self {
            options,
            intent: IntentTracker::new(),
            trigger: DebouncedTrigger::new(),
            animator: Animator::new(),
            previous_scroll_height: 0.0,
            torn_down: false,
        }
    }

    /// The tuning this session runs with.
    pub fn options(&self) -> &FollowOptions {
        &self.options
    }

    /// Whether auto-follow is suspended by the viewer.
    pub fn is_paused(&self) -> bool {
        self.intent.is_paused()
    }

    /// Whether a scroll animation is in flight.
    pub fn is_animating(&self) -> bool {
        self.animator.is_active()
    }

    /// Current pause/follow state.
    pub fn state(&self) -> FollowState {
        self.intent.state()
    }

    /// Whether a debounce timer is outstanding.
    pub fn has_pending_trigger(&self) -> bool {
        self.trigger.is_pending()
    }

    /// Content-mutation callback: anything changed inside the content box.
    ///
    /// Re-derives from current geometry rather than from change records.
    /// While paused this is suppressed outright: the stale
    /// `previous_scroll_height` is kept on purpose, so the first mutation
    /// check after a resume still sees the growth that happened meanwhile.
    pub fn content_mutated<V, S>(&mut self, view: &V, sched: &mut S)
    where
        V: ScrollViewport,
        S: Scheduler,
    {
        if self.torn_down || self.intent.is_paused() {
            return;
        }

        let height = view.content_height();
        if height != self.previous_scroll_height {
            self.previous_scroll_height = height;
            self.trigger.schedule(sched, self.options.debounce);
            debug!(height, "content height changed, trigger rescheduled");
        }
    }

    /// Fired-timer callback from the host. Stale handles are ignored.
    pub fn timer_fired<V, S>(&mut self, handle: TimerHandle, view: &V, sched: &mut S)
    where
        V: ScrollViewport,
        S: Scheduler,
    {
        if self.torn_down || !self.trigger.fired(handle) {
            return;
        }
        self.scroll_to_bottom(view, sched);
    }

    /// Start (or retarget) the animated scroll to the content bottom.
    ///
    /// Always recomputes the target from current geometry, so calling this
    /// mid-animation moves the destination without restarting the elapsed
    /// base and without a second frame loop. Any still-pending debounce
    /// timer is cancelled: its work is being done right now.
    pub fn scroll_to_bottom<V, S>(&mut self, view: &V, sched: &mut S)
    where
        V: ScrollViewport,
        S: Scheduler,
    {
        if self.torn_down {
            return;
        }

        self.trigger.cancel(sched);
        let bottom = (view.content_height() - view.viewport_height()).max(0.0);
        let retargeting = self.animator.is_active();
        self.animator.aim(bottom, view, sched);
        if retargeting {
            trace!(to = bottom, "retargeted in-flight scroll");
        } else {
            debug!(to = bottom, from = view.scroll_top(), "scroll animation started");
        }
    }

    /// Animation-frame callback from the host. Stale handles are ignored.
    pub fn frame<V, S>(&mut self, handle: FrameHandle, view: &mut V, sched: &mut S)
    where
        V: ScrollViewport,
        S: Scheduler,
    {
        if self.torn_down {
            return;
        }

        match self
            .animator
            .step(handle, view, sched, self.options.duration)
        {
            StepOutcome::Finished { offset } => {
                // The settled offset becomes the attribution baseline, so
                // the next real user action is measured against it.
                self.intent.settle(offset);
                debug!(offset, "scroll animation settled");
            }
            StepOutcome::Advanced | StepOutcome::Stale => {}
        }
    }

    /// Scroll-event callback from the host, with the event's timestamp.
    ///
    /// While an animation is running the offset changes are self-inflicted
    /// and the event is dropped before it reaches the intent tracker.
    pub fn scroll_event<V: ScrollViewport>(&mut self, view: &V, timestamp: Millis) {
        if self.torn_down || self.animator.is_active() {
            return;
        }

        let before = self.intent.state();
        let after = self.intent.observe(
            ScrollSample {
                offset: view.scroll_top(),
                content_height: view.content_height(),
                viewport_height: view.viewport_height(),
                timestamp,
            },
            self.options.bottom_threshold,
            self.options.gesture_window,
        );
        if before != after {
            debug!(?before, ?after, "follow state changed");
        }
    }

    /// Host-initiated pause, independent of any scroll gesture.
    ///
    /// Used by hosts that start detached from the tail or bind an explicit
    /// "stop following" action.
    pub fn pause(&mut self) {
        self.intent.force(FollowState::Paused);
        debug!("follow paused by host");
    }

    /// Host-initiated resume: re-enter `Following` and animate back to the
    /// content bottom.
    pub fn resume<V, S>(&mut self, view: &V, sched: &mut S)
    where
        V: ScrollViewport,
        S: Scheduler,
    {
        if self.torn_down {
            return;
        }
        self.intent.force(FollowState::Following);
        self.scroll_to_bottom(view, sched);
    }

    /// Release every scheduled resource and mark the session dead.
    ///
    /// Cancels the pending debounce timer and the in-flight frame, each
    /// individually guarded, so partial initialization and repeated
    /// teardown are both fine. The host disconnects its mutation observer
    /// and scroll listener around this call; afterwards any callback that
    /// still arrives is a no-op.
    pub fn teardown<S: Scheduler>(&mut self, sched: &mut S) {
        self.trigger.cancel(sched);
        self.animator.cancel(sched);
        self.torn_down = true;
        debug!("follow session torn down");
    }
}

impl Default for FollowSession {
    fn default() -> Self {
        Self::new(FollowOptions::default())
    }
}
