//! Frame-loop scroll animator.
//!
//! Runs an eased interpolation from a captured start offset toward the
//! content bottom, one frame callback at a time. The target may move while
//! the animation is in flight (content keeps growing): retargeting updates
//! the destination without restarting the elapsed-time base and without
//! spawning a second frame chain.

use super::tween;
use crate::host::{FrameHandle, Millis, Scheduler, ScrollViewport};

/// State of one in-flight interpolation.
#[derive(Debug, Clone, Copy)]
pub struct Animation {
    /// Clock time when the interpolation started.
    pub started_at: Millis,
    /// Offset captured at start.
    pub start_offset: f64,
    /// Destination offset; may be rewritten mid-flight.
    pub target_offset: f64,
    /// The currently scheduled frame callback.
    pub frame: FrameHandle,
}

/// Outcome of one frame step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// Wrote an eased offset and scheduled the next frame.
    Advanced,
    /// Reached the target; the loop stopped at `offset`.
    Finished {
        /// The offset the viewport actually settled at.
        offset: f64,
    },
    /// The handle did not belong to the active loop; nothing happened.
    Stale,
}

/// Owns the optional in-flight animation.
#[derive(Debug, Default)]
pub struct Animator {
    active: Option<Animation>,
}

impl Animator {
    /// An idle animator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a frame loop is running.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// The in-flight animation, if any.
    pub fn animation(&self) -> Option<&Animation> {
        self.active.as_ref()
    }

    /// Aim at `target`: start a frame loop if idle, else retarget the one
    /// already running.
    pub fn aim<V, S>(&mut self, target: f64, view: &V, sched: &mut S)
    where
        V: ScrollViewport,
        S: Scheduler,
    {
        match self.active.as_mut() {
            Some(animation) => animation.target_offset = target,
            None => {
                self.active = Some(Animation {
                    started_at: sched.now(),
                    start_offset: view.scroll_top(),
                    target_offset: target,
                    frame: sched.request_frame(),
                });
            }
        }
    }

    /// Execute one frame of the loop.
    ///
    /// While `floor(offset)` has not reached the target, writes the eased
    /// position (clamped so it never overshoots) and schedules the next
    /// frame. Once the floor of the actual offset is at or past the
    /// target, the loop stops and reports the settled offset.
    pub fn step<V, S>(
        &mut self,
        handle: FrameHandle,
        view: &mut V,
        sched: &mut S,
        duration: Millis,
    ) -> StepOutcome
    where
        V: ScrollViewport,
        S: Scheduler,
    {
        let Some(animation) = self.active.as_mut() else {
            return StepOutcome::Stale;
        };
        if animation.frame != handle {
            return StepOutcome::Stale;
        }

        let position = view.scroll_top();
        if position.floor() < animation.target_offset {
            let elapsed = sched.now().saturating_sub(animation.started_at);
            let eased = tween::ease_in_out_cubic(
                elapsed as f64,
                animation.start_offset,
                animation.target_offset - animation.start_offset,
                duration as f64,
            );
            view.set_scroll_top(eased.min(animation.target_offset));
            animation.frame = sched.request_frame();
            StepOutcome::Advanced
        } else {
            self.active = None;
            StepOutcome::Finished { offset: position }
        }
    }

    /// Cancel the in-flight animation, if any. Safe to call repeatedly.
    pub fn cancel<S: Scheduler>(&mut self, sched: &mut S) {
        if let Some(animation) = self.active.take() {
            sched.cancel_frame(animation.frame);
        }
    }
}
