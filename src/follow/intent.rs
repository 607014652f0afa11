//! User scroll intent tracking: the pause/resume state machine.
//!
//! Two states, `Following` and `Paused`, with transitions decided only on
//! scroll events the session has already attributed to the user (the
//! session never forwards animator-driven offset writes here; that gate is
//! what prevents the animation from pausing itself).
//!
//! A second filter runs inside the tracker: a scroll event only drives a
//! transition when it arrives within the gesture window of the previous
//! event AND the offset actually moved against the recorded baseline.
//! Isolated events are treated as noise and merely refresh the baselines,
//! so a sustained gesture (two or more events inside the window) is needed
//! to change state.

use crate::host::Millis;

/// Whether auto-follow is live or suspended by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowState {
    /// Content growth triggers an animated scroll to the bottom.
    Following,
    /// The viewer scrolled away; growth is ignored until they return.
    Paused,
}

impl Default for FollowState {
    fn default() -> Self {
        Self::Following
    }
}

/// One observed scroll event, as read from the viewport when it fired.
#[derive(Debug, Clone, Copy)]
pub struct ScrollSample {
    /// Scroll offset at the time of the event.
    pub offset: f64,
    /// Total content height at the time of the event.
    pub content_height: f64,
    /// Visible viewport height at the time of the event.
    pub viewport_height: f64,
    /// Event timestamp on the host clock.
    pub timestamp: Millis,
}

impl ScrollSample {
    /// Whether the viewport bottom sits at the content bottom, within
    /// `threshold` of tolerance.
    pub fn at_bottom(&self, threshold: f64) -> bool {
        self.offset + self.viewport_height >= self.content_height - threshold
    }
}

/// Tracks user scroll intent across events.
#[derive(Debug, Default)]
pub struct IntentTracker {
    state: FollowState,
    previous_scroll_top: f64,
    last_event_stamp: Option<Millis>,
}

impl IntentTracker {
    /// A tracker in `Following` with a zeroed offset baseline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> FollowState {
        self.state
    }

    /// Whether auto-follow is suspended.
    pub fn is_paused(&self) -> bool {
        self.state == FollowState::Paused
    }

    /// The offset baseline used for user attribution.
    pub fn previous_scroll_top(&self) -> f64 {
        self.previous_scroll_top
    }

    /// Observe one user-attributable scroll event and return the resulting
    /// state.
    ///
    /// Must only be called when no animation is running; the caller owns
    /// that gate. `threshold` is the at-bottom tolerance band and
    /// `gesture_window` the maximum gap between two events of one gesture.
    pub fn observe(
        &mut self,
        sample: ScrollSample,
        threshold: f64,
        gesture_window: Millis,
    ) -> FollowState {
        let in_gesture = self
            .last_event_stamp
            .is_some_and(|previous| sample.timestamp.saturating_sub(previous) < gesture_window);
        let moved = sample.offset != self.previous_scroll_top;

        if in_gesture && moved {
            self.state = if sample.at_bottom(threshold) {
                FollowState::Following
            } else {
                FollowState::Paused
            };
        }

        self.previous_scroll_top = sample.offset;
        self.last_event_stamp = Some(sample.timestamp);
        self.state
    }

    /// Record the offset a finished animation achieved.
    ///
    /// Resets the baseline so the next genuine user action is measured
    /// against the settled position rather than the pre-animation one.
    pub fn settle(&mut self, offset: f64) {
        self.previous_scroll_top = offset;
    }

    /// Host-initiated state override (key bindings, initial configuration).
    pub fn force(&mut self, state: FollowState) {
        self.state = state;
    }
}
