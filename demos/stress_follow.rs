//! Stress driver for follow-core profiling.
//!
//! Extracts the hot loop from benches/follow_benchmark.rs for flamegraph
//! profiling: repeated grow → debounce → animate → settle cycles plus a
//! large height-index relayout.
//!
//! Run with:
//!   cargo run --example stress_follow --release -- [iterations]
//!
//! Profile with cargo-flamegraph:
//!   cargo flamegraph --example stress_follow -- 10000

use tailpane::follow::{FollowOptions, FollowSession};
use tailpane::host::{FrameHandle, Millis, Scheduler, ScrollViewport, TimerHandle};
use tailpane::model::{LineBuffer, WrapMode};
use std::time::Instant;

struct StressPane {
    offset: f64,
    content: f64,
    viewport: f64,
}

impl ScrollViewport for StressPane {
    fn scroll_top(&self) -> f64 {
        self.offset
    }

    fn set_scroll_top(&mut self, offset: f64) {
        self.offset = offset.clamp(0.0, (self.content - self.viewport).max(0.0));
    }

    fn content_height(&self) -> f64 {
        self.content
    }

    fn viewport_height(&self) -> f64 {
        self.viewport
    }
}

#[derive(Default)]
struct StressHost {
    now: Millis,
    next: u64,
    timer: Option<(TimerHandle, Millis)>,
    frame: Option<FrameHandle>,
}

impl Scheduler for StressHost {
    fn now(&self) -> Millis {
        self.now
    }

    fn set_timeout(&mut self, delay: Millis) -> TimerHandle {
        let handle = TimerHandle::new(self.next);
        self.next += 1;
        self.timer = Some((handle, self.now + delay));
        handle
    }

    fn clear_timeout(&mut self, handle: TimerHandle) {
        if self.timer.map(|(h, _)| h) == Some(handle) {
            self.timer = None;
        }
    }

    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle::new(self.next);
        self.next += 1;
        self.frame = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.frame == Some(handle) {
            self.frame = None;
        }
    }
}

fn follow_cycle(session: &mut FollowSession, pane: &mut StressPane, host: &mut StressHost) {
    pane.content += 500.0;
    session.content_mutated(&*pane, host);

    loop {
        host.now += 16;
        let due = match host.timer {
            Some((handle, deadline)) if deadline <= host.now => {
                host.timer = None;
                Some(handle)
            }
            _ => None,
        };
        if let Some(timer) = due {
            session.timer_fired(timer, &*pane, host);
        }
        if let Some(frame) = host.frame.take() {
            session.frame(frame, pane, host);
        }
        if !session.is_animating() && !session.has_pending_trigger() {
            break;
        }
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let iterations: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(10_000);

    // Follow cycles.
    let mut pane = StressPane {
        offset: 0.0,
        content: 1_000.0,
        viewport: 300.0,
    };
    let mut host = StressHost::default();
    let mut session = FollowSession::new(FollowOptions::default());

    eprintln!("Running {iterations} follow cycles...");
    let start = Instant::now();
    for _ in 0..iterations {
        follow_cycle(&mut session, &mut pane, &mut host);
    }
    let elapsed = start.elapsed();
    eprintln!(
        "follow cycles: {:?} total, {:.2}us per cycle, final offset {}",
        elapsed,
        elapsed.as_micros() as f64 / iterations as f64,
        pane.offset
    );

    // Buffer relayout churn.
    let lines = 100_000usize;
    eprintln!("Relayouting a {lines}-line buffer...");
    let mut buffer = LineBuffer::new(120, WrapMode::Wrap);
    for i in 0..lines {
        buffer.push(format!("stress line {i} {}", "x".repeat(i % 200)));
    }

    let start = Instant::now();
    let mut width = 40u16;
    for _ in 0..20 {
        width = if width == 40 { 120 } else { 40 };
        buffer.relayout(width, WrapMode::Wrap);
    }
    eprintln!(
        "relayouts: {:?} total, final height {}",
        start.elapsed(),
        buffer.total_height()
    );
}
