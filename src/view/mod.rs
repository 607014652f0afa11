//! TUI shell around the follow core.
//!
//! The event loop is the host environment: it observes content mutations
//! (new lines from the source, wrap toggles, resizes) and reports them to
//! the session, forwards user scrolling with timestamps, and drains the
//! tick scheduler into the session's timer and frame callbacks.

pub mod pane;
pub mod viewport;

pub use pane::{FollowIndicator, FollowPane, FollowStatus};
pub use viewport::PaneViewport;

use crate::config::ResolvedConfig;
use crate::follow::FollowSession;
use crate::host::{Scheduler, ScrollViewport, TickScheduler};
use crate::model::{LineBuffer, WrapMode};
use crate::source::InputSource;
use crossterm::{
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
    Terminal,
};
use std::io::{self, Stdout};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Rows scrolled per mouse wheel notch.
const WHEEL_SCROLL_ROWS: f64 = 3.0;

/// Poll timeout while timers or an animation are outstanding.
const ACTIVE_TICK: Duration = Duration::from_millis(16);

/// Poll timeout when nothing is scheduled; keeps idle CPU low while still
/// picking up new source data promptly.
const IDLE_TICK: Duration = Duration::from_millis(200);

/// Errors that can occur during TUI operations.
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Input source error
    #[error("Input error: {0}")]
    Input(#[from] crate::source::InputError),
}

/// Main TUI application.
///
/// Generic over the backend to support testing with `TestBackend`.
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    buffer: LineBuffer,
    session: FollowSession,
    scheduler: TickScheduler,
    viewport: PaneViewport,
    input_source: InputSource,
    /// Content area of the last draw; scroll geometry derives from it.
    content_area: Rect,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize the application on the real terminal.
    ///
    /// Puts the terminal into raw mode with the alternate screen and mouse
    /// capture enabled.
    pub fn new(mut input_source: InputSource, config: &ResolvedConfig) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        let width = match terminal.size() {
            Ok(size) if size.width > 0 => size.width,
            _ => 80,
        };

        let initial_lines = input_source.poll()?;
        Ok(Self::assemble(
            terminal,
            input_source,
            initial_lines,
            width,
            config,
        ))
    }

    /// Run the main event loop. Returns when the user quits.
    ///
    /// Event-driven: redraws on user input, new source data, and while the
    /// scroll animation or a debounce timer is live; otherwise idles on a
    /// long poll.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        // The initial content landing in the pane is the mount mutation:
        // with follow enabled it kicks off the first scroll to the tail.
        self.sync_geometry();
        self.session
            .content_mutated(&self.viewport, &mut self.scheduler);

        loop {
            let timeout = if self.scheduler.has_pending() {
                ACTIVE_TICK
            } else {
                IDLE_TICK
            };

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            self.teardown();
                            return Ok(());
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    Event::Resize(width, _) => self.handle_resize(width),
                    _ => {}
                }
            }

            self.poll_input()?;
            self.pump_scheduler();
            self.draw()?;
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    fn assemble(
        terminal: Terminal<B>,
        input_source: InputSource,
        initial_lines: Vec<String>,
        width: u16,
        config: &ResolvedConfig,
    ) -> Self {
        let wrap = if config.line_wrap {
            WrapMode::Wrap
        } else {
            WrapMode::NoWrap
        };
        let mut buffer = LineBuffer::new(width, wrap);
        buffer.extend(initial_lines);

        let mut session = FollowSession::new(config.follow_options());
        if !config.follow {
            session.pause();
        }

        Self {
            terminal,
            buffer,
            session,
            scheduler: TickScheduler::new(),
            viewport: PaneViewport::new(),
            input_source,
            content_area: Rect::new(0, 0, width, 0),
        }
    }

    /// Poll the input source; new lines are a content mutation.
    fn poll_input(&mut self) -> Result<(), TuiError> {
        let new_lines = self.input_source.poll()?;
        if !new_lines.is_empty() {
            debug!(count = new_lines.len(), "new lines from source");
            self.buffer.extend(new_lines);
            self.sync_geometry();
            self.session
                .content_mutated(&self.viewport, &mut self.scheduler);
        }
        Ok(())
    }

    /// Dispatch due timers and the due frame into the session.
    fn pump_scheduler(&mut self) {
        for handle in self.scheduler.take_due_timers() {
            self.session
                .timer_fired(handle, &self.viewport, &mut self.scheduler);
        }
        if let Some(handle) = self.scheduler.take_frame() {
            self.session
                .frame(handle, &mut self.viewport, &mut self.scheduler);
        }
    }

    /// Handle a keyboard event. Returns true when the app should quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }

        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Up | KeyCode::Char('k') => self.apply_user_scroll(-1.0),
            KeyCode::Down | KeyCode::Char('j') => self.apply_user_scroll(1.0),
            KeyCode::PageUp => self.apply_user_scroll(-self.viewport.viewport_height()),
            KeyCode::PageDown => self.apply_user_scroll(self.viewport.viewport_height()),
            KeyCode::Home | KeyCode::Char('g') => self.apply_user_scroll(-self.viewport.max_offset()),
            KeyCode::End | KeyCode::Char('G') => self.apply_user_scroll(self.viewport.max_offset()),
            KeyCode::Char('f') => self.jump_to_live(),
            KeyCode::Char('w') => self.toggle_wrap(),
            _ => {}
        }
        false
    }

    /// Handle a mouse event (wheel scrolling only).
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.apply_user_scroll(-WHEEL_SCROLL_ROWS),
            MouseEventKind::ScrollDown => self.apply_user_scroll(WHEEL_SCROLL_ROWS),
            _ => {}
        }
    }

    /// Terminal resized: re-wrap and report the geometry change.
    fn handle_resize(&mut self, width: u16) {
        self.buffer.relayout(width, self.buffer.wrap());
        self.sync_geometry();
        self.session
            .content_mutated(&self.viewport, &mut self.scheduler);
    }

    /// Move the offset on the user's behalf and feed the intent tracker.
    ///
    /// A discrete key or wheel action is one complete gesture, where a
    /// continuous host would deliver a burst of scroll events. Reporting
    /// the position both before and after the move reproduces that burst:
    /// the second event lands inside the gesture window with a real offset
    /// delta, so a single action can pause or resume.
    fn apply_user_scroll(&mut self, delta: f64) {
        let now = self.scheduler.now();
        self.session.scroll_event(&self.viewport, now);
        self.viewport.scroll_by(delta);
        self.session.scroll_event(&self.viewport, now);
    }

    /// Animated jump back to the live tail, resuming follow if paused.
    fn jump_to_live(&mut self) {
        self.session.resume(&self.viewport, &mut self.scheduler);
    }

    /// Toggle wrap mode; a relayout is a geometry change like any other.
    fn toggle_wrap(&mut self) {
        let wrap = match self.buffer.wrap() {
            WrapMode::Wrap => WrapMode::NoWrap,
            WrapMode::NoWrap => WrapMode::Wrap,
        };
        self.buffer.relayout(self.buffer.width(), wrap);
        self.sync_geometry();
        self.session
            .content_mutated(&self.viewport, &mut self.scheduler);
    }

    /// Refresh the viewport's scroll geometry from the laid-out buffer and
    /// the last content area.
    fn sync_geometry(&mut self) {
        self.viewport
            .update_geometry(self.buffer.total_height(), self.content_area.height);
    }

    /// Teardown in an order that leaves nothing scheduled: cancel the
    /// debounce timer and the in-flight frame before the terminal goes
    /// away. Mutation and scroll reporting stop because the loop exits.
    fn teardown(&mut self) {
        self.session.teardown(&mut self.scheduler);
    }

    fn status_line(&self) -> Line<'static> {
        let status = if !self.input_source.is_live() {
            FollowStatus::Ended
        } else if self.session.is_paused() {
            FollowStatus::Paused
        } else {
            FollowStatus::Following
        };

        let mut spans = vec![
            FollowIndicator::new(status).render(),
            Span::raw(format!(
                "  {} lines  row {}/{}",
                self.buffer.len(),
                self.viewport.top_row(),
                self.buffer.total_height(),
            )),
        ];
        if status == FollowStatus::Paused {
            spans.push(Span::styled(
                "  (f to follow)",
                Style::default().fg(Color::DarkGray),
            ));
        }
        Line::from(spans)
    }

    /// Draw one frame.
    fn draw(&mut self) -> Result<(), TuiError> {
        let status = self.status_line();
        let buffer = &self.buffer;
        let viewport = &mut self.viewport;
        let content_area = &mut self.content_area;

        // The render area is only known inside the draw closure; geometry
        // updates happen there so the first frame is already correct.
        self.terminal.draw(|frame| {
            let [content, status_area] =
                Layout::vertical([Constraint::Min(0), Constraint::Length(1)])
                    .areas(frame.area());

            if *content_area != content {
                *content_area = content;
                viewport.update_geometry(buffer.total_height(), content.height);
            }

            frame.render_widget(FollowPane::new(buffer, viewport.top_row()), content);
            StatusBar { line: &status }.render(status_area, frame.buffer_mut());
        })?;
        Ok(())
    }
}

/// One-row status bar at the bottom of the pane.
struct StatusBar<'a> {
    line: &'a Line<'static>,
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        if area.height == 0 {
            return;
        }
        buf.set_style(area, Style::default().bg(Color::Black));
        buf.set_line(area.x, area.y, self.line, area.width);
    }
}

/// Run the TUI against an input source with the resolved configuration.
pub fn run_with_source(input_source: InputSource, config: &ResolvedConfig) -> Result<(), TuiError> {
    let mut app = TuiApp::new(input_source, config)?;
    let result = app.run();

    restore_terminal()?;
    result
}

fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(crossterm::event::DisableMouseCapture)?;
    stdout.execute(LeaveAlternateScreen)?;
    Ok(())
}

// ===== Test support =====

#[cfg(test)]
impl TuiApp<ratatui::backend::TestBackend> {
    /// Build an app over a TestBackend with preloaded lines.
    pub(crate) fn new_for_test(
        width: u16,
        height: u16,
        lines: Vec<String>,
        config: &ResolvedConfig,
    ) -> Self {
        use crate::source::StdinSource;

        let backend = ratatui::backend::TestBackend::new(width, height);
        let terminal = Terminal::new(backend).unwrap();
        let data = b"";
        let input_source = InputSource::Stdin(StdinSource::from_reader(&data[..]));
        let mut app = Self::assemble(terminal, input_source, lines, width, config);
        app.render_test();
        app
    }

    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        self.handle_key(key)
    }

    pub(crate) fn render_test(&mut self) {
        self.draw().expect("TestBackend draw cannot fail");
    }

    pub(crate) fn session(&self) -> &FollowSession {
        &self.session
    }

    pub(crate) fn viewport(&self) -> &PaneViewport {
        &self.viewport
    }

    pub(crate) fn pump_for_test(&mut self) {
        self.pump_scheduler();
    }

    pub(crate) fn push_lines_test(&mut self, lines: Vec<String>) {
        self.buffer.extend(lines);
        self.sync_geometry();
        self.session
            .content_mutated(&self.viewport, &mut self.scheduler);
    }
}
