//! Pane content widget and the status-line follow indicator.

use crate::model::{wrap_rows, LineBuffer, WrapMode};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::Widget,
};

/// Renders the visible slice of the line buffer.
///
/// Borderless: the area is all content. The top row comes from the
/// floored scroll offset; wrapped lines are sliced mid-line when the
/// offset lands inside them.
pub struct FollowPane<'a> {
    buffer: &'a LineBuffer,
    top_row: usize,
}

impl<'a> FollowPane<'a> {
    /// A pane showing `buffer` from the given top row.
    pub fn new(buffer: &'a LineBuffer, top_row: usize) -> Self {
        Self { buffer, top_row }
    }

    /// The wrapped rows of one line, in display order.
    fn rows_of(&self, line: &str, width: u16, wrap: WrapMode) -> Vec<String> {
        match wrap {
            WrapMode::NoWrap => vec![line.to_string()],
            WrapMode::Wrap => wrap_rows(line, width),
        }
    }
}

impl Widget for FollowPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let wrap = self.buffer.wrap();
        let mut screen_row = 0u16;

        let Some((mut line_index, mut row_in_line)) = self.buffer.line_at_offset(self.top_row)
        else {
            return;
        };

        'rows: while screen_row < area.height {
            let Some(line) = self.buffer.line(line_index) else {
                break;
            };
            let rows = self.rows_of(line, area.width, wrap);
            for row in rows.iter().skip(row_in_line) {
                if screen_row >= area.height {
                    break 'rows;
                }
                buf.set_stringn(
                    area.x,
                    area.y + screen_row,
                    row,
                    usize::from(area.width),
                    Style::default(),
                );
                screen_row += 1;
            }
            line_index += 1;
            row_in_line = 0;
        }
    }
}

/// Live-follow status for the indicator span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowStatus {
    /// Auto-follow is on and the source can still deliver lines.
    Following,
    /// The viewer scrolled away; auto-follow suspended.
    Paused,
    /// The source reached EOF; nothing further will arrive.
    Ended,
}

/// Status-line indicator for the pane's follow state.
///
/// Pure and stateless: green bold `FOLLOWING` while tailing, yellow
/// `PAUSED` when the viewer scrolled away, gray `END` after EOF.
#[derive(Debug, Clone, Copy)]
pub struct FollowIndicator {
    status: FollowStatus,
}

impl FollowIndicator {
    /// An indicator for the given status.
    pub fn new(status: FollowStatus) -> Self {
        Self { status }
    }

    /// Render as a styled span for the status line.
    pub fn render(&self) -> Span<'static> {
        match self.status {
            FollowStatus::Following => Span::styled(
                "FOLLOWING",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            FollowStatus::Paused => Span::styled("PAUSED", Style::default().fg(Color::Yellow)),
            FollowStatus::Ended => Span::styled("END", Style::default().fg(Color::DarkGray)),
        }
    }
}
