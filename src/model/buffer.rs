//! Append-only store of log lines with width-aware wrapped heights.

use super::height_index::HeightIndex;
use unicode_width::UnicodeWidthChar;

/// How long lines map to rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    /// Long lines wrap to fit the viewport width.
    Wrap,
    /// Long lines are clipped to one row.
    NoWrap,
}

/// Split a line into the display rows it wraps to at `width` columns.
///
/// Greedy by display width: a character that would overflow the current
/// row starts the next one, so a double-width character never straddles
/// the edge. Empty lines still produce one (empty) row; zero width is
/// treated as one column so degenerate viewports cannot loop.
pub fn wrap_rows(line: &str, width: u16) -> Vec<String> {
    let columns = usize::from(width.max(1));
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut used = 0usize;
    for ch in line.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > columns && !current.is_empty() {
            rows.push(std::mem::take(&mut current));
            used = 0;
        }
        current.push(ch);
        used += w;
    }
    rows.push(current);
    rows
}

/// Rows a single line occupies at the given width.
///
/// Counts the same greedy wrap [`wrap_rows`] renders, without allocating
/// the rows.
pub fn wrapped_height(line: &str, width: u16, wrap: WrapMode) -> usize {
    match wrap {
        WrapMode::NoWrap => 1,
        WrapMode::Wrap => {
            let columns = usize::from(width.max(1));
            let mut rows = 1usize;
            let mut used = 0usize;
            let mut row_has_char = false;
            for ch in line.chars() {
                let w = ch.width().unwrap_or(0);
                if used + w > columns && row_has_char {
                    rows += 1;
                    used = 0;
                    row_has_char = false;
                }
                used += w;
                row_has_char = true;
            }
            rows
        }
    }
}

/// The lines shown in the pane, plus their height index under the current
/// layout (viewport width and wrap mode).
///
/// Appends update the index incrementally; a layout change rebuilds it.
#[derive(Debug)]
pub struct LineBuffer {
    lines: Vec<String>,
    heights: HeightIndex,
    width: u16,
    wrap: WrapMode,
}

impl LineBuffer {
    /// An empty buffer laid out for `width` columns.
    pub fn new(width: u16, wrap: WrapMode) -> Self {
        Self {
            lines: Vec::new(),
            heights: HeightIndex::default(),
            width,
            wrap,
        }
    }

    /// Number of stored lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the buffer holds no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The line at `index`, if present.
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Current wrap mode.
    pub fn wrap(&self) -> WrapMode {
        self.wrap
    }

    /// Current layout width.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Total height in rows under the current layout.
    pub fn total_height(&self) -> usize {
        self.heights.total()
    }

    /// Rows the line at `index` occupies.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn line_height(&self, index: usize) -> usize {
        self.heights.height_at(index)
    }

    /// Index of the line covering the vertical `offset`, with the row
    /// offset into that line.
    pub fn line_at_offset(&self, offset: usize) -> Option<(usize, usize)> {
        let index = self.heights.lower_bound(offset)?;
        let line_top = if index == 0 {
            0
        } else {
            self.heights.prefix_sum(index - 1)
        };
        Some((index, offset - line_top))
    }

    /// Append one line.
    pub fn push(&mut self, line: String) {
        let height = wrapped_height(&line, self.width, self.wrap);
        self.lines.push(line);
        self.heights.push(height);
    }

    /// Append a batch of lines.
    pub fn extend<I: IntoIterator<Item = String>>(&mut self, lines: I) {
        for line in lines {
            self.push(line);
        }
    }

    /// Re-wrap every line for a new width and wrap mode.
    ///
    /// No-op when the layout is unchanged, so height-only terminal
    /// resizes skip the rebuild.
    pub fn relayout(&mut self, width: u16, wrap: WrapMode) {
        if width == self.width && wrap == self.wrap {
            return;
        }
        self.width = width;
        self.wrap = wrap;
        self.heights.clear();
        for line in &self.lines {
            self.heights.push(wrapped_height(line, width, wrap));
        }
    }
}
