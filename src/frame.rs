//! Box layout for `--next-generation` output.
//!
//! A greeting is split into [`LinePart`]s, each measured in display columns,
//! and drawn inside a frame sized to the widest line:
//!
//! ```text
//! +---------------+
//! | Hello, world! |
//! +---------------+
//! ```

/// Prefix of every body line.
pub const BODY_PREFIX: &str = "| ";
/// Suffix of every body line.
pub const BODY_SUFFIX: &str = " |";
/// Columns between tab stops.
pub const TAB_WIDTH: usize = 8;

/// Tab stops are measured from the left border, not from the text.
const TAB_MARGIN: usize = BODY_PREFIX.len();

/// One line of a greeting with its measurements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinePart<'a> {
    text: &'a str,
    chars: usize,
    width: usize,
}

impl<'a> LinePart<'a> {
    /// Measure a single line (which must not contain `\n`).
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            chars: text.chars().count(),
            width: display_width(text),
        }
    }

    /// Raw line text.
    #[must_use]
    pub fn text(&self) -> &'a str { self.text }

    /// Number of characters in the line.
    #[must_use]
    pub fn chars(&self) -> usize { self.chars }

    /// Terminal columns the line occupies once tabs are expanded.
    #[must_use]
    pub fn width(&self) -> usize { self.width }
}

/// Display width of `line` inside a frame body.
///
/// Ordinary characters take one column. A tab advances to the next column
/// where `width + TAB_MARGIN` is a multiple of [`TAB_WIDTH`].
#[must_use]
pub fn display_width(line: &str) -> usize {
    line.chars().fold(0, |width, c| {
        if c == '\t' {
            width + TAB_WIDTH - (width + TAB_MARGIN) % TAB_WIDTH
        } else {
            width + 1
        }
    })
}

/// A greeting laid out for boxed rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame<'a> {
    parts: Vec<LinePart<'a>>,
    width: usize,
}

impl<'a> Frame<'a> {
    /// Split `greeting` at each newline and measure every line.
    ///
    /// An empty greeting yields a single empty line and a zero-width frame.
    #[must_use]
    pub fn layout(greeting: &'a str) -> Self {
        let parts: Vec<_> = greeting.split('\n').map(LinePart::new).collect();
        let width = parts.iter().map(LinePart::width).max().unwrap_or(0);
        Self { parts, width }
    }

    /// Line parts in order.
    #[must_use]
    pub fn parts(&self) -> &[LinePart<'a>] { &self.parts }

    /// Width of the widest line, i.e. the frame interior.
    #[must_use]
    pub fn width(&self) -> usize { self.width }

    /// Top and bottom border, without a newline.
    #[must_use]
    pub fn border(&self) -> String {
        let mut border = String::with_capacity(self.width + 4);
        border.push_str("+-");
        border.extend(std::iter::repeat_n('-', self.width));
        border.push_str("-+");
        border
    }

    /// Body line for `part`, padded to the frame width, without a newline.
    #[must_use]
    pub fn body(&self, part: &LinePart<'_>) -> String {
        let padding = self.width.saturating_sub(part.width());
        let mut line =
            String::with_capacity(BODY_PREFIX.len() + part.text().len() + padding + BODY_SUFFIX.len());
        line.push_str(BODY_PREFIX);
        line.push_str(part.text());
        line.extend(std::iter::repeat_n(' ', padding));
        line.push_str(BODY_SUFFIX);
        line
    }

    /// Every output line in order: border, bodies, border.
    pub fn lines(&self) -> impl Iterator<Item = FrameLine> + '_ {
        let border = self.border();
        std::iter::once(FrameLine::Border(border.clone()))
            .chain(self.parts.iter().map(move |part| FrameLine::Body(self.body(part))))
            .chain(std::iter::once(FrameLine::Border(border)))
    }
}

/// One rendered line of a frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrameLine {
    /// Top or bottom edge.
    Border(String),
    /// A greeting line between the edges.
    Body(String),
}

impl FrameLine {
    /// Rendered text, without a newline.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Border(text) | Self::Body(text) => text,
        }
    }
}
