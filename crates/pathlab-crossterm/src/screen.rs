//! Off-screen glyph buffer and frame diffing.
//!
//! Screen positions use [`Point`] with `x` as the terminal column and `y` as
//! the terminal line.

use pathlab_core::Point;

use crate::style::Style;

// ---------------------------------------------------------------------------
// Glyph
// ---------------------------------------------------------------------------

/// One terminal cell: a character and its style.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Glyph {
    pub ch: char,
    pub style: Style,
}

impl Default for Glyph {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: Style::default(),
        }
    }
}

impl Glyph {
    #[inline]
    pub const fn new(ch: char, style: Style) -> Self {
        Self { ch, style }
    }
}

// ---------------------------------------------------------------------------
// Screen
// ---------------------------------------------------------------------------

/// A `width × height` buffer of [`Glyph`]s, drawn into each frame and then
/// diffed against the previous one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Screen {
    glyphs: Vec<Glyph>,
    width: i32,
    height: i32,
}

impl Screen {
    /// A blank screen. Negative dimensions count as zero.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            glyphs: vec![Glyph::default(); (width * height) as usize],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        self.contains(p).then(|| (p.y * self.width + p.x) as usize)
    }

    /// The glyph at `p`, or a blank one outside the screen.
    pub fn at(&self, p: Point) -> Glyph {
        self.index(p).map(|i| self.glyphs[i]).unwrap_or_default()
    }

    /// Set the glyph at `p`. No-op outside the screen.
    pub fn set(&mut self, p: Point, glyph: Glyph) {
        if let Some(i) = self.index(p) {
            self.glyphs[i] = glyph;
        }
    }

    pub fn fill(&mut self, glyph: Glyph) {
        self.glyphs.fill(glyph);
    }

    /// Fill the `w × h` rectangle whose top-left corner is `at`.
    pub fn fill_rect(&mut self, at: Point, w: i32, h: i32, glyph: Glyph) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(at.shift(dx, dy), glyph);
            }
        }
    }

    /// Write `s` left to right starting at `at`, clipped at the right edge.
    ///
    /// Returns the number of columns written.
    pub fn text(&mut self, at: Point, s: &str, style: Style) -> i32 {
        let mut written = 0;
        for (i, ch) in s.chars().enumerate() {
            let p = at.shift(i as i32, 0);
            if !self.contains(p) {
                break;
            }
            let bg = self.at(p).style.bg;
            self.set(p, Glyph::new(ch, style.with_bg(bg)));
            written += 1;
        }
        written
    }

    /// Row-major iterator over `(Point, Glyph)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Glyph)> + '_ {
        let w = self.width.max(1);
        self.glyphs
            .iter()
            .enumerate()
            .map(move |(i, g)| (Point::new(i as i32 % w, i as i32 / w), *g))
    }
}

// ---------------------------------------------------------------------------
// Frame / FrameCell / diff
// ---------------------------------------------------------------------------

/// A single glyph that changed between frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameCell {
    pub glyph: Glyph,
    pub pos: Point,
}

/// The glyphs a driver has to write to bring the terminal up to date.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub cells: Vec<FrameCell>,
    pub width: i32,
    pub height: i32,
}

impl Frame {
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Compute the glyphs of `curr` that differ from `prev`.
///
/// When the two screens differ in size every glyph of `curr` is included.
pub fn diff(prev: &Screen, curr: &Screen) -> Frame {
    let resized = prev.width != curr.width || prev.height != curr.height;
    let cells = curr
        .iter()
        .filter(|(p, g)| resized || prev.at(*p) != *g)
        .map(|(pos, glyph)| FrameCell { glyph, pos })
        .collect();
    Frame {
        cells,
        width: curr.width,
        height: curr.height,
    }
}
