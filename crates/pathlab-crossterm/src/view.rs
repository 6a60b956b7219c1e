//! Drawing the board and sidebar into a [`Screen`].

use std::collections::HashSet;

use pathlab_core::{Point, Role};
use pathlab_editor::{EditorSession, Report, SessionState};
use pathlab_paths::SearchEvent;

use crate::input::CELL_COLUMNS;
use crate::palette::{self, color_of};
use crate::screen::{Glyph, Screen};
use crate::style::{AttrMask, Color, Style};

const SIDEBAR_WIDTH: i32 = 34;
const SIDEBAR_HEIGHT: i32 = 16;

const CONTROLS: [(&str, &str); 7] = [
    ("Left Click", "Start/End/Walls"),
    ("Right Click", "Reset Square"),
    ("SPACE", "Find Shortest Path"),
    ("C Key", "Clear Screen"),
    ("R Key", "Scatter Walls"),
    ("ESC", "Cancel Search"),
    ("Q Key", "Quit"),
];

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Where the board and sidebar sit on the terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    pub rows: i32,
    pub sidebar_x: i32,
    pub width: i32,
    pub height: i32,
}

impl Layout {
    pub fn for_board(rows: i32) -> Self {
        let rows = rows.max(0);
        let sidebar_x = rows * CELL_COLUMNS;
        Self {
            rows,
            sidebar_x,
            width: sidebar_x + SIDEBAR_WIDTH,
            height: rows.max(SIDEBAR_HEIGHT),
        }
    }

    /// Top-left terminal position of board cell `p`.
    pub const fn cell_origin(&self, p: Point) -> Point {
        Point::new(p.row() * CELL_COLUMNS, p.col())
    }
}

// ---------------------------------------------------------------------------
// Overlay
// ---------------------------------------------------------------------------

/// Search progress drawn on top of empty cells.
#[derive(Clone, Debug, Default)]
pub struct Overlay {
    visited: HashSet<Point>,
    frontier: HashSet<Point>,
    current: Option<Point>,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, ev: &SearchEvent) {
        match ev {
            SearchEvent::Expand { pos, opened, .. } => {
                self.frontier.remove(pos);
                self.visited.insert(*pos);
                self.frontier.extend(opened.iter().copied());
                self.current = Some(*pos);
            }
            SearchEvent::Done(_) => self.current = None,
        }
    }

    pub fn clear(&mut self) {
        self.visited.clear();
        self.frontier.clear();
        self.current = None;
    }

    pub fn expanded(&self) -> usize {
        self.visited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visited.is_empty() && self.frontier.is_empty()
    }

    fn tint(&self, p: Point) -> Option<Color> {
        if self.current == Some(p) {
            Some(palette::CURRENT)
        } else if self.frontier.contains(&p) {
            Some(palette::FRONTIER)
        } else if self.visited.contains(&p) {
            Some(palette::VISITED)
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

/// Redraw the whole screen from the session, the search overlay and an
/// optional one-line notice.
pub fn draw(
    screen: &mut Screen,
    layout: &Layout,
    session: &EditorSession,
    overlay: &Overlay,
    notice: Option<&str>,
) {
    screen.fill(Glyph::new(' ', Style::default().with_bg(palette::BG_DARK)));
    draw_board(screen, layout, session, overlay);
    draw_sidebar(screen, layout, session, overlay, notice);
}

fn draw_board(screen: &mut Screen, layout: &Layout, session: &EditorSession, overlay: &Overlay) {
    for cell in session.grid() {
        let p = cell.pos();
        let origin = layout.cell_origin(p);
        let (left, right) = match cell.role {
            Role::Start => ('S', ' '),
            Role::End => ('E', ' '),
            Role::Empty => ('·', ' '),
            _ => (' ', ' '),
        };
        let (fg, bg) = match (cell.role, overlay.tint(p)) {
            (Role::Empty, Some(tint)) => (tint, tint),
            (Role::Empty, None) => (palette::GRID_DOT, palette::BG_DARK),
            (role, _) => (palette::BG_DARK, color_of(role)),
        };
        let style = Style::default()
            .with_fg(fg)
            .with_bg(bg)
            .with_attrs(AttrMask::BOLD);
        screen.set(origin, Glyph::new(left, style));
        screen.set(origin.shift(1, 0), Glyph::new(right, style));
    }
}

fn draw_sidebar(
    screen: &mut Screen,
    layout: &Layout,
    session: &EditorSession,
    overlay: &Overlay,
    notice: Option<&str>,
) {
    let x = layout.sidebar_x;
    screen.fill_rect(
        Point::new(x, 0),
        SIDEBAR_WIDTH,
        layout.height,
        Glyph::new(' ', Style::default().with_bg(palette::SIDEBAR)),
    );
    let left = x + 2;
    let title = Style::default()
        .with_fg(palette::NEON_BLUE)
        .with_attrs(AttrMask::BOLD);
    screen.text(Point::new(left, 1), "AI PATHFINDER", title);

    let key_style = Style::default().with_fg(palette::NEON_RED);
    let desc_style = Style::default().with_fg(palette::TEXT);
    for (i, (key, desc)) in CONTROLS.iter().enumerate() {
        let y = 3 + i as i32;
        screen.text(Point::new(left, y), key, key_style);
        screen.text(Point::new(left + 13, y), desc, desc_style);
    }

    let mut y = 4 + CONTROLS.len() as i32;
    let state = format!("State: {}", session.state().label());
    screen.text(Point::new(left, y), &state, desc_style);
    y += 1;
    let ends = format!(
        "Start {}  End {}",
        endpoint(session.start()),
        endpoint(session.end())
    );
    screen.text(Point::new(left, y), &ends, desc_style);
    y += 1;

    let status = Style::default().with_fg(palette::NEON_GREEN);
    let lines = if session.state() == SessionState::Searching {
        vec![format!("Expanded {}", overlay.expanded())]
    } else {
        session.report().map(report_lines).unwrap_or_default()
    };
    for line in lines.iter().map(String::as_str).chain(notice) {
        screen.text(Point::new(left, y), line, status);
        y += 1;
    }
}

fn endpoint(p: Option<Point>) -> String {
    p.map_or_else(|| "-".to_string(), |p| p.to_string())
}

/// Sidebar text for the outcome of the last search request.
pub fn report_lines(report: Report) -> Vec<String> {
    match report {
        Report::Solved { cost, expanded } => {
            vec![format!("Path cost {cost}"), format!("{expanded} cells expanded")]
        }
        Report::NotFound { expanded } => {
            vec!["No path".to_string(), format!("{expanded} cells expanded")]
        }
        Report::Exhausted { steps } => {
            vec!["Gave up".to_string(), format!("step limit {steps} reached")]
        }
        Report::Cancelled => vec!["Search cancelled".to_string()],
        Report::PreconditionNotMet(missing) => vec![format!("Place {missing} first")],
    }
}
