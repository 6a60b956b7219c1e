//! The editing state machine: [`EditorSession`], [`SessionState`],
//! [`SearchRun`], [`Report`].

use pathlab_core::{Error, Grid, Missing, Point, Result, Role};
use pathlab_paths::{AstarSearch, CancelToken, Path, SearchEvent, SearchOutcome};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SessionConfig;

// ---------------------------------------------------------------------------
// SessionState / Report
// ---------------------------------------------------------------------------

/// Where the session is in its edit → search → result cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Fresh board, nothing placed yet.
    Idle,
    /// Start, end or walls are being placed.
    Editing,
    /// A [`SearchRun`] is in progress; the board cannot be edited.
    Searching,
    /// The last search found a path, which is marked on the board.
    Solved,
}

impl SessionState {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Editing => "editing",
            Self::Searching => "searching",
            Self::Solved => "solved",
        }
    }
}

/// The result of the last search request, kept for display.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Report {
    Solved { cost: i32, expanded: usize },
    NotFound { expanded: usize },
    Exhausted { steps: usize },
    Cancelled,
    PreconditionNotMet(Missing),
}

// ---------------------------------------------------------------------------
// EditorSession
// ---------------------------------------------------------------------------

/// Owns the board and enforces the editing rules: one start, one end,
/// walls anywhere else, searches only when both endpoints exist.
///
/// Invalid clicks are not errors. [`place`](Self::place) and
/// [`clear_cell`](Self::clear_cell) return `Ok(None)` when nothing changed,
/// so repeated calls on the same cell are harmless.
#[derive(Debug, Clone)]
pub struct EditorSession {
    config: SessionConfig,
    grid: Grid,
    start: Option<Point>,
    end: Option<Point>,
    state: SessionState,
    report: Option<Report>,
    step_limit: Option<usize>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl EditorSession {
    /// Create a session with an empty `config.rows`² board.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            grid: Grid::new(config.rows),
            start: None,
            end: None,
            state: SessionState::Idle,
            report: None,
            step_limit: None,
        }
    }

    /// Bound every search to `limit` expansions (builder).
    pub fn with_step_limit(mut self, limit: Option<usize>) -> Self {
        self.step_limit = limit;
        self
    }

    #[inline]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Option<Point> {
        self.end
    }

    #[inline]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The last search result or refusal, cleared by the next edit.
    #[inline]
    pub fn report(&self) -> Option<Report> {
        self.report
    }

    /// Role of the cell at (row, col), `None` off the board.
    pub fn role_at(&self, row: i32, col: i32) -> Option<Role> {
        self.grid.role(Point::new(row, col))
    }

    /// Map pixel coordinates to a cell, see [`SessionConfig::cell_at_pixel`].
    pub fn cell_at_pixel(&self, x: i32, y: i32) -> Option<Point> {
        self.config.cell_at_pixel(x, y)
    }

    fn checked(&self, row: i32, col: i32) -> Result<(Point, Role)> {
        let p = Point::new(row, col);
        match self.grid.role(p) {
            Some(role) => Ok((p, role)),
            None => Err(Error::OutOfBounds {
                pos: p,
                size: self.grid.size(),
            }),
        }
    }

    /// Enter `Editing`, dropping a displayed path first.
    fn begin_edit(&mut self) {
        if self.state == SessionState::Solved {
            let cleared = self.grid.clear_role(Role::Path);
            log::debug!("edit after solve: cleared {cleared} path cells");
        }
        self.state = SessionState::Editing;
        self.report = None;
    }

    /// Paint the cell at (row, col).
    ///
    /// The first free endpoint wins: a missing start is placed unless the
    /// cell is the end, then a missing end unless the cell is the start.
    /// Otherwise any cell that is neither endpoint becomes a wall.
    ///
    /// Returns the role applied, or `None` if nothing changed.
    pub fn place(&mut self, row: i32, col: i32) -> Result<Option<Role>> {
        let (p, current) = self.checked(row, col)?;

        let role = if self.start.is_none() && self.end != Some(p) {
            Role::Start
        } else if self.end.is_none() && self.start != Some(p) {
            Role::End
        } else if self.start != Some(p) && self.end != Some(p) {
            if current == Role::Wall {
                return Ok(None);
            }
            Role::Wall
        } else {
            return Ok(None);
        };

        self.begin_edit();
        self.grid.set_role(p, role)?;
        match role {
            Role::Start => self.start = Some(p),
            Role::End => self.end = Some(p),
            _ => {}
        }
        log::debug!("place {} at {p}", role.label());
        Ok(Some(role))
    }

    /// Reset the cell at (row, col) to empty, releasing the start or end if
    /// it held one.
    ///
    /// Returns the role that was cleared, or `None` if the cell was already
    /// empty.
    pub fn clear_cell(&mut self, row: i32, col: i32) -> Result<Option<Role>> {
        let (p, current) = self.checked(row, col)?;
        if current == Role::Empty {
            return Ok(None);
        }

        self.begin_edit();
        self.grid.set_role(p, Role::Empty)?;
        if self.start == Some(p) {
            self.start = None;
        }
        if self.end == Some(p) {
            self.end = None;
        }
        log::debug!("clear {} at {p}", current.label());
        Ok(Some(current))
    }

    /// Start an A* search from the start to the end cell.
    ///
    /// Fails with [`Error::PreconditionNotMet`] if either endpoint is
    /// missing; the refusal is also kept as the session [`Report`] and the
    /// session returns to `Editing` (an untouched board stays `Idle`). The
    /// returned run borrows the session until it is finished or dropped.
    pub fn run_search(&mut self) -> Result<SearchRun<'_>> {
        self.run_search_with(None)
    }

    /// Like [`run_search`](Self::run_search), polling `cancel` before every
    /// step.
    pub fn run_search_with(&mut self, cancel: Option<CancelToken>) -> Result<SearchRun<'_>> {
        let (start, end) = match (self.start, self.end) {
            (Some(s), Some(e)) => (s, e),
            (s, e) => {
                let missing = match (s, e) {
                    (None, None) => Missing::Both,
                    (None, _) => Missing::Start,
                    _ => Missing::End,
                };
                log::warn!("search refused: {missing} not placed");
                if self.state != SessionState::Idle {
                    self.state = SessionState::Editing;
                }
                self.report = Some(Report::PreconditionNotMet(missing));
                return Err(Error::PreconditionNotMet { missing });
            }
        };

        self.grid.clear_role(Role::Path);
        let mut search = AstarSearch::new(self.grid.clone(), start, end);
        if let Some(limit) = self.step_limit {
            search = search.with_step_limit(limit);
        }
        if let Some(token) = cancel {
            search = search.with_cancel(token);
        }

        let n = self.grid.size();
        log::info!("search {start} -> {end} on {n}x{n} board");
        self.state = SessionState::Searching;
        self.report = None;
        Ok(SearchRun {
            session: self,
            search,
            finished: false,
        })
    }

    /// Run a search to completion and return the path.
    ///
    /// Any ending other than a found path (including a step limit running
    /// out) is reported as [`Error::NotFound`].
    pub fn solve(&mut self) -> Result<Path> {
        match self.run_search()?.finish() {
            SearchOutcome::Found(path) => Ok(path),
            _ => Err(Error::NotFound),
        }
    }

    /// Replace the board with a fresh one of the same size and forget both
    /// endpoints.
    pub fn reset_grid(&mut self) {
        self.grid = Grid::new(self.config.rows);
        self.start = None;
        self.end = None;
        self.state = SessionState::Idle;
        self.report = None;
        log::info!("board reset");
    }

    /// Turn each empty cell into a wall with probability `density`, using a
    /// generator seeded with `seed`. Endpoints are never touched.
    ///
    /// Returns the number of walls added.
    pub fn scatter_walls(&mut self, density: f64, seed: u64) -> usize {
        let density = if density.is_nan() {
            0.0
        } else {
            density.clamp(0.0, 1.0)
        };
        let mut rng = StdRng::seed_from_u64(seed);
        self.begin_edit();

        let candidates: Vec<Point> = self.grid.positions_of(Role::Empty).collect();
        let mut placed = 0;
        for p in candidates {
            if rng.random_bool(density) && self.grid.set_role(p, Role::Wall).is_ok() {
                placed += 1;
            }
        }
        log::info!("scattered {placed} walls (density {density:.2}, seed {seed})");
        placed
    }

    fn apply_outcome(&mut self, outcome: &SearchOutcome, steps: usize) {
        match outcome {
            SearchOutcome::Found(path) => {
                for &p in path.interior() {
                    if let Err(e) = self.grid.set_role(p, Role::Path) {
                        log::error!("marking path: {e}");
                    }
                }
                self.state = SessionState::Solved;
                self.report = Some(Report::Solved {
                    cost: path.cost(),
                    expanded: steps,
                });
                log::info!("path found: cost {}, {steps} expansions", path.cost());
            }
            SearchOutcome::NotFound => {
                self.state = SessionState::Editing;
                self.report = Some(Report::NotFound { expanded: steps });
                log::warn!("no path after {steps} expansions");
            }
            SearchOutcome::Exhausted { steps } => {
                self.state = SessionState::Editing;
                self.report = Some(Report::Exhausted { steps: *steps });
                log::warn!("search stopped at step limit ({steps})");
            }
            SearchOutcome::Cancelled => {
                self.state = SessionState::Editing;
                self.report = Some(Report::Cancelled);
                log::info!("search cancelled after {steps} expansions");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// SearchRun
// ---------------------------------------------------------------------------

/// An in-progress search started by [`EditorSession::run_search`].
///
/// Iterating relays the search's events unchanged. When the final
/// [`SearchEvent::Done`] passes through, its outcome is applied to the
/// session: a found path is marked and the session becomes `Solved`, any
/// other ending returns it to `Editing`. Dropping the run early counts as a
/// cancellation.
pub struct SearchRun<'s> {
    session: &'s mut EditorSession,
    search: AstarSearch<Grid>,
    finished: bool,
}

impl SearchRun<'_> {
    /// Read-only view of the session while the search runs.
    pub fn session(&self) -> &EditorSession {
        self.session
    }

    /// Expansions so far.
    pub fn steps(&self) -> usize {
        self.search.steps()
    }

    /// Whether the final event has been relayed.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Stop now, recording a cancellation.
    pub fn cancel(mut self) {
        self.conclude(&SearchOutcome::Cancelled);
    }

    /// Drain the remaining events and return the outcome.
    pub fn finish(mut self) -> SearchOutcome {
        let mut outcome = SearchOutcome::Cancelled;
        for ev in self.by_ref() {
            if let SearchEvent::Done(o) = ev {
                outcome = o;
            }
        }
        outcome
    }

    fn conclude(&mut self, outcome: &SearchOutcome) {
        if self.finished {
            return;
        }
        self.finished = true;
        let steps = self.search.steps();
        self.session.apply_outcome(outcome, steps);
    }
}

impl Iterator for SearchRun<'_> {
    type Item = SearchEvent;

    fn next(&mut self) -> Option<SearchEvent> {
        if self.finished {
            return None;
        }
        let ev = self.search.next()?;
        if let SearchEvent::Done(outcome) = &ev {
            self.conclude(outcome);
        }
        Some(ev)
    }
}

impl Drop for SearchRun<'_> {
    fn drop(&mut self) {
        self.conclude(&SearchOutcome::Cancelled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(n: i32) -> EditorSession {
        EditorSession::new(SessionConfig::default().with_rows(n))
    }

    #[test]
    fn first_clicks_place_start_then_end_then_walls() {
        let mut s = session(5);
        assert_eq!(s.state(), SessionState::Idle);
        assert_eq!(s.place(0, 0), Ok(Some(Role::Start)));
        assert_eq!(s.state(), SessionState::Editing);
        assert_eq!(s.place(4, 4), Ok(Some(Role::End)));
        assert_eq!(s.place(2, 2), Ok(Some(Role::Wall)));
        assert_eq!(s.start(), Some(Point::new(0, 0)));
        assert_eq!(s.end(), Some(Point::new(4, 4)));
        assert_eq!(s.role_at(2, 2), Some(Role::Wall));
    }

    #[test]
    fn redundant_place_is_noop() {
        let mut s = session(5);
        s.place(0, 0).unwrap();
        s.place(4, 4).unwrap();
        s.place(1, 1).unwrap();
        assert_eq!(s.place(1, 1), Ok(None));
        assert_eq!(s.place(0, 0), Ok(None));
        assert_eq!(s.place(4, 4), Ok(None));
        assert_eq!(s.role_at(0, 0), Some(Role::Start));
    }

    #[test]
    fn cannot_place_end_on_start() {
        let mut s = session(5);
        s.place(0, 0).unwrap();
        assert_eq!(s.place(0, 0), Ok(None));
        assert_eq!(s.end(), None);
        assert_eq!(s.role_at(0, 0), Some(Role::Start));
    }

    #[test]
    fn cannot_place_start_on_end() {
        let mut s = session(5);
        s.place(0, 0).unwrap();
        s.place(3, 3).unwrap();
        s.clear_cell(0, 0).unwrap();
        assert_eq!(s.place(3, 3), Ok(None));
        assert_eq!(s.start(), None);
        assert_eq!(s.role_at(3, 3), Some(Role::End));
    }

    #[test]
    fn clearing_start_allows_new_start() {
        let mut s = session(5);
        s.place(0, 0).unwrap();
        s.place(4, 4).unwrap();
        assert_eq!(s.clear_cell(0, 0), Ok(Some(Role::Start)));
        assert_eq!(s.start(), None);
        assert_eq!(s.role_at(0, 0), Some(Role::Empty));
        assert_eq!(s.place(2, 3), Ok(Some(Role::Start)));
        assert_eq!(s.start(), Some(Point::new(2, 3)));
        assert_eq!(s.end(), Some(Point::new(4, 4)));
    }

    #[test]
    fn clearing_end_and_walls() {
        let mut s = session(5);
        s.place(0, 0).unwrap();
        s.place(4, 4).unwrap();
        s.place(1, 1).unwrap();
        assert_eq!(s.clear_cell(4, 4), Ok(Some(Role::End)));
        assert_eq!(s.end(), None);
        assert_eq!(s.clear_cell(1, 1), Ok(Some(Role::Wall)));
        assert_eq!(s.clear_cell(1, 1), Ok(None));
    }

    #[test]
    fn start_may_replace_a_wall() {
        let mut s = session(5);
        s.place(0, 0).unwrap();
        s.place(4, 4).unwrap();
        s.place(2, 2).unwrap();
        s.clear_cell(0, 0).unwrap();
        assert_eq!(s.place(2, 2), Ok(Some(Role::Start)));
        assert_eq!(s.start(), Some(Point::new(2, 2)));
    }

    #[test]
    fn out_of_bounds_edits_fail() {
        let mut s = session(5);
        assert_eq!(
            s.place(5, 0),
            Err(Error::OutOfBounds {
                pos: Point::new(5, 0),
                size: 5
            })
        );
        assert!(s.clear_cell(0, -1).is_err());
        assert_eq!(s.state(), SessionState::Idle);
    }

    #[test]
    fn search_requires_both_endpoints() {
        let mut s = session(5);
        assert_eq!(
            s.run_search().err(),
            Some(Error::PreconditionNotMet {
                missing: Missing::Both
            })
        );
        s.place(0, 0).unwrap();
        assert_eq!(
            s.run_search().err(),
            Some(Error::PreconditionNotMet {
                missing: Missing::End
            })
        );
        assert_eq!(s.report(), Some(Report::PreconditionNotMet(Missing::End)));
        assert_eq!(s.state(), SessionState::Editing);
    }

    #[test]
    fn refused_search_returns_to_editing() {
        let mut s = session(5);
        assert!(s.run_search().is_err());
        assert_eq!(s.state(), SessionState::Idle);

        s.place(0, 0).unwrap();
        s.place(4, 4).unwrap();
        s.solve().unwrap();
        assert_eq!(s.state(), SessionState::Solved);
        s.clear_cell(4, 4).unwrap();
        assert!(s.run_search().is_err());
        assert_eq!(s.state(), SessionState::Editing);
        assert_eq!(s.report(), Some(Report::PreconditionNotMet(Missing::End)));
        assert_eq!(s.grid().positions_of(Role::Path).count(), 0);
    }

    #[test]
    fn solve_marks_path_between_endpoints() {
        let mut s = session(5);
        s.place(0, 0).unwrap();
        s.place(4, 4).unwrap();
        let path = s.solve().unwrap();
        assert_eq!(path.len(), 9);
        assert_eq!(path.cost(), 8);
        assert_eq!(s.state(), SessionState::Solved);
        assert_eq!(s.grid().positions_of(Role::Path).count(), 7);
        assert_eq!(s.role_at(0, 0), Some(Role::Start));
        assert_eq!(s.role_at(4, 4), Some(Role::End));
        assert!(matches!(s.report(), Some(Report::Solved { cost: 8, .. })));
    }

    #[test]
    fn solve_routes_through_gap() {
        let mut s = session(3);
        s.place(0, 0).unwrap();
        s.place(2, 2).unwrap();
        s.place(0, 1).unwrap();
        s.place(1, 1).unwrap();
        let path = s.solve().unwrap();
        assert_eq!(
            path.cells(),
            &[
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(2, 0),
                Point::new(2, 1),
                Point::new(2, 2)
            ]
        );
        let marked: Vec<_> = s.grid().positions_of(Role::Path).collect();
        assert_eq!(
            marked,
            vec![Point::new(1, 0), Point::new(2, 0), Point::new(2, 1)]
        );
    }

    #[test]
    fn enclosed_end_reports_not_found() {
        let mut s = session(5);
        s.place(0, 0).unwrap();
        s.place(2, 2).unwrap();
        for (r, c) in [(1, 2), (3, 2), (2, 1), (2, 3)] {
            s.place(r, c).unwrap();
        }
        assert_eq!(s.solve(), Err(Error::NotFound));
        assert_eq!(s.state(), SessionState::Editing);
        assert!(matches!(s.report(), Some(Report::NotFound { .. })));
        assert_eq!(s.grid().positions_of(Role::Path).count(), 0);
    }

    #[test]
    fn run_relays_events_and_is_searching() {
        let mut s = session(4);
        s.place(0, 0).unwrap();
        s.place(3, 3).unwrap();
        let mut run = s.run_search().unwrap();
        assert_eq!(run.session().state(), SessionState::Searching);
        let first = run.next().unwrap();
        assert!(matches!(first, SearchEvent::Expand { pos, .. } if pos == Point::new(0, 0)));
        let rest: Vec<_> = run.by_ref().collect();
        assert!(rest.last().unwrap().is_done());
        assert!(run.is_finished());
        drop(run);
        assert_eq!(s.state(), SessionState::Solved);
    }

    #[test]
    fn dropping_run_cancels() {
        let mut s = session(10);
        s.place(0, 0).unwrap();
        s.place(9, 9).unwrap();
        {
            let mut run = s.run_search().unwrap();
            run.next();
            run.next();
        }
        assert_eq!(s.state(), SessionState::Editing);
        assert_eq!(s.report(), Some(Report::Cancelled));
        assert_eq!(s.grid().positions_of(Role::Path).count(), 0);
    }

    #[test]
    fn explicit_cancel_and_token() {
        let mut s = session(10);
        s.place(0, 0).unwrap();
        s.place(9, 9).unwrap();
        s.run_search().unwrap().cancel();
        assert_eq!(s.report(), Some(Report::Cancelled));

        let token = CancelToken::new();
        token.cancel();
        let outcome = s.run_search_with(Some(token)).unwrap().finish();
        assert_eq!(outcome, SearchOutcome::Cancelled);
        assert_eq!(s.state(), SessionState::Editing);
    }

    #[test]
    fn step_limit_reports_exhausted() {
        let mut s = session(10).with_step_limit(Some(5));
        s.place(0, 0).unwrap();
        s.place(9, 9).unwrap();
        assert_eq!(s.solve(), Err(Error::NotFound));
        assert_eq!(s.report(), Some(Report::Exhausted { steps: 5 }));
    }

    #[test]
    fn editing_after_solve_drops_path() {
        let mut s = session(5);
        s.place(0, 0).unwrap();
        s.place(4, 4).unwrap();
        s.solve().unwrap();
        assert!(s.grid().positions_of(Role::Path).count() > 0);
        s.place(2, 0).unwrap();
        assert_eq!(s.state(), SessionState::Editing);
        assert_eq!(s.grid().positions_of(Role::Path).count(), 0);
        assert_eq!(s.report(), None);
    }

    #[test]
    fn re_search_reflects_new_walls() {
        let mut s = session(3);
        s.place(0, 0).unwrap();
        s.place(0, 2).unwrap();
        assert_eq!(s.solve().map(|p| p.cost()), Ok(2));
        s.place(0, 1).unwrap();
        assert_eq!(s.solve().map(|p| p.cost()), Ok(4));
    }

    #[test]
    fn reset_restores_idle_board() {
        let mut s = session(5);
        s.place(0, 0).unwrap();
        s.place(4, 4).unwrap();
        s.place(1, 1).unwrap();
        s.solve().unwrap();
        s.reset_grid();
        assert_eq!(s.state(), SessionState::Idle);
        assert_eq!(s.start(), None);
        assert_eq!(s.end(), None);
        assert_eq!(s.report(), None);
        assert!(s.grid().iter().all(|c| c.role == Role::Empty));
        assert_eq!(s.grid().size(), 5);
    }

    #[test]
    fn scatter_is_seeded_and_spares_endpoints() {
        let mut a = session(12);
        a.place(0, 0).unwrap();
        a.place(11, 11).unwrap();
        let mut b = a.clone();
        let na = a.scatter_walls(0.4, 7);
        let nb = b.scatter_walls(0.4, 7);
        assert_eq!(na, nb);
        assert!(na > 0);
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.role_at(0, 0), Some(Role::Start));
        assert_eq!(a.role_at(11, 11), Some(Role::End));
        assert_eq!(a.grid().positions_of(Role::Wall).count(), na);
    }

    #[test]
    fn scatter_density_bounds() {
        let mut s = session(6);
        assert_eq!(s.scatter_walls(0.0, 1), 0);
        assert_eq!(s.scatter_walls(2.0, 1), 36);
    }
}
