use std::collections::HashMap;

use pathlab_core::Point;

use crate::cancel::CancelToken;
use crate::event::{Path, SearchEvent, SearchOutcome};
use crate::frontier::Frontier;
use crate::traits::AstarPather;

/// An A* search that yields one [`SearchEvent`] per expansion.
///
/// The search owns all of its state (frontier, g-scores, predecessors), so
/// dropping it midway is always safe and leaves nothing behind. The stream
/// ends with exactly one [`SearchEvent::Done`], after which `next` returns
/// `None`.
///
/// Ordering is fully deterministic: the frontier pops the lowest
/// `f = g + h`, ties go to the entry pushed first, and neighbours are pushed
/// in the order the pather lists them. A point is pushed only while it is
/// not already on the frontier; a cheaper route found to a resident point
/// updates its g-score and predecessor but leaves its queued key alone.
pub struct AstarSearch<P> {
    pather: P,
    start: Point,
    goal: Point,
    frontier: Frontier,
    g: HashMap<Point, i32>,
    came_from: HashMap<Point, Point>,
    nbuf: Vec<Point>,
    steps: usize,
    step_limit: Option<usize>,
    cancel: Option<CancelToken>,
    finished: bool,
}

impl<P: AstarPather> AstarSearch<P> {
    /// Prepare a search from `start` to `goal`. Nothing is expanded until the
    /// first call to `next`.
    pub fn new(pather: P, start: Point, goal: Point) -> Self {
        let mut frontier = Frontier::new();
        frontier.push(start, pather.estimate(start, goal));
        let mut g = HashMap::new();
        g.insert(start, 0);
        Self {
            pather,
            start,
            goal,
            frontier,
            g,
            came_from: HashMap::new(),
            nbuf: Vec::with_capacity(4),
            steps: 0,
            step_limit: None,
            cancel: None,
            finished: false,
        }
    }

    /// Stop with [`SearchOutcome::Exhausted`] after `limit` expansions.
    pub fn with_step_limit(mut self, limit: usize) -> Self {
        self.step_limit = Some(limit);
        self
    }

    /// Stop with [`SearchOutcome::Cancelled`] once `token` is cancelled.
    /// The token is polled before every step.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Point {
        self.goal
    }

    /// Number of expansions so far.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Best known cost from the start to `p`, if `p` has been reached.
    pub fn g_score(&self, p: Point) -> Option<i32> {
        self.g.get(&p).copied()
    }

    /// Whether `p` is currently waiting on the frontier.
    pub fn in_frontier(&self, p: Point) -> bool {
        self.frontier.contains(p)
    }

    /// Whether the `Done` event has been produced.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Drain the remaining events and return the outcome.
    pub fn run(self) -> SearchOutcome {
        let mut outcome = SearchOutcome::NotFound;
        for ev in self {
            if let SearchEvent::Done(o) = ev {
                outcome = o;
            }
        }
        outcome
    }

    fn finish(&mut self, outcome: SearchOutcome) -> Option<SearchEvent> {
        self.finished = true;
        match &outcome {
            SearchOutcome::Found(path) => log::debug!(
                "a*: {} -> {} found, cost {} after {} expansions",
                self.start,
                self.goal,
                path.cost(),
                self.steps
            ),
            other => log::debug!(
                "a*: {} -> {} ended {:?} after {} expansions",
                self.start,
                self.goal,
                other,
                self.steps
            ),
        }
        Some(SearchEvent::Done(outcome))
    }

    fn reconstruct(&self) -> Path {
        let mut cells = vec![self.goal];
        let mut cur = self.goal;
        while let Some(&prev) = self.came_from.get(&cur) {
            cells.push(prev);
            cur = prev;
        }
        cells.reverse();
        let cost = self.g.get(&self.goal).copied().unwrap_or_default();
        Path::new(cells, cost)
    }
}

impl<P: AstarPather> Iterator for AstarSearch<P> {
    type Item = SearchEvent;

    fn next(&mut self) -> Option<SearchEvent> {
        if self.finished {
            return None;
        }
        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            return self.finish(SearchOutcome::Cancelled);
        }

        if self.step_limit.is_some_and(|limit| self.steps >= limit) {
            let steps = self.steps;
            return self.finish(SearchOutcome::Exhausted { steps });
        }

        let Some(entry) = self.frontier.pop() else {
            return self.finish(SearchOutcome::NotFound);
        };
        let current = entry.pos;
        if current == self.goal {
            let path = self.reconstruct();
            return self.finish(SearchOutcome::Found(path));
        }

        let current_g = self.g.get(&current).copied().unwrap_or_default();
        self.steps += 1;

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        self.pather.neighbors(current, &mut nbuf);

        let mut opened = Vec::new();
        for &np in nbuf.iter() {
            let tentative_g = current_g + self.pather.cost(current, np);
            if self.g.get(&np).is_some_and(|&g| tentative_g >= g) {
                continue;
            }
            self.g.insert(np, tentative_g);
            self.came_from.insert(np, current);
            // A resident point keeps its original key.
            if !self.frontier.contains(np) {
                let f = tentative_g + self.pather.estimate(np, self.goal);
                self.frontier.push(np, f);
                opened.push(np);
            }
        }
        self.nbuf = nbuf;

        log::trace!("a*: expand {current} g={current_g} f={}", entry.f);
        Some(SearchEvent::Expand {
            pos: current,
            g: current_g,
            f: entry.f,
            opened,
        })
    }
}

/// Compute the shortest path from `from` to `to` with A*, or `None` if the
/// end cannot be reached.
pub fn astar_path<P: AstarPather>(pather: P, from: Point, to: Point) -> Option<Path> {
    AstarSearch::new(pather, from, to).run().into_path()
}
