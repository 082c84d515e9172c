use std::collections::VecDeque;
use std::fmt;
use std::ops::Deref;

use arrayvec::ArrayVec;

use crate::{Direction, Grid, Pos};

pub type IndexMap<K, V> = indexmap::IndexMap<K, V, fxhash::FxBuildHasher>;
pub type IndexSet<K> = indexmap::IndexSet<K, fxhash::FxBuildHasher>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => "start".fmt(f),
            Self::Goal => "goal".fmt(f),
        }
    }
}

/// Endpoints that cannot be searched from or to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    OutOfBounds {
        endpoint: Endpoint,
        pos: Pos,
        height: usize,
        width: usize,
    },
    OnWall {
        endpoint: Endpoint,
        pos: Pos,
    },
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                endpoint,
                pos,
                height,
                width,
            } => write!(
                f,
                "{endpoint} {pos} is outside the {height}x{width} grid"
            ),
            Self::OnWall { endpoint, pos } => write!(f, "{endpoint} {pos} is on a wall"),
        }
    }
}

impl std::error::Error for InvalidInput {}

/// The step budget ran out while locations were still queued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutOfBudget {
    pub max_steps: usize,
    pub queued: usize,
}

impl fmt::Display for OutOfBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "gave up after {} steps with {} locations still queued",
            self.max_steps, self.queued
        )
    }
}

impl std::error::Error for OutOfBudget {}

/// A shortest path, from the start to the goal inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path(Box<[Pos]>);

impl Path {
    /// Number of moves, one less than the number of positions.
    pub fn steps(&self) -> usize {
        self.0.len() - 1
    }

    pub fn start(&self) -> Pos {
        self.0[0]
    }

    pub fn goal(&self) -> Pos {
        self.0[self.0.len() - 1]
    }
}

impl Deref for Path {
    type Target = [Pos];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Pos;
    type IntoIter = std::slice::Iter<'a, Pos>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Outcome of a single dequeue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// `current` was expanded and `options` were newly enqueued, in expansion order.
    Expanded {
        current: Pos,
        options: ArrayVec<Pos, 4>,
    },
    /// The goal was dequeued. The search is finished.
    Reached(Pos),
    /// The frontier ran dry without reaching the goal.
    Exhausted,
}

/// Breadth-first search state over a borrowed grid.
///
/// All bookkeeping lives here rather than on the stack, so a caller may
/// drive it with [`Search::step`] under its own budget and resume later.
#[derive(Debug, Clone)]
pub struct Search<'g> {
    grid: &'g Grid,
    start: Pos,
    goal: Pos,
    frontier: VecDeque<Pos>,
    visited: IndexSet<Pos>,
    parents: IndexMap<Pos, Pos>,
    dequeued: usize,
    reached: bool,
}

impl<'g> Search<'g> {
    pub fn new(grid: &'g Grid, start: Pos, goal: Pos) -> Result<Self, InvalidInput> {
        for (endpoint, pos) in [(Endpoint::Start, start), (Endpoint::Goal, goal)] {
            match grid.get(pos) {
                None => {
                    return Err(InvalidInput::OutOfBounds {
                        endpoint,
                        pos,
                        height: grid.height(),
                        width: grid.width(),
                    })
                }
                Some(cell) if cell.is_wall() => {
                    return Err(InvalidInput::OnWall { endpoint, pos })
                }
                Some(_) => {}
            }
        }

        let mut visited = IndexSet::default();
        visited.insert(start);
        Ok(Self {
            grid,
            start,
            goal,
            frontier: VecDeque::from([start]),
            visited,
            parents: IndexMap::default(),
            dequeued: 0,
            reached: false,
        })
    }

    pub fn grid(&self) -> &'g Grid {
        self.grid
    }

    pub fn start(&self) -> Pos {
        self.start
    }

    pub fn goal(&self) -> Pos {
        self.goal
    }

    /// Positions discovered but not yet expanded, in discovery order.
    pub fn frontier(&self) -> &VecDeque<Pos> {
        &self.frontier
    }

    /// Every position ever enqueued, in discovery order.
    pub fn visited(&self) -> &IndexSet<Pos> {
        &self.visited
    }

    /// For each discovered position except the start, the position that discovered it.
    pub fn parents(&self) -> &IndexMap<Pos, Pos> {
        &self.parents
    }

    pub fn dequeued(&self) -> usize {
        self.dequeued
    }

    pub fn is_reached(&self) -> bool {
        self.reached
    }

    pub fn step(&mut self) -> Step {
        if self.reached {
            return Step::Reached(self.goal);
        }
        let Some(current) = self.frontier.pop_front() else {
            return Step::Exhausted;
        };
        self.dequeued += 1;

        if current == self.goal {
            self.reached = true;
            return Step::Reached(current);
        }

        let options = Direction::ALL
            .into_iter()
            .filter_map(|dir| self.grid.sibling_pos(current, dir))
            .filter(|&pos| !self.grid[pos].is_wall() && !self.visited.contains(&pos))
            .collect::<ArrayVec<_, 4>>();

        // Claim at enqueue time: whoever reaches a position first in queue order owns it.
        for &pos in &options {
            self.visited.insert(pos);
            self.frontier.push_back(pos);
            self.parents.entry(pos).or_insert(current);
        }

        Step::Expanded { current, options }
    }

    /// Step until the goal is reached or the frontier is exhausted, calling
    /// `on_step` after every dequeue.
    pub fn run(&mut self, on_step: impl FnMut(&Search<'g>, &Step)) -> Option<Path> {
        match self.drive(None, on_step) {
            Ok(path) => path,
            Err(err) => unreachable!("unbounded search stopped: {err}"),
        }
    }

    /// Like [`Search::run`], but fail once `max_steps` dequeues have been spent
    /// and the search is neither finished nor exhausted. The search stays
    /// resumable after the failure.
    pub fn run_with_budget(
        &mut self,
        max_steps: usize,
        on_step: impl FnMut(&Search<'g>, &Step),
    ) -> Result<Option<Path>, OutOfBudget> {
        self.drive(Some(max_steps), on_step)
    }

    fn drive(
        &mut self,
        max_steps: Option<usize>,
        mut on_step: impl FnMut(&Search<'g>, &Step),
    ) -> Result<Option<Path>, OutOfBudget> {
        loop {
            #[cfg(feature = "coz")]
            coz::scope!("Search step");

            // An empty frontier means the next step is a verdict, not a dequeue.
            if let Some(max_steps) = max_steps {
                if !self.reached && self.dequeued >= max_steps && !self.frontier.is_empty() {
                    return Err(OutOfBudget {
                        max_steps,
                        queued: self.frontier.len(),
                    });
                }
            }

            let step = self.step();
            match step {
                Step::Exhausted => return Ok(None),
                Step::Reached(_) => {
                    on_step(&*self, &step);
                    return Ok(self.path());
                }
                Step::Expanded { .. } => {
                    #[cfg(feature = "coz")]
                    coz::progress!("Expand");

                    on_step(&*self, &step);
                }
            }
        }
    }

    /// Walk the parent map back from the goal. `None` until the goal is reached.
    pub fn path(&self) -> Option<Path> {
        if !self.reached {
            return None;
        }
        let mut path = std::iter::successors(Some(self.goal), |pos| self.parents.get(pos).copied())
            .collect::<Vec<_>>();
        path.reverse();
        debug_assert_eq!(path.first(), Some(&self.start));
        Some(Path(path.into()))
    }
}

/// Find a shortest path from `start` to `goal`, or `None` if the goal is unreachable.
pub fn find_path(
    grid: &Grid,
    start: Pos,
    goal: Pos,
    on_step: impl FnMut(&Search<'_>, &Step),
) -> Result<Option<Path>, InvalidInput> {
    let mut search = Search::new(grid, start, goal)?;
    Ok(search.run(on_step))
}
