mod astar;
mod bfs;

pub use astar::AStarSolver;
pub use bfs::BreadthFirstSolver;

use crate::{
    ParseAlgorithmError,
    maze::{Coords, MazeView},
};

/// Description of one solving step, for display only.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SolveStep {
    /// The cell expanded by this step
    pub current: Option<Coords>,
    /// True once the goal has been reached
    pub found: bool,
}

/// A resumable path search from a maze's entrance to its exit.
///
/// [`MazeSolver::has_more_steps`] stays true until a path is found or the
/// search space is exhausted. Callers must check [`MazeSolver::path`]: it stays
/// empty when the exit cannot be reached.
pub trait MazeSolver {
    fn kind(&self) -> Solver;

    fn step(&mut self) -> SolveStep;

    fn has_more_steps(&self) -> bool;

    /// Cells from entrance to exit, both included. Empty until the exit is found.
    fn path(&self) -> &[Coords];

    /// Cells reached so far, indexed by vertex identifier.
    fn visited(&self) -> &[bool];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solver {
    BreadthFirst,
    AStar,
}

impl Solver {
    pub const ALL: [Solver; 2] = [Solver::BreadthFirst, Solver::AStar];

    /// Name accepted by [`std::str::FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Solver::BreadthFirst => "breadth-first",
            Solver::AStar => "a-star",
        }
    }

    fn alias(&self) -> &'static str {
        match self {
            Solver::BreadthFirst => "bfs",
            Solver::AStar => "astar",
        }
    }

    /// Creates a solver searching from the maze's entrance to its exit.
    pub fn build<'a, M: MazeView>(self, maze: &'a M) -> Box<dyn MazeSolver + 'a> {
        match self {
            Solver::BreadthFirst => Box::new(BreadthFirstSolver::new(maze)),
            Solver::AStar => Box::new(AStarSolver::new(maze)),
        }
    }
}

impl std::fmt::Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solver::BreadthFirst => write!(f, "Breadth-First Search (BFS)"),
            Solver::AStar => write!(f, "A* Search"),
        }
    }
}

impl std::str::FromStr for Solver {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Solver::ALL
            .into_iter()
            .find(|solver| solver.name() == name || solver.alias() == name)
            .ok_or_else(|| ParseAlgorithmError::new("solver", s))
    }
}

/// Runs a solver to completion and returns the path found, empty if there is none.
pub fn solve_maze<M: MazeView>(maze: &M, solver: Solver) -> Vec<Coords> {
    let mut search = solver.build(maze);
    while search.has_more_steps() {
        search.step();
    }
    search.path().to_vec()
}
