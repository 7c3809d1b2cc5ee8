use super::{MazeSolver, SolveStep, Solver};
use crate::{
    heap::MinHeap,
    maze::{Coords, MazeView},
};

/// Cost of a cell that has not been reached yet.
const UNREACHED: usize = usize::MAX;

/// A* search with the Manhattan distance as heuristic. Every passage costs 1,
/// so the heuristic never overestimates and the first path to the exit is optimal.
pub struct AStarSolver<'a, M> {
    maze: &'a M,
    start: Coords,
    goal: Coords,
    /// Frontier keyed by `f = g + h`
    open: MinHeap<usize>,
    /// Best known cost from the entrance, by vertex identifier
    costs: Vec<usize>,
    came_from: Vec<Option<usize>>,
    closed: Vec<bool>,
    path: Vec<Coords>,
}

impl<'a, M: MazeView> AStarSolver<'a, M> {
    pub fn new(maze: &'a M) -> Self {
        let (start, goal) = maze.openings();
        let cells = maze.cell_count();
        let mut solver = AStarSolver {
            maze,
            start,
            goal,
            open: MinHeap::new(),
            costs: vec![UNREACHED; cells],
            came_from: vec![None; cells],
            closed: vec![false; cells],
            path: Vec::new(),
        };
        if start == goal {
            solver.path.push(start);
        } else {
            let id = maze.id_of(start);
            let estimate = solver.heuristic(start);
            solver.costs[id] = 0;
            solver.open.insert(id, estimate);
        }
        tracing::debug!("[a*] searching from {} to {}", start, goal);
        solver
    }

    /// Pops entries of vertices closed since they were pushed, so the heap
    /// is empty exactly when no open vertex is left.
    fn drop_stale_entries(&mut self) {
        while let Some(&id) = self.open.peek() {
            if !self.closed[id] {
                break;
            }
            self.open.extract_min();
        }
    }

    fn heuristic(&self, coord: Coords) -> usize {
        coord.manhattan_distance(self.goal)
    }

    /// Walks the predecessors back from `id` to the entrance.
    fn reconstruct_path(&self, mut id: usize) -> Vec<Coords> {
        let mut path = vec![self.maze.coords_of(id)];
        while let Some(previous) = self.came_from[id] {
            path.push(self.maze.coords_of(previous));
            id = previous;
        }
        path.reverse();
        debug_assert_eq!(path.first(), Some(&self.start));
        path
    }
}

impl<M: MazeView> MazeSolver for AStarSolver<'_, M> {
    fn kind(&self) -> Solver {
        Solver::AStar
    }

    fn step(&mut self) -> SolveStep {
        if !self.path.is_empty() {
            return SolveStep::default();
        }
        // Skip entries superseded by a cheaper re-insertion
        let current_id = loop {
            match self.open.extract_min() {
                Some(id) if self.closed[id] => continue,
                Some(id) => break id,
                None => {
                    tracing::debug!("[a*] frontier exhausted, no path to {}", self.goal);
                    return SolveStep::default();
                }
            }
        };
        self.closed[current_id] = true;
        let current = self.maze.coords_of(current_id);

        if current == self.goal {
            self.path = self.reconstruct_path(current_id);
            tracing::debug!("[a*] goal reached, path of {} cells", self.path.len());
            return SolveStep {
                current: Some(current),
                found: true,
            };
        }

        let tentative = self.costs[current_id] + 1;
        for neighbor in self.maze.neighbor_cells(current) {
            let id = self.maze.id_of(neighbor);
            if self.closed[id] || self.maze.is_wall_between(current, neighbor) {
                continue;
            }
            if tentative < self.costs[id] {
                self.costs[id] = tentative;
                self.came_from[id] = Some(current_id);
                let estimate = tentative + self.heuristic(neighbor);
                self.open.insert(id, estimate);
            }
        }
        self.drop_stale_entries();
        if self.open.is_empty() {
            tracing::debug!("[a*] frontier exhausted, no path to {}", self.goal);
        }

        SolveStep {
            current: Some(current),
            found: false,
        }
    }

    fn has_more_steps(&self) -> bool {
        self.path.is_empty() && !self.open.is_empty()
    }

    fn path(&self) -> &[Coords] {
        &self.path
    }

    fn visited(&self) -> &[bool] {
        &self.closed
    }
}
