use std::{collections::VecDeque, rc::Rc};

use super::{MazeSolver, SolveStep, Solver};
use crate::maze::{Coords, MazeView};

/// A partial path, stored as a link to the path it extends so that paths
/// sharing a prefix share its memory.
struct PathNode {
    coord: Coords,
    parent: Option<Rc<PathNode>>,
}

impl PathNode {
    /// Cells from the root of the path to this node.
    fn to_path(&self) -> Vec<Coords> {
        let mut path = vec![self.coord];
        let mut node = self.parent.as_deref();
        while let Some(parent) = node {
            path.push(parent.coord);
            node = parent.parent.as_deref();
        }
        path.reverse();
        path
    }
}

/// Breadth-first search over a queue of partial paths. Every depth level is
/// exhausted before the next, so the first path reaching the exit is a shortest one.
pub struct BreadthFirstSolver<'a, M> {
    maze: &'a M,
    goal: Coords,
    frontier: VecDeque<Rc<PathNode>>,
    visited: Vec<bool>,
    path: Vec<Coords>,
}

impl<'a, M: MazeView> BreadthFirstSolver<'a, M> {
    pub fn new(maze: &'a M) -> Self {
        let (start, goal) = maze.openings();
        let mut visited = vec![false; maze.cell_count()];
        visited[maze.id_of(start)] = true;
        let mut solver = BreadthFirstSolver {
            maze,
            goal,
            frontier: VecDeque::new(),
            visited,
            path: Vec::new(),
        };
        if start == goal {
            solver.path.push(start);
        } else {
            solver.frontier.push_back(Rc::new(PathNode {
                coord: start,
                parent: None,
            }));
        }
        tracing::debug!("[bfs] searching from {} to {}", start, goal);
        solver
    }
}

impl<M: MazeView> MazeSolver for BreadthFirstSolver<'_, M> {
    fn kind(&self) -> Solver {
        Solver::BreadthFirst
    }

    fn step(&mut self) -> SolveStep {
        if !self.has_more_steps() {
            return SolveStep::default();
        }
        let Some(node) = self.frontier.pop_front() else {
            return SolveStep::default();
        };
        let current = node.coord;

        if current == self.goal {
            self.path = node.to_path();
            self.frontier.clear();
            tracing::debug!("[bfs] goal reached, path of {} cells", self.path.len());
            return SolveStep {
                current: Some(current),
                found: true,
            };
        }

        for neighbor in self.maze.neighbor_cells(current) {
            let id = self.maze.id_of(neighbor);
            if self.visited[id] || self.maze.is_wall_between(current, neighbor) {
                continue;
            }
            self.visited[id] = true;
            self.frontier.push_back(Rc::new(PathNode {
                coord: neighbor,
                parent: Some(node.clone()),
            }));
        }

        if self.frontier.is_empty() {
            tracing::debug!("[bfs] frontier exhausted, no path to {}", self.goal);
        }
        SolveStep {
            current: Some(current),
            found: false,
        }
    }

    fn has_more_steps(&self) -> bool {
        self.path.is_empty() && !self.frontier.is_empty()
    }

    fn path(&self) -> &[Coords] {
        &self.path
    }

    fn visited(&self) -> &[bool] {
        &self.visited
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Maze;

    fn c(x: usize, y: usize) -> Coords {
        Coords::new(x, y)
    }

    #[test]
    fn test_follows_corridor() {
        // Serpentine through a 3x2 maze: (0,0) (1,0) (2,0) (2,1) (1,1) (0,1)
        let mut maze = Maze::new(3, 2).unwrap();
        maze.open_passage(c(0, 0), c(1, 0)).unwrap();
        maze.open_passage(c(1, 0), c(2, 0)).unwrap();
        maze.open_passage(c(2, 0), c(2, 1)).unwrap();
        maze.open_passage(c(2, 1), c(1, 1)).unwrap();
        maze.open_passage(c(1, 1), c(0, 1)).unwrap();
        maze.set_openings(c(0, 0), c(0, 1)).unwrap();

        let mut solver = BreadthFirstSolver::new(&maze);
        let mut expanded = Vec::new();
        while solver.has_more_steps() {
            let step = solver.step();
            expanded.push(step.current.unwrap());
        }
        assert_eq!(expanded, vec![c(0, 0), c(1, 0), c(2, 0), c(2, 1), c(1, 1), c(0, 1)]);
        assert_eq!(solver.path(), expanded.as_slice());
        assert!(solver.visited().iter().all(|&v| v));
    }

    #[test]
    fn test_path_node_chain() {
        let root = Rc::new(PathNode {
            coord: c(0, 0),
            parent: None,
        });
        let child = Rc::new(PathNode {
            coord: c(1, 0),
            parent: Some(root.clone()),
        });
        let leaf = PathNode {
            coord: c(1, 1),
            parent: Some(child),
        };
        assert_eq!(leaf.to_path(), vec![c(0, 0), c(1, 0), c(1, 1)]);
        assert_eq!(root.to_path(), vec![c(0, 0)]);
    }
}
