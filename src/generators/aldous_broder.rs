use rand::{rngs::StdRng, seq::IndexedRandom};

use super::{Generator, MazeGenerator, StepInfo, WallChange, random_cell};
use crate::maze::{Coords, Maze, MazeError, MazeView, Result, Wall};

/// Aldous-Broder: an unbiased random walk that opens a passage whenever it
/// enters a cell for the first time. Yields a uniform spanning tree, but the
/// number of steps is unbounded.
pub struct AldousBroderGenerator<'a> {
    maze: &'a mut Maze,
    rng: StdRng,
    current: Coords,
    visited: Vec<bool>,
    visited_count: usize,
}

impl<'a> AldousBroderGenerator<'a> {
    pub fn new(maze: &'a mut Maze, mut rng: StdRng) -> Self {
        maze.close_all_walls();
        let current = random_cell(maze, &mut rng);
        let mut visited = vec![false; maze.cell_count()];
        visited[maze.id_of(current)] = true;
        tracing::debug!("[aldous-broder] walk starts at {}", current);
        AldousBroderGenerator {
            maze,
            rng,
            current,
            visited,
            visited_count: 1,
        }
    }

    /// Cell the walk is standing on.
    pub fn current(&self) -> Coords {
        self.current
    }
}

impl MazeGenerator for AldousBroderGenerator<'_> {
    fn kind(&self) -> Generator {
        Generator::AldousBroder
    }

    fn maze(&self) -> &Maze {
        self.maze
    }

    fn step(&mut self) -> Result<StepInfo> {
        if !self.has_more_steps() {
            return Err(MazeError::Exhausted);
        }
        let from = self.current;
        let Some(&next) = self.maze.neighbor_cells(from).choose(&mut self.rng) else {
            return Err(MazeError::Exhausted);
        };
        self.current = next;

        let id = self.maze.id_of(next);
        let change = if self.visited[id] {
            WallChange::None
        } else {
            self.maze.open_passage(from, next)?;
            self.visited[id] = true;
            self.visited_count += 1;
            tracing::trace!("[aldous-broder] entered {} from {}", next, from);
            WallChange::Opened(Wall::new(from, next))
        };
        Ok(StepInfo {
            cell: Some(next),
            change,
        })
    }

    fn has_more_steps(&self) -> bool {
        self.visited_count < self.visited.len()
    }

    fn visited(&self) -> Option<&[bool]> {
        Some(&self.visited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::get_rng;

    #[test]
    fn test_walk_moves_to_neighbors() {
        let mut maze = Maze::new(4, 3).unwrap();
        let mut generator = AldousBroderGenerator::new(&mut maze, get_rng(Some(4)));
        while generator.has_more_steps() {
            let before = generator.current();
            let info = generator.step().unwrap();
            assert!(before.is_adjacent(generator.current()));
            assert_eq!(info.cell, Some(generator.current()));
        }
        assert_eq!(maze.graph().edge_count(), 11);
    }
}
