use rand::{rngs::StdRng, seq::IndexedRandom};

use super::{Generator, MazeGenerator, StepInfo, WallChange, random_cell};
use crate::maze::{Maze, MazeError, MazeView, Result, Wall};

/// Opens a passage from a random cell to a random neighbor, once per cell.
///
/// There is no connectivity bookkeeping: the result usually has cycles and
/// may leave parts of the maze unreachable.
pub struct RandomGenerator<'a> {
    maze: &'a mut Maze,
    rng: StdRng,
    remaining: usize,
}

impl<'a> RandomGenerator<'a> {
    pub fn new(maze: &'a mut Maze, rng: StdRng) -> Self {
        maze.close_all_walls();
        // A single cell has no wall to open
        let remaining = if maze.cell_count() > 1 {
            maze.cell_count()
        } else {
            0
        };
        RandomGenerator {
            maze,
            rng,
            remaining,
        }
    }
}

impl MazeGenerator for RandomGenerator<'_> {
    fn kind(&self) -> Generator {
        Generator::Random
    }

    fn maze(&self) -> &Maze {
        self.maze
    }

    fn step(&mut self) -> Result<StepInfo> {
        if self.remaining == 0 {
            return Err(MazeError::Exhausted);
        }
        self.remaining -= 1;

        let cell = random_cell(self.maze, &mut self.rng);
        let Some(&neighbor) = self.maze.neighbor_cells(cell).choose(&mut self.rng) else {
            return Ok(StepInfo {
                cell: Some(cell),
                change: WallChange::None,
            });
        };
        self.maze.open_passage(cell, neighbor)?;
        tracing::trace!("[random] opened {} -> {}", cell, neighbor);
        Ok(StepInfo {
            cell: Some(neighbor),
            change: WallChange::Opened(Wall::new(cell, neighbor)),
        })
    }

    fn has_more_steps(&self) -> bool {
        self.remaining > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::get_rng;

    #[test]
    fn test_runs_once_per_cell() {
        let mut maze = Maze::new(4, 4).unwrap();
        let mut generator = RandomGenerator::new(&mut maze, get_rng(Some(9)));
        let mut steps = 0;
        while generator.has_more_steps() {
            let info = generator.step().unwrap();
            assert!(matches!(info.change, WallChange::Opened(_)));
            steps += 1;
        }
        drop(generator);
        assert_eq!(steps, 16);
        // Some passages may be opened twice
        assert!(maze.graph().edge_count() <= 16);
        assert!(maze.graph().edge_count() > 0);
    }

    #[test]
    fn test_starts_from_closed_walls() {
        let mut maze = Maze::new(3, 3).unwrap();
        maze.open_all_walls();
        let generator = RandomGenerator::new(&mut maze, get_rng(Some(0)));
        assert_eq!(generator.maze().graph().edge_count(), 0);
    }
}
