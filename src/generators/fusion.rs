use rand::{rngs::StdRng, seq::SliceRandom};

use super::{Generator, MazeGenerator, StepInfo, WallChange};
use crate::maze::{Maze, MazeError, MazeView, Result, Wall};

/// Randomized Kruskal: walls are visited in random order and opened when they
/// separate two different connected components.
///
/// Components are tracked by giving every cell a label and relabeling the whole
/// component reachable from one end of each opened wall. Merging costs O(n),
/// which is fine for terminal-sized grids.
pub struct FusionGenerator<'a> {
    maze: &'a mut Maze,
    /// Component label of each cell, by vertex identifier
    labels: Vec<usize>,
    /// Remaining candidate walls, consumed from the back
    walls: Vec<Wall>,
    merges: usize,
}

impl<'a> FusionGenerator<'a> {
    pub fn new(maze: &'a mut Maze, mut rng: StdRng) -> Self {
        maze.close_all_walls();
        let mut walls = maze.all_walls();
        walls.shuffle(&mut rng);
        tracing::debug!("[fusion] starting with {} candidate walls", walls.len());
        FusionGenerator {
            labels: (0..maze.cell_count()).collect(),
            maze,
            walls,
            merges: 0,
        }
    }

    /// Number of walls opened so far.
    pub fn merges(&self) -> usize {
        self.merges
    }
}

impl MazeGenerator for FusionGenerator<'_> {
    fn kind(&self) -> Generator {
        Generator::Fusion
    }

    fn maze(&self) -> &Maze {
        self.maze
    }

    fn step(&mut self) -> Result<StepInfo> {
        let Some(wall) = self.walls.pop() else {
            return Err(MazeError::Exhausted);
        };
        let (a, b) = wall.cells();
        let (id_a, id_b) = (self.maze.id_of(a), self.maze.id_of(b));

        if self.labels[id_a] == self.labels[id_b] {
            // Opening this wall would create a cycle
            return Ok(StepInfo {
                cell: Some(a),
                change: WallChange::Kept(wall),
            });
        }

        self.maze.open_passage(a, b)?;
        self.merges += 1;
        let label = self.labels[id_a];
        for id in self.maze.graph().depth_first_order(id_a) {
            self.labels[id] = label;
        }
        tracing::trace!("[fusion] merged {} into component {}", b, label);
        if self.walls.is_empty() {
            tracing::debug!("[fusion] finished with {} merges", self.merges);
        }

        Ok(StepInfo {
            cell: Some(b),
            change: WallChange::Opened(wall),
        })
    }

    fn has_more_steps(&self) -> bool {
        !self.walls.is_empty()
    }

    fn labels(&self) -> Option<&[usize]> {
        Some(&self.labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::get_rng;

    #[test]
    fn test_labels_converge() {
        let mut maze = Maze::new(5, 4).unwrap();
        let mut generator = FusionGenerator::new(&mut maze, get_rng(Some(5)));
        assert_eq!(generator.labels().unwrap(), (0..20).collect::<Vec<_>>());

        while generator.has_more_steps() {
            generator.step().unwrap();
        }
        let labels = generator.labels().unwrap();
        assert!(labels.iter().all(|&l| l == labels[0]));
        assert_eq!(generator.merges(), 19);
    }

    #[test]
    fn test_labels_match_components_after_each_step() {
        let mut maze = Maze::new(4, 4).unwrap();
        let mut generator = FusionGenerator::new(&mut maze, get_rng(Some(11)));
        while generator.has_more_steps() {
            generator.step().unwrap();
            let labels = generator.labels().unwrap();
            for id in 0..16 {
                for other in generator.maze().graph().breadth_first_order(id) {
                    assert_eq!(labels[id], labels[other]);
                }
            }
        }
    }

    #[test]
    fn test_cycle_walls_are_kept() {
        let mut maze = Maze::new(3, 3).unwrap();
        let mut generator = FusionGenerator::new(&mut maze, get_rng(Some(2)));
        let mut kept = 0;
        while generator.has_more_steps() {
            if let WallChange::Kept(wall) = generator.step().unwrap().change {
                assert!(generator.maze().is_wall_between(wall.a(), wall.b()));
                kept += 1;
            }
        }
        // 12 walls, 8 of them become passages
        assert_eq!(kept, 4);
    }
}
