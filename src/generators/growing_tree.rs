use rand::{Rng, rngs::StdRng, seq::IndexedRandom};

use super::{Generator, MazeGenerator, StepInfo, WallChange, random_cell};
use crate::maze::{Coords, Maze, MazeError, MazeView, Result, Wall};

/// How the growing tree picks the active cell to extend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Any active cell, uniformly (Prim's algorithm).
    Random,
    /// The most recently added cell (recursive backtracker).
    Newest,
}

/// Growing tree generator.
///
/// Keeps a list of active cells seeded with one random cell. Each step extends
/// an active cell into a random unvisited neighbor, or retires it when it has none.
pub struct GrowingTreeGenerator<'a> {
    maze: &'a mut Maze,
    rng: StdRng,
    selection: Selection,
    active: Vec<Coords>,
    visited: Vec<bool>,
    visited_count: usize,
}

impl<'a> GrowingTreeGenerator<'a> {
    pub fn new(maze: &'a mut Maze, selection: Selection, mut rng: StdRng) -> Self {
        maze.close_all_walls();
        let start = random_cell(maze, &mut rng);
        let mut visited = vec![false; maze.cell_count()];
        visited[maze.id_of(start)] = true;
        tracing::debug!("[growing tree] {:?} selection, starting at {}", selection, start);
        GrowingTreeGenerator {
            maze,
            rng,
            selection,
            active: vec![start],
            visited,
            visited_count: 1,
        }
    }

    /// Cells waiting to be extended.
    pub fn active(&self) -> &[Coords] {
        &self.active
    }
}

impl MazeGenerator for GrowingTreeGenerator<'_> {
    fn kind(&self) -> Generator {
        match self.selection {
            Selection::Random => Generator::Prim,
            Selection::Newest => Generator::Backtrack,
        }
    }

    fn maze(&self) -> &Maze {
        self.maze
    }

    fn step(&mut self) -> Result<StepInfo> {
        if !self.has_more_steps() {
            return Err(MazeError::Exhausted);
        }

        let index = match self.selection {
            Selection::Random => self.rng.random_range(0..self.active.len()),
            Selection::Newest => self.active.len() - 1,
        };
        let cell = self.active[index];

        let unvisited = self
            .maze
            .neighbor_cells(cell)
            .into_iter()
            .filter(|&n| !self.visited[self.maze.id_of(n)])
            .collect::<Vec<_>>();

        match unvisited.choose(&mut self.rng) {
            Some(&next) => {
                self.maze.open_passage(cell, next)?;
                let id = self.maze.id_of(next);
                self.visited[id] = true;
                self.visited_count += 1;
                self.active.push(next);
                tracing::trace!("[growing tree] carved {} -> {}", cell, next);
                Ok(StepInfo {
                    cell: Some(next),
                    change: WallChange::Opened(Wall::new(cell, next)),
                })
            }
            None => {
                // Dead end: retire the cell
                match self.selection {
                    Selection::Random => {
                        self.active.swap_remove(index);
                    }
                    Selection::Newest => {
                        self.active.pop();
                    }
                }
                Ok(StepInfo {
                    cell: Some(cell),
                    change: WallChange::None,
                })
            }
        }
    }

    /// Generation is over once every cell has been reached; the cells still
    /// active at that point have nothing left to carve.
    fn has_more_steps(&self) -> bool {
        self.visited_count < self.visited.len() && !self.active.is_empty()
    }

    fn visited(&self) -> Option<&[bool]> {
        Some(&self.visited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::get_rng;

    fn run(selection: Selection, seed: u64) -> (Maze, usize) {
        let mut maze = Maze::new(6, 4).unwrap();
        let mut generator = GrowingTreeGenerator::new(&mut maze, selection, get_rng(Some(seed)));
        let mut steps = 0;
        while generator.has_more_steps() {
            generator.step().unwrap();
            steps += 1;
        }
        assert!(generator.visited().unwrap().iter().all(|&v| v));
        drop(generator);
        (maze, steps)
    }

    #[test]
    fn test_every_cell_is_reached() {
        for selection in [Selection::Random, Selection::Newest] {
            for seed in 0..5 {
                let (maze, steps) = run(selection, seed);
                assert_eq!(maze.graph().edge_count(), 23);
                assert!(steps >= 23);
            }
        }
    }

    #[test]
    fn test_backtracker_extends_newest_cell() {
        let mut maze = Maze::new(5, 5).unwrap();
        let mut generator =
            GrowingTreeGenerator::new(&mut maze, Selection::Newest, get_rng(Some(8)));
        while generator.has_more_steps() {
            let newest = *generator.active().last().unwrap();
            let info = generator.step().unwrap();
            match info.change {
                WallChange::Opened(wall) => {
                    assert!(wall.a() == newest || wall.b() == newest)
                }
                _ => assert_eq!(info.cell, Some(newest)),
            }
        }
    }
}
