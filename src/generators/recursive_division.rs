use rand::{Rng, rngs::StdRng};

use super::{Generator, MazeGenerator, StepInfo, WallChange};
use crate::maze::{Coords, Maze, MazeError, Result, Wall};

#[derive(Debug, Clone, PartialEq)]
enum Orientation {
    /// A wall line between two rows
    Horizontal,
    /// A wall line between two columns
    Vertical,
}

/// A rectangle of cells still to be divided.
#[derive(Debug, Clone, Copy)]
struct Region {
    origin: Coords,
    width: usize,
    height: usize,
}

impl Region {
    /// Regions one cell thin are corridors and need no further walls.
    fn is_divisible(&self) -> bool {
        self.width >= 2 && self.height >= 2
    }
}

/// Recursive division: starts with every wall open and splits regions with a
/// wall line that has a single door, until only corridors remain.
///
/// Pending regions live on an explicit stack so the division can pause between steps.
pub struct RecursiveDivisionGenerator<'a> {
    maze: &'a mut Maze,
    rng: StdRng,
    regions: Vec<Region>,
}

impl<'a> RecursiveDivisionGenerator<'a> {
    pub fn new(maze: &'a mut Maze, rng: StdRng) -> Self {
        maze.close_all_walls();
        maze.open_all_walls();
        let whole = Region {
            origin: Coords::new(0, 0),
            width: maze.width(),
            height: maze.height(),
        };
        RecursiveDivisionGenerator {
            maze,
            rng,
            regions: if whole.is_divisible() { vec![whole] } else { Vec::new() },
        }
    }

    fn push(&mut self, region: Region) {
        if region.is_divisible() {
            self.regions.push(region);
        }
    }
}

impl MazeGenerator for RecursiveDivisionGenerator<'_> {
    fn kind(&self) -> Generator {
        Generator::RecursiveDivision
    }

    fn maze(&self) -> &Maze {
        self.maze
    }

    fn step(&mut self) -> Result<StepInfo> {
        let Some(Region {
            origin,
            width,
            height,
        }) = self.regions.pop()
        else {
            return Err(MazeError::Exhausted);
        };
        let Coords { x, y } = origin;

        // Cut across the longer side so regions stay roughly square
        let orientation = match width.cmp(&height) {
            std::cmp::Ordering::Less => Orientation::Horizontal,
            std::cmp::Ordering::Greater => Orientation::Vertical,
            std::cmp::Ordering::Equal => {
                if self.rng.random_bool(0.5) {
                    Orientation::Horizontal
                } else {
                    Orientation::Vertical
                }
            }
        };

        let (walls, door, first, second) = match orientation {
            Orientation::Horizontal => {
                // Wall line below row y + diff
                let diff = self.rng.random_range(0..height - 1);
                let y_wall = y + diff;
                let x_door = x + self.rng.random_range(0..width);
                let walls = (x..x + width)
                    .map(|cx| Wall::new(Coords::new(cx, y_wall), Coords::new(cx, y_wall + 1)))
                    .collect::<Vec<_>>();
                let door = Wall::new(Coords::new(x_door, y_wall), Coords::new(x_door, y_wall + 1));
                let upper = Region {
                    origin,
                    width,
                    height: diff + 1,
                };
                let lower = Region {
                    origin: Coords::new(x, y_wall + 1),
                    width,
                    height: height - diff - 1,
                };
                (walls, door, upper, lower)
            }
            Orientation::Vertical => {
                // Wall line right of column x + diff
                let diff = self.rng.random_range(0..width - 1);
                let x_wall = x + diff;
                let y_door = y + self.rng.random_range(0..height);
                let walls = (y..y + height)
                    .map(|cy| Wall::new(Coords::new(x_wall, cy), Coords::new(x_wall + 1, cy)))
                    .collect::<Vec<_>>();
                let door = Wall::new(Coords::new(x_wall, y_door), Coords::new(x_wall + 1, y_door));
                let left = Region {
                    origin,
                    width: diff + 1,
                    height,
                };
                let right = Region {
                    origin: Coords::new(x_wall + 1, y),
                    width: width - diff - 1,
                    height,
                };
                (walls, door, left, right)
            }
        };

        for &wall in walls.iter().filter(|&&w| w != door) {
            self.maze.close_wall(wall)?;
        }
        tracing::trace!(
            "[recursive division] {:?} line of {} walls, door at {}",
            orientation,
            walls.len(),
            door
        );

        self.push(first);
        self.push(second);

        Ok(StepInfo {
            cell: Some(door.a()),
            change: WallChange::Closed { walls, door },
        })
    }

    fn has_more_steps(&self) -> bool {
        !self.regions.is_empty()
    }
}
