mod bitmap;
mod coords;

use std::collections::HashMap;

use thiserror::Error;

pub use bitmap::BitmapMaze;
pub use coords::{Coords, Wall};

use crate::graph::Graph;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("invalid maze dimensions {width}x{height}: both must be positive")]
    InvalidDimensions { width: usize, height: usize },

    #[error("cells {a} and {b} are not adjacent cells of the maze")]
    InvalidAdjacency { a: Coords, b: Coords },

    #[error("cell {0} is outside of the maze")]
    OutOfBounds(Coords),

    #[error("the generator has no more steps")]
    Exhausted,

    #[error("bitmap holds {actual} bytes, expected {expected}")]
    BitmapSize { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, MazeError>;

/// Read-only view of a maze, shared by every maze representation the solvers and
/// the renderer work with.
pub trait MazeView {
    /// Width of the maze in cells.
    fn width(&self) -> usize;

    /// Height of the maze in cells.
    fn height(&self) -> usize;

    /// True if moving between `a` and `b` is impossible. Cells that are out of
    /// bounds or not adjacent are always separated by a wall.
    fn is_wall_between(&self, a: Coords, b: Coords) -> bool;

    /// Entrance and exit of the maze.
    fn openings(&self) -> (Coords, Coords);

    fn contains(&self, coord: Coords) -> bool {
        coord.x < self.width() && coord.y < self.height()
    }

    /// Vertex identifier of a cell: `x + y * width`.
    fn id_of(&self, coord: Coords) -> usize {
        coord.x + coord.y * self.width()
    }

    /// Inverse of [`MazeView::id_of`].
    fn coords_of(&self, id: usize) -> Coords {
        Coords::new(id % self.width(), id / self.width())
    }

    fn cell_count(&self) -> usize {
        self.width() * self.height()
    }

    /// Cells sharing a side with `coord` (left, right, up, down), regardless of walls.
    fn neighbor_cells(&self, coord: Coords) -> Vec<Coords> {
        if !self.contains(coord) {
            return Vec::new();
        }
        let Coords { x, y } = coord;
        let mut neighbors = Vec::with_capacity(4);
        if x > 0 {
            neighbors.push(Coords::new(x - 1, y));
        }
        if x + 1 < self.width() {
            neighbors.push(Coords::new(x + 1, y));
        }
        if y > 0 {
            neighbors.push(Coords::new(x, y - 1));
        }
        if y + 1 < self.height() {
            neighbors.push(Coords::new(x, y + 1));
        }
        neighbors
    }
}

/// A rectangular maze whose passages are the edges of a graph over its cells.
///
/// Every cell is a vertex from construction onwards. A wall between two adjacent
/// cells is the absence of the edge between their vertices.
#[derive(Debug, Clone)]
pub struct Maze {
    width: usize,
    height: usize,
    graph: Graph<usize>,
    openings: (Coords, Coords),
}

impl Maze {
    /// Creates a maze with every wall closed. Openings start at opposite corners.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(MazeError::InvalidDimensions { width, height });
        }
        let mut graph = Graph::new();
        (0..width * height).for_each(|id| graph.add_vertex(id));
        Ok(Maze {
            width,
            height,
            graph,
            openings: (Coords::new(0, 0), Coords::new(width - 1, height - 1)),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The passage graph. Vertex identifiers follow [`MazeView::id_of`].
    pub fn graph(&self) -> &Graph<usize> {
        &self.graph
    }

    pub fn openings(&self) -> (Coords, Coords) {
        self.openings
    }

    pub fn set_openings(&mut self, entrance: Coords, exit: Coords) -> Result<()> {
        for coord in [entrance, exit] {
            if !self.contains(coord) {
                return Err(MazeError::OutOfBounds(coord));
            }
        }
        self.openings = (entrance, exit);
        Ok(())
    }

    /// Walls around a cell, open or closed.
    pub fn walls_of_cell(&self, coord: Coords) -> Vec<Wall> {
        self.neighbor_cells(coord)
            .into_iter()
            .map(|neighbor| Wall::new(coord, neighbor))
            .collect()
    }

    /// Every wall of the maze exactly once, open or closed.
    pub fn all_walls(&self) -> Vec<Wall> {
        let mut walls = Vec::with_capacity(2 * self.width * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let cell = Coords::new(x, y);
                if x + 1 < self.width {
                    walls.push(Wall::new(cell, Coords::new(x + 1, y)));
                }
                if y + 1 < self.height {
                    walls.push(Wall::new(cell, Coords::new(x, y + 1)));
                }
            }
        }
        walls
    }

    fn check_adjacent(&self, a: Coords, b: Coords) -> Result<()> {
        if self.contains(a) && self.contains(b) && a.is_adjacent(b) {
            Ok(())
        } else {
            Err(MazeError::InvalidAdjacency { a, b })
        }
    }

    /// Opens the passage between two adjacent cells.
    pub fn open_passage(&mut self, a: Coords, b: Coords) -> Result<()> {
        self.check_adjacent(a, b)?;
        self.graph.add_edge(self.id_of(a), self.id_of(b));
        Ok(())
    }

    /// Closes the passage between two adjacent cells.
    pub fn close_passage(&mut self, a: Coords, b: Coords) -> Result<()> {
        self.check_adjacent(a, b)?;
        self.graph.remove_edge(self.id_of(a), self.id_of(b));
        Ok(())
    }

    pub fn open_wall(&mut self, wall: Wall) -> Result<()> {
        self.open_passage(wall.a(), wall.b())
    }

    pub fn close_wall(&mut self, wall: Wall) -> Result<()> {
        self.close_passage(wall.a(), wall.b())
    }

    pub fn is_wall_between(&self, a: Coords, b: Coords) -> bool {
        if !self.contains(a) || !self.contains(b) {
            return true;
        }
        !self.graph.has_edge(self.id_of(a), self.id_of(b))
    }

    /// Closes every wall. All cells stay in the graph.
    pub fn close_all_walls(&mut self) {
        self.graph.clear_edges();
    }

    /// Opens every wall.
    pub fn open_all_walls(&mut self) {
        for wall in self.all_walls() {
            let (a, b) = wall.cells();
            self.graph.add_edge(self.id_of(a), self.id_of(b));
        }
    }

    /// Cells on the border of the maze: column 0, the last column, then the
    /// interior cells of the first and last rows. No cell is listed twice.
    pub fn lateral_cells(&self) -> Vec<Coords> {
        let mut cells = Vec::new();
        cells.extend((0..self.height).map(|y| Coords::new(0, y)));
        if self.width > 1 {
            cells.extend((0..self.height).map(|y| Coords::new(self.width - 1, y)));
        }
        for x in 1..self.width.saturating_sub(1) {
            cells.push(Coords::new(x, 0));
            if self.height > 1 {
                cells.push(Coords::new(x, self.height - 1));
            }
        }
        cells
    }

    /// Finds the pair of border cells whose shortest path is the longest, makes
    /// it the maze openings and returns it.
    ///
    /// Ties keep the first pair found in [`Maze::lateral_cells`] order. If no two
    /// border cells are connected the openings are left unchanged.
    pub fn find_longest_shortest_path(&mut self) -> (Coords, Coords) {
        let lateral = self.lateral_cells();
        let mut best: Option<(Coords, Coords, usize)> = None;
        for (i, &from) in lateral.iter().enumerate() {
            let distances = self.hop_distances(from);
            for &to in &lateral[i + 1..] {
                let Some(&hops) = distances.get(&self.id_of(to)) else {
                    continue;
                };
                if best.is_none_or(|(_, _, longest)| hops > longest) {
                    best = Some((from, to, hops));
                }
            }
        }
        if let Some((from, to, hops)) = best {
            tracing::debug!("[maze] longest border path {} -> {} ({} hops)", from, to, hops);
            self.openings = (from, to);
        }
        self.openings
    }

    /// Hop count from `from` to every reachable cell, breadth-first.
    fn hop_distances(&self, from: Coords) -> HashMap<usize, usize> {
        let mut distances = HashMap::new();
        let order = self.graph.breadth_first_order(self.id_of(from));
        // Breadth-first order reaches each vertex through a neighbor that is already measured
        for id in order {
            let hops = self
                .graph
                .neighbors(id)
                .filter_map(|n| distances.get(&n).map(|d| d + 1))
                .min()
                .unwrap_or(0);
            distances.insert(id, hops);
        }
        distances
    }
}

impl MazeView for Maze {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn is_wall_between(&self, a: Coords, b: Coords) -> bool {
        Maze::is_wall_between(self, a, b)
    }

    fn openings(&self) -> (Coords, Coords) {
        self.openings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: usize, y: usize) -> Coords {
        Coords::new(x, y)
    }

    #[test]
    fn test_new_maze_is_fully_walled() {
        for (width, height) in [(1, 1), (2, 1), (3, 5), (7, 4)] {
            let maze = Maze::new(width, height).unwrap();
            assert_eq!(maze.graph().vertex_count(), width * height);
            assert_eq!(maze.graph().edge_count(), 0);
            assert!(
                maze.graph()
                    .vertices()
                    .iter()
                    .all(|&v| maze.graph().degree(v) == 0)
            );
        }
    }

    #[test]
    fn test_invalid_dimensions() {
        assert_eq!(
            Maze::new(0, 3).unwrap_err(),
            MazeError::InvalidDimensions {
                width: 0,
                height: 3
            }
        );
        assert!(Maze::new(3, 0).is_err());
    }

    #[test]
    fn test_id_roundtrip() {
        let maze = Maze::new(4, 3).unwrap();
        assert_eq!(maze.id_of(c(3, 2)), 11);
        assert_eq!(maze.coords_of(6), c(2, 1));
    }

    #[test]
    fn test_neighbor_cells() {
        let maze = Maze::new(3, 3).unwrap();
        assert_eq!(maze.neighbor_cells(c(1, 1)), vec![c(0, 1), c(2, 1), c(1, 0), c(1, 2)]);
        assert_eq!(maze.neighbor_cells(c(0, 0)), vec![c(1, 0), c(0, 1)]);
        assert_eq!(maze.neighbor_cells(c(2, 2)), vec![c(1, 2), c(2, 1)]);
        assert!(maze.neighbor_cells(c(3, 0)).is_empty());
        assert_eq!(maze.walls_of_cell(c(0, 1)).len(), 3);
    }

    #[test]
    fn test_open_and_close_passage() {
        let mut maze = Maze::new(3, 3).unwrap();
        assert!(maze.is_wall_between(c(0, 0), c(1, 0)));
        maze.open_passage(c(0, 0), c(1, 0)).unwrap();
        assert!(!maze.is_wall_between(c(0, 0), c(1, 0)));
        assert!(!maze.is_wall_between(c(1, 0), c(0, 0)));
        maze.close_passage(c(1, 0), c(0, 0)).unwrap();
        assert!(maze.is_wall_between(c(0, 0), c(1, 0)));
    }

    #[test]
    fn test_open_non_adjacent_fails_without_mutation() {
        let mut maze = Maze::new(3, 3).unwrap();
        for (a, b) in [(c(0, 0), c(1, 1)), (c(0, 0), c(2, 0)), (c(2, 0), c(3, 0)), (c(1, 1), c(1, 1))] {
            assert_eq!(
                maze.open_passage(a, b),
                Err(MazeError::InvalidAdjacency { a, b })
            );
            assert!(maze.close_passage(a, b).is_err());
        }
        assert_eq!(maze.graph().edge_count(), 0);
    }

    #[test]
    fn test_out_of_range_cells_are_walled() {
        let mut maze = Maze::new(2, 2).unwrap();
        maze.open_all_walls();
        // (2, 0) would alias (0, 1) through its identifier
        assert!(maze.is_wall_between(c(1, 0), c(2, 0)));
    }

    #[test]
    fn test_all_walls() {
        let maze = Maze::new(4, 3).unwrap();
        let walls = maze.all_walls();
        // (w - 1) * h vertical + w * (h - 1) horizontal
        assert_eq!(walls.len(), 3 * 3 + 4 * 2);
        let unique: std::collections::HashSet<_> = walls.iter().collect();
        assert_eq!(unique.len(), walls.len());
        assert!(walls.iter().all(|w| w.a().is_adjacent(w.b())));
    }

    #[test]
    fn test_open_and_close_all_walls() {
        let mut maze = Maze::new(4, 3).unwrap();
        maze.open_all_walls();
        assert_eq!(maze.graph().edge_count(), maze.all_walls().len());
        maze.close_all_walls();
        assert_eq!(maze.graph().edge_count(), 0);
        assert_eq!(maze.graph().vertex_count(), 12);
    }

    #[test]
    fn test_lateral_cells() {
        let maze = Maze::new(4, 3).unwrap();
        let cells = maze.lateral_cells();
        assert_eq!(
            cells,
            vec![
                c(0, 0),
                c(0, 1),
                c(0, 2),
                c(3, 0),
                c(3, 1),
                c(3, 2),
                c(1, 0),
                c(1, 2),
                c(2, 0),
                c(2, 2)
            ]
        );

        assert_eq!(Maze::new(1, 1).unwrap().lateral_cells(), vec![c(0, 0)]);
        assert_eq!(Maze::new(1, 3).unwrap().lateral_cells().len(), 3);
        assert_eq!(Maze::new(3, 1).unwrap().lateral_cells().len(), 3);
    }

    #[test]
    fn test_longest_shortest_path_on_corridor() {
        // A U-shaped corridor: (0,0) -> (0,1) -> (1,1) -> (2,1) -> (2,0)
        let mut maze = Maze::new(3, 2).unwrap();
        maze.open_passage(c(0, 0), c(0, 1)).unwrap();
        maze.open_passage(c(0, 1), c(1, 1)).unwrap();
        maze.open_passage(c(1, 1), c(2, 1)).unwrap();
        maze.open_passage(c(2, 1), c(2, 0)).unwrap();
        maze.open_passage(c(2, 0), c(1, 0)).unwrap();
        let openings = maze.find_longest_shortest_path();
        assert_eq!(openings, (c(0, 0), c(1, 0)));
        assert_eq!(maze.openings(), openings);
    }

    #[test]
    fn test_longest_shortest_path_single_cell() {
        let mut maze = Maze::new(1, 1).unwrap();
        assert_eq!(maze.find_longest_shortest_path(), (c(0, 0), c(0, 0)));
    }

    #[test]
    fn test_set_openings() {
        let mut maze = Maze::new(3, 3).unwrap();
        assert_eq!(maze.openings(), (c(0, 0), c(2, 2)));
        maze.set_openings(c(0, 1), c(2, 1)).unwrap();
        assert_eq!(maze.openings(), (c(0, 1), c(2, 1)));
        assert_eq!(
            maze.set_openings(c(0, 1), c(3, 1)),
            Err(MazeError::OutOfBounds(c(3, 1)))
        );
    }
}
