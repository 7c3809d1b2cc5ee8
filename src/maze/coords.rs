use std::fmt;

/// Grid coordinates of a cell. `x` grows to the right, `y` grows downwards.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coords {
    pub x: usize,
    pub y: usize,
}

impl Coords {
    pub const fn new(x: usize, y: usize) -> Self {
        Coords { x, y }
    }

    /// Number of horizontal and vertical moves between two cells.
    pub fn manhattan_distance(self, other: Coords) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// True if the cells share a side.
    pub fn is_adjacent(self, other: Coords) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The side shared by two adjacent cells, open or closed.
///
/// Walls are unordered pairs: `Wall::new(a, b) == Wall::new(b, a)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Wall {
    a: Coords,
    b: Coords,
}

impl Wall {
    pub fn new(a: Coords, b: Coords) -> Self {
        if a <= b { Wall { a, b } } else { Wall { a: b, b: a } }
    }

    pub fn a(&self) -> Coords {
        self.a
    }

    pub fn b(&self) -> Coords {
        self.b
    }

    /// Both cells of the wall.
    pub fn cells(&self) -> (Coords, Coords) {
        (self.a, self.b)
    }
}

impl fmt::Display for Wall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.a, self.b)
    }
}
